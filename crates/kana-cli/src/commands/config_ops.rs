use std::path::Path;
use std::process;

use kana_core::settings::{default_toml, load_settings_file, CommitPolicy};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn settings_export() {
    print!("{}", default_toml());
}

pub fn settings_validate(file: &str) {
    let s = die!(load_settings_file(Path::new(file)), "Error: {}");
    let commit = match s.rules.commit {
        CommitPolicy::PassThrough => "pass-through",
        CommitPolicy::Retain => "retain",
    };
    println!(
        "OK: staging.capacity={}, output.capacity={}, rules.commit={}",
        s.staging.capacity, s.output.capacity, commit
    );
}
