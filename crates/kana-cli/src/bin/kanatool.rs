use clap::{Parser, Subcommand};

use kana_cli::commands::{config_ops, convert_ops, table_ops};

#[derive(Parser)]
#[command(name = "kanatool", about = "Romaji-to-kana engine diagnostics")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Type a romaji string key by key and print the result
    Convert {
        /// Romaji input (space = space key, newline = commit)
        romaji: String,
        /// Press commit after the last key
        #[arg(long)]
        commit: bool,
        /// Also print renderer codes
        #[arg(long)]
        codes: bool,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
        /// Settings TOML file (optional)
        #[arg(long)]
        settings: Option<String>,
    },
    /// Show buffer state after every key
    Trace {
        /// Romaji input
        romaji: String,
        /// Settings TOML file (optional)
        #[arg(long)]
        settings: Option<String>,
    },
    /// Dump the syllable table in match priority order
    Table {
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the default settings TOML
    SettingsExport,
    /// Validate a settings TOML file
    SettingsValidate {
        /// Path to the settings file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Convert {
            romaji,
            commit,
            codes,
            json,
            settings,
        } => convert_ops::convert_cmd(&romaji, commit, codes, json, settings.as_deref()),
        Command::Trace { romaji, settings } => convert_ops::trace_cmd(&romaji, settings.as_deref()),
        Command::Table { json } => table_ops::table_cmd(json),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
