//! Global settings loaded from TOML, behind a `OnceLock` singleton.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Deserialize;

use crate::buffer::{DEFAULT_OUTPUT_CAPACITY, DEFAULT_STAGING_CAPACITY, MAX_CAPACITY};
use crate::romaji::NASAL;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

/// Read and validate a settings file without touching the global singleton.
pub fn load_settings_file(path: &Path) -> Result<Settings, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_settings_toml(&content)
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub staging: BufferSettings,
    pub output: BufferSettings,
    pub rules: Rules,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            staging: BufferSettings {
                capacity: DEFAULT_STAGING_CAPACITY,
            },
            output: BufferSettings {
                capacity: DEFAULT_OUTPUT_CAPACITY,
            },
            rules: Rules::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BufferSettings {
    pub capacity: usize,
}

/// What Commit does with staged text other than a lone held-over "n".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommitPolicy {
    /// Force the leftovers through as literal units.
    PassThrough,
    /// Leave them staged for further editing.
    Retain,
}

/// Rule set driving the reduction loop.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Rules {
    pub gemination: String,
    pub nasal_continuations: String,
    pub commit: CommitPolicy,
    #[serde(default = "default_true")]
    pub fold_uppercase: bool,
    #[serde(default = "default_true")]
    pub pass_through_unmatched: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            gemination: "kstnhmyrwgzdbpvcfj".to_string(),
            nasal_continuations: "aiueoy'".to_string(),
            commit: CommitPolicy::PassThrough,
            fold_uppercase: true,
            pass_through_unmatched: true,
        }
    }
}

impl Rules {
    /// Whether a doubled `c` emits っ. The nasal consonant never does.
    pub fn geminates(&self, c: char) -> bool {
        c != NASAL && self.gemination.contains(c)
    }

    /// Whether `c` after a staged "n" keeps the "n" open as a syllable head.
    pub fn continues_nasal(&self, c: char) -> bool {
        self.nasal_continuations.contains(c)
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_range_usize {
        ($section:ident . $field:ident, $min:expr, $max:expr) => {
            let v = s.$section.$field;
            if !($min..=$max).contains(&v) {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: format!("must be in {}..={}, got {v}", $min, $max),
                });
            }
        };
    }

    check_range_usize!(staging.capacity, 1, MAX_CAPACITY);
    check_range_usize!(output.capacity, 1, MAX_CAPACITY);

    if s.rules.gemination.is_empty() {
        return Err(SettingsError::InvalidValue {
            field: "rules.gemination".to_string(),
            reason: "must list at least one consonant".to_string(),
        });
    }
    if !s.rules.gemination.chars().all(|c| c.is_ascii_lowercase()) {
        return Err(SettingsError::InvalidValue {
            field: "rules.gemination".to_string(),
            reason: "must contain only lowercase ASCII letters".to_string(),
        });
    }
    if !s
        .rules
        .nasal_continuations
        .chars()
        .all(|c| c.is_ascii_graphic())
    {
        return Err(SettingsError::InvalidValue {
            field: "rules.nasal_continuations".to_string(),
            reason: "must contain only printable ASCII".to_string(),
        });
    }

    Ok(())
}
