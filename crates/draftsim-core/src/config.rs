// Configuration loading and parsing (draft.toml, catalogue.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::draft::{BoardLayout, DraftRules};

/// Upper bound on bans or picks per side.
pub const MAX_SLOTS_PER_KIND: usize = 10;

const DRAFT_FILE: &str = "draft.toml";
const CATALOGUE_FILE: &str = "catalogue.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub board: BoardLayout,
    pub rules: DraftRules,
    pub catalogue: CatalogueConfig,
}

// ---------------------------------------------------------------------------
// draft.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
struct DraftFile {
    board: BoardSection,
    #[serde(default)]
    rules: DraftRules,
}

#[derive(Debug, Clone, Deserialize)]
struct BoardSection {
    ban_slots: usize,
    pick_slots: usize,
}

// ---------------------------------------------------------------------------
// catalogue.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
struct CatalogueFile {
    catalogue: SourceSection,
    #[serde(default)]
    ddragon: DdragonConfig,
    #[serde(default)]
    file: FileConfig,
}

#[derive(Debug, Clone, Deserialize)]
struct SourceSection {
    source: CatalogueSourceKind,
}

/// Where the entry pool comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogueSourceKind {
    /// League of Legends Data Dragon CDN.
    Ddragon,
    /// A local CSV or JSON file.
    File,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DdragonConfig {
    pub base_url: String,
    /// A concrete patch such as "14.1.1", or "latest".
    pub version: String,
    pub locale: String,
    pub timeout_secs: u64,
}

impl Default for DdragonConfig {
    fn default() -> Self {
        DdragonConfig {
            base_url: "https://ddragon.leagueoflegends.com".into(),
            version: "latest".into(),
            locale: "en_US".into(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub path: String,
}

impl Default for FileConfig {
    fn default() -> Self {
        FileConfig {
            path: "data/catalogue.csv".into(),
        }
    }
}

/// The public catalogue config assembled from catalogue.toml.
#[derive(Debug, Clone)]
pub struct CatalogueConfig {
    pub source: CatalogueSourceKind,
    pub ddragon: DdragonConfig,
    pub file: FileConfig,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/draft.toml` and
/// `config/catalogue.toml` relative to `base_dir`.
///
/// Does not copy defaults; prefer `load_config()` for normal startup.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    let draft: DraftFile = read_toml(&config_dir.join(DRAFT_FILE))?;
    let catalogue: CatalogueFile = read_toml(&config_dir.join(CATALOGUE_FILE))?;

    let config = Config {
        board: BoardLayout::new(draft.board.ban_slots, draft.board.pick_slots),
        rules: draft.rules,
        catalogue: CatalogueConfig {
            source: catalogue.catalogue.source,
            ddragon: catalogue.ddragon,
            file: catalogue.file,
        },
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    let mut copied = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }

        let target = config_dir.join(file_name);
        if copy_if_missing(&path, &target)? {
            copied.push(target);
        }
    }

    Ok(copied)
}

/// Loads config relative to the current working directory, copying defaults
/// first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_toml<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Copy `src` to `dest` unless `dest` already exists. Returns whether a copy
/// happened.
fn copy_if_missing(src: &Path, dest: &Path) -> Result<bool, ConfigError> {
    match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(dest)
    {
        Ok(mut out) => {
            let content = std::fs::read(src).map_err(|e| ConfigError::DefaultsCopyError {
                message: format!("failed to read {}: {e}", src.display()),
            })?;
            std::io::Write::write_all(&mut out, &content).map_err(|e| {
                ConfigError::DefaultsCopyError {
                    message: format!("failed to write {}: {e}", dest.display()),
                }
            })?;
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(ConfigError::DefaultsCopyError {
            message: format!("failed to create {}: {e}", dest.display()),
        }),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let slot_fields = [
        ("board.ban_slots", config.board.bans),
        ("board.pick_slots", config.board.picks),
    ];
    for (field, val) in slot_fields {
        if !(1..=MAX_SLOTS_PER_KIND).contains(&val) {
            return Err(ConfigError::ValidationError {
                field: field.into(),
                message: format!("must be between 1 and {MAX_SLOTS_PER_KIND}, got {val}"),
            });
        }
    }

    match config.catalogue.source {
        CatalogueSourceKind::Ddragon => {
            let dd = &config.catalogue.ddragon;
            let text_fields = [
                ("ddragon.base_url", &dd.base_url),
                ("ddragon.version", &dd.version),
                ("ddragon.locale", &dd.locale),
            ];
            for (field, val) in text_fields {
                if val.trim().is_empty() {
                    return Err(ConfigError::ValidationError {
                        field: field.into(),
                        message: "must not be empty".into(),
                    });
                }
            }
            if dd.timeout_secs == 0 {
                return Err(ConfigError::ValidationError {
                    field: "ddragon.timeout_secs".into(),
                    message: "must be > 0".into(),
                });
            }
        }
        CatalogueSourceKind::File => {
            if config.catalogue.file.path.trim().is_empty() {
                return Err(ConfigError::ValidationError {
                    field: "file.path".into(),
                    message: "must not be empty when source = \"file\"".into(),
                });
            }
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
