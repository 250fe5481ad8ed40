// Catalogue sources: Data Dragon over HTTP, or a local CSV/JSON file.
//
// Loading happens once at startup, before the app and TUI tasks start. A
// failure is reported to the caller as a `LoadError`; there is no retry.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};

use draftsim_core::catalogue::{self, AssetBase, Catalogue, CatalogueError};
use draftsim_core::config::{CatalogueConfig, CatalogueSourceKind, DdragonConfig};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported catalogue file {path}: expected .csv or .json")]
    Format { path: PathBuf },

    #[error(transparent)]
    Catalogue(#[from] CatalogueError),
}

// ---------------------------------------------------------------------------
// CatalogueSource trait
// ---------------------------------------------------------------------------

/// Something the entry pool can be loaded from.
#[async_trait]
pub trait CatalogueSource: Send + Sync {
    async fn load(&self) -> Result<Catalogue, LoadError>;

    /// Human-readable description for logs.
    fn describe(&self) -> String;
}

/// Build the source selected by `catalogue.toml`.
pub fn source_from_config(
    config: &CatalogueConfig,
) -> Result<Box<dyn CatalogueSource>, LoadError> {
    match config.source {
        CatalogueSourceKind::Ddragon => Ok(Box::new(DdragonSource::new(&config.ddragon)?)),
        CatalogueSourceKind::File => Ok(Box::new(FileSource::new(&config.file.path))),
    }
}

// ---------------------------------------------------------------------------
// Data Dragon
// ---------------------------------------------------------------------------

/// Fetches champions from the Data Dragon CDN.
pub struct DdragonSource {
    http: reqwest::Client,
    base_url: String,
    version: String,
    locale: String,
}

impl DdragonSource {
    pub fn new(config: &DdragonConfig) -> Result<Self, LoadError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(LoadError::Client)?;
        Ok(DdragonSource {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            version: config.version.clone(),
            locale: config.locale.clone(),
        })
    }

    pub fn versions_url(&self) -> String {
        format!("{}/api/versions.json", self.base_url)
    }

    pub fn champions_url(&self, version: &str) -> String {
        format!(
            "{}/cdn/{}/data/{}/champion.json",
            self.base_url, version, self.locale
        )
    }

    pub fn image_prefix(&self, version: &str) -> String {
        format!("{}/cdn/{}/img/champion", self.base_url, version)
    }

    /// The configured version, or the newest published one for "latest".
    async fn resolve_version(&self) -> Result<String, LoadError> {
        if !self.version.eq_ignore_ascii_case("latest") {
            return Ok(self.version.clone());
        }
        let body = self.get_text(&self.versions_url()).await?;
        let version = catalogue::parse_ddragon_versions(&body)?;
        debug!("Resolved latest Data Dragon version: {}", version);
        Ok(version)
    }

    async fn get_text(&self, url: &str) -> Result<String, LoadError> {
        let http_err = |source| LoadError::Http {
            url: url.to_string(),
            source,
        };
        let resp = self.http.get(url).send().await.map_err(http_err)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status,
            });
        }
        resp.text().await.map_err(http_err)
    }
}

#[async_trait]
impl CatalogueSource for DdragonSource {
    async fn load(&self) -> Result<Catalogue, LoadError> {
        let version = self.resolve_version().await?;
        let body = self.get_text(&self.champions_url(&version)).await?;
        let entries = catalogue::parse_ddragon_champions(&body)?;
        let catalogue = Catalogue::new(entries)?.with_assets(AssetBase {
            prefix: self.image_prefix(&version),
            version,
        });
        info!(
            "Loaded {} champions from Data Dragon {}",
            catalogue.len(),
            catalogue.version().unwrap_or("?")
        );
        Ok(catalogue)
    }

    fn describe(&self) -> String {
        format!(
            "Data Dragon at {} (version {}, locale {})",
            self.base_url, self.version, self.locale
        )
    }
}

// ---------------------------------------------------------------------------
// Local file
// ---------------------------------------------------------------------------

/// Reads a `.csv` or `.json` catalogue from disk.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        FileSource {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogueSource for FileSource {
    async fn load(&self) -> Result<Catalogue, LoadError> {
        let ext = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let is_csv = match ext.as_deref() {
            Some("csv") => true,
            Some("json") => false,
            _ => {
                return Err(LoadError::Format {
                    path: self.path.clone(),
                })
            }
        };

        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: self.path.clone(),
                source,
            })?;
        let entries = if is_csv {
            catalogue::parse_csv(text.as_bytes())?
        } else {
            catalogue::parse_json(&text)?
        };
        let catalogue = Catalogue::new(entries)?;
        info!(
            "Loaded {} entries from {}",
            catalogue.len(),
            self.path.display()
        );
        Ok(catalogue)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
