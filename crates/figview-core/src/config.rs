//! Viewer configuration (TOML).
//!
//! Without a file the viewer runs on `ViewerConfig::canonical`, which serves
//! every category file by file from the published repository. A file can
//! move any category to a remote or local bundle, change templates and
//! replace the captions.
//!
//! ```toml
//! workbook = "https://.../Scope of the study.xlsx"
//! timeout_secs = 30
//!
//! [stores.battery_comparison]
//! kind = "local_bundle"
//! path = "bundles/Battery_images.tar.gz"
//! template = "Fig_BatteryComparison_{model} - {scenario}.png"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::store::join_url;
use crate::domain::{CaptionTable, Catalog, Location};

pub const DEFAULT_BASE_URL: &str =
    "https://raw.githubusercontent.com/Pelotte/App_IAM_Metal_Demand_Opti_Tech_MS/main";

/// Name of the workbook holding the `model` and `scenario` sheets.
pub const WORKBOOK_NAME: &str = "Scope of the study.xlsx";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Workbook with the selection lists, remote or local.
    pub workbook: Location,

    /// HTTP timeout. None means wait as long as the server takes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    #[serde(default)]
    pub stores: Catalog,

    #[serde(default = "CaptionTable::standard")]
    pub captions: CaptionTable,
}

impl ViewerConfig {
    /// Canonical catalog and workbook under `base_url`.
    pub fn canonical(base_url: &str) -> Self {
        Self {
            workbook: Location::Remote(join_url(base_url, WORKBOOK_NAME)),
            timeout_secs: None,
            stores: Catalog::canonical(base_url),
            captions: CaptionTable::standard(),
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self::canonical(DEFAULT_BASE_URL)
    }
}
