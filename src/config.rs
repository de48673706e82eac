use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::CerviError;

pub const CONFIG_FILE: &str = "config.toml";
pub const ENV_PREFIX: &str = "CERVIHOPE_";

/// Diagnostic classes reported by the cervical-cytology model.
/// Order here is irrelevant; the label table sorts them before lookup.
pub const DEFAULT_LABELS: [&str; 4] = [
    "Negative for Intraepithelial malignancy",
    "Low squamous intra-epithelial lesion",
    "High squamous intra-epithelial lesion",
    "Squamous cell carcinoma",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub basic: BasicConfig,
    pub storage: StorageConfig,
    pub prediction: PredictionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicConfig {
    pub listen_addr: String,
    pub loglevel: String,
    /// Secret used to derive the private cookie key. Needs at least 64 bytes.
    pub cookie_secret: Option<String>,
    pub insecure_cookie: bool,
    pub secrets_path: PathBuf,
    /// Picture shown on the About view.
    pub about_image_url: Option<Url>,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8501".to_string(),
            loglevel: "info".to_string(),
            cookie_secret: None,
            insecure_cookie: false,
            secrets_path: PathBuf::from("secrets.toml"),
            about_image_url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub records_path: PathBuf,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            records_path: PathBuf::from("patient_records.json"),
            upload_dir: PathBuf::from("uploaded_images"),
            max_upload_bytes: 20 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub proxy: Option<Url>,
    pub labels: Vec<String>,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 5,
            request_timeout_secs: 60,
            proxy: None,
            labels: DEFAULT_LABELS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Config {
    /// Defaults, then `config.toml` if present, then `CERVIHOPE_*` env vars
    /// (nested keys separated by `__`, e.g. `CERVIHOPE_STORAGE__UPLOAD_DIR`).
    pub fn load() -> Result<Self, CerviError> {
        Self::from_figment(
            Figment::from(Serialized::defaults(Config::default()))
                .merge(Toml::file(CONFIG_FILE))
                .merge(Env::prefixed(ENV_PREFIX).split("__")),
        )
    }

    pub fn from_figment(figment: Figment) -> Result<Self, CerviError> {
        Ok(figment.extract()?)
    }
}
