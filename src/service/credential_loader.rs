use std::collections::HashMap;
use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::Deserialize;
use tracing::{info, warn};
use url::Url;

use crate::error::CerviError;
use crate::service::credentials::CredentialStore;

pub const SECRETS_ENV_PREFIX: &str = "CERVIHOPE_SECRETS_";

#[derive(Debug, Default, Deserialize)]
struct RawSecrets {
    endpoint_url: Option<Url>,
    #[serde(default)]
    users: HashMap<String, String>,
}

/// Load the credential store from a secrets TOML file, with
/// `CERVIHOPE_SECRETS_*` environment overrides.
pub fn load_secrets(path: &Path) -> Result<CredentialStore, CerviError> {
    if !path.exists() {
        warn!(path = %path.display(), "secrets file not found; relying on environment");
    }
    from_figment(
        Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed(SECRETS_ENV_PREFIX).split("__")),
    )
}

fn from_figment(figment: Figment) -> Result<CredentialStore, CerviError> {
    let raw: RawSecrets = figment.extract()?;

    let endpoint_url = raw
        .endpoint_url
        .ok_or_else(|| CerviError::MissingSecrets("endpoint_url".to_string()))?;
    if raw.users.is_empty() {
        return Err(CerviError::MissingSecrets("users".to_string()));
    }

    info!(
        users = raw.users.len(),
        endpoint = %endpoint_url,
        "credential store loaded"
    );
    Ok(CredentialStore::new(raw.users, endpoint_url))
}
