use std::sync::Arc;

use axum::{
    Router,
    extract::{DefaultBodyLimit, FromRef},
    routing::{get, post},
};
use axum_extra::extract::cookie::Key;
use tokio::sync::Mutex;
use tracing::warn;

use crate::api::prediction_api::PredictionClient;
use crate::config::Config;
use crate::db::{ImageStore, RecordStore};
use crate::error::CerviError;
use crate::handlers::{analysis, auth, pages, records};
use crate::service::classifier::LabelTable;
use crate::service::credentials::CredentialStore;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<CredentialStore>,
    pub records: Arc<Mutex<RecordStore>>,
    pub images: ImageStore,
    pub predictor: PredictionClient,
    pub about_image_url: Option<Arc<str>>,
    pub cookie_secure: bool,
    key: Key,
}

impl AppState {
    pub fn new(
        cfg: &Config,
        credentials: CredentialStore,
        records: RecordStore,
    ) -> Result<Self, CerviError> {
        let predictor = PredictionClient::new(
            credentials.endpoint_url().clone(),
            LabelTable::new(cfg.prediction.labels.clone()),
            &cfg.prediction,
        )?;
        Ok(Self {
            credentials: Arc::new(credentials),
            records: Arc::new(Mutex::new(records)),
            images: ImageStore::new(cfg.storage.upload_dir.clone()),
            predictor,
            about_image_url: cfg.basic.about_image_url.as_ref().map(|u| Arc::from(u.as_str())),
            cookie_secure: !cfg.basic.insecure_cookie,
            key: cookie_key(cfg.basic.cookie_secret.as_deref()),
        })
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

/// `Key::from` panics below 64 bytes, so short secrets fall back to a random key.
fn cookie_key(secret: Option<&str>) -> Key {
    match secret {
        Some(s) if s.len() >= 64 => Key::from(s.as_bytes()),
        Some(_) => {
            warn!("cookie_secret shorter than 64 bytes; using a random key");
            Key::generate()
        }
        None => {
            warn!("no cookie_secret configured; sessions will not survive a restart");
            Key::generate()
        }
    }
}

pub fn cervihope_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/navigate", post(pages::navigate))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route(
            "/analysis",
            post(analysis::submit_analysis).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/records/{index}/image", get(records::record_image))
        .with_state(state)
}
