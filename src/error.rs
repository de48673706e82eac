use axum::{
    http::StatusCode,
    response::{Html, IntoResponse},
};
use thiserror::Error as ThisError;

use crate::views;

#[derive(Debug, ThisError)]
pub enum CerviError {
    #[error("Invalid username or password.")]
    InvalidCredentials,

    #[error("HTTP request error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Prediction service returned status {0}")]
    UpstreamStatus(StatusCode),

    #[error("Malformed prediction response: {0}")]
    MalformedResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Missing secrets: {0}")]
    MissingSecrets(String),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl CerviError {
    /// Message safe to show inline on a page.
    pub fn user_message(&self) -> String {
        match self {
            CerviError::InvalidCredentials => self.to_string(),
            CerviError::Network(_) | CerviError::UpstreamStatus(_) => {
                "The prediction service could not be reached. Please try again.".to_string()
            }
            CerviError::MalformedResponse(_) | CerviError::Json(_) => {
                "The prediction service returned an unexpected response.".to_string()
            }
            CerviError::Image(_) => "The uploaded file could not be read as an image.".to_string(),
            CerviError::UnsupportedFileType(_) => {
                "Only jpg, jpeg and png images are accepted.".to_string()
            }
            CerviError::Io(_)
            | CerviError::Config(_)
            | CerviError::MissingSecrets(_)
            | CerviError::Task(_) => "An internal error occurred.".to_string(),
        }
    }
}

impl IntoResponse for CerviError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            CerviError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            CerviError::UnsupportedFileType(_) | CerviError::Image(_) => StatusCode::BAD_REQUEST,
            CerviError::Network(_)
            | CerviError::UpstreamStatus(_)
            | CerviError::MalformedResponse(_)
            | CerviError::Json(_) => StatusCode::BAD_GATEWAY,
            CerviError::Io(_)
            | CerviError::Config(_)
            | CerviError::MissingSecrets(_)
            | CerviError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Html(views::error_page(&self.user_message()))).into_response()
    }
}
