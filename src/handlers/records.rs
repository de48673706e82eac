use std::path::PathBuf;

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};
use tracing::warn;

use crate::error::CerviError;
use crate::middleware::session::SessionJar;
use crate::router::AppState;

/// GET /records/{index}/image -> the stored image behind one of the
/// caller's own records.
pub async fn record_image(
    State(state): State<AppState>,
    jar: SessionJar,
    Path(index): Path<usize>,
) -> Result<Response, CerviError> {
    let Some(username) = jar.session.current_username() else {
        return Ok(Redirect::to("/").into_response());
    };

    let stored_path = {
        let store = state.records.lock().await;
        match store.records_for(username).get(index) {
            Some(record) => PathBuf::from(&record.stored_image_path),
            None => return Ok(StatusCode::NOT_FOUND.into_response()),
        }
    };

    let bytes = match state.images.read(&stored_path).await {
        Ok(bytes) => bytes,
        Err(CerviError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %stored_path.display(), "stored image missing on disk");
            return Ok(StatusCode::NOT_FOUND.into_response());
        }
        Err(e) => return Err(e),
    };
    let mime = mime_guess::from_path(&stored_path).first_or_octet_stream();

    Ok(([(header::CONTENT_TYPE, mime.to_string())], bytes).into_response())
}
