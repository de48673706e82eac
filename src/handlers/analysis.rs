use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tracing::{debug, info, warn};

use super::render_page;
use crate::db::PatientRecord;
use crate::db::images::{ensure_allowed_extension, sanitize_filename};
use crate::error::CerviError;
use crate::middleware::session::SessionJar;
use crate::middleware::upload::{AnalysisSubmission, AnalysisUpload};
use crate::router::AppState;
use crate::types::session::View;
use crate::views::Notice;

/// POST /analysis -> classify the image and append a record for the user.
pub async fn submit_analysis(
    State(state): State<AppState>,
    jar: SessionJar,
    upload: AnalysisUpload,
) -> Response {
    let mut session = jar.session.clone();
    let Some(username) = session.current_username().map(str::to_owned) else {
        return (jar.commit(&session), Redirect::to("/")).into_response();
    };
    session.select(View::ImageAnalysis);

    let notice = match upload.into_submission() {
        None => {
            debug!(username = %username, "incomplete analysis form ignored");
            None
        }
        Some(submission) => match analyse(&state, &username, submission).await {
            Ok(record) => Some(Notice::Success(format!(
                "Prediction for {}: {} (confidence {:.2}%)",
                record.patient_name,
                record.prediction_label,
                record.confidence_score * 100.0
            ))),
            Err(err) => {
                warn!(username = %username, error = %err, "image analysis failed");
                Some(Notice::Error(err.user_message()))
            }
        },
    };

    let page = render_page(&state, &session, notice).await;
    (jar.commit(&session), page).into_response()
}

async fn analyse(
    state: &AppState,
    username: &str,
    submission: AnalysisSubmission,
) -> Result<PatientRecord, CerviError> {
    let AnalysisSubmission {
        patient_name,
        image,
    } = submission;
    ensure_allowed_extension(&image.filename)?;

    let prediction = state.predictor.classify(&image.bytes).await?;
    let stored = state.images.save(&image.filename, &image.bytes).await?;

    let record = PatientRecord::new(
        patient_name,
        sanitize_filename(&image.filename),
        &prediction,
        stored.to_string_lossy(),
    );
    state
        .records
        .lock()
        .await
        .append_record(username, record.clone())
        .await?;

    info!(
        username = %username,
        label = %record.prediction_label,
        "patient record stored"
    );
    Ok(record)
}
