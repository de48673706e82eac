use axum::{
    extract::{FromRequest, Multipart, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::debug;

/// Raw Image Analysis form as posted by the browser.
#[derive(Debug, Default)]
pub struct AnalysisUpload {
    pub patient_name: String,
    pub image: Option<UploadedImage>,
}

#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// A form that has both a patient name and a non-empty image.
#[derive(Debug, Clone)]
pub struct AnalysisSubmission {
    pub patient_name: String,
    pub image: UploadedImage,
}

impl AnalysisUpload {
    /// `None` when the name is blank or no file was chosen; such submissions
    /// are ignored without an error.
    pub fn into_submission(self) -> Option<AnalysisSubmission> {
        let patient_name = self.patient_name.trim().to_string();
        let image = self.image.filter(|img| !img.bytes.is_empty())?;
        if patient_name.is_empty() {
            return None;
        }
        Some(AnalysisSubmission {
            patient_name,
            image,
        })
    }
}

impl<S> FromRequest<S> for AnalysisUpload
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        let mut upload = AnalysisUpload::default();
        while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "patient_name" => {
                    upload.patient_name = field.text().await.map_err(bad_multipart)?;
                }
                "image" => {
                    let filename = field.file_name().unwrap_or("").to_string();
                    let bytes = field.bytes().await.map_err(bad_multipart)?;
                    if !filename.is_empty() {
                        upload.image = Some(UploadedImage {
                            filename,
                            bytes: bytes.to_vec(),
                        });
                    }
                }
                other => debug!(field = %other, "ignoring unexpected multipart field"),
            }
        }
        Ok(upload)
    }
}

fn bad_multipart(err: axum::extract::multipart::MultipartError) -> Response {
    let status = err.status();
    let status = if status.is_client_error() {
        status
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, err.body_text()).into_response()
}
