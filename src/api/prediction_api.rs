use std::io::Cursor;
use std::time::Duration;

use base64::Engine;
use image::ImageOutputFormat;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::PredictionConfig;
use crate::error::CerviError;
use crate::service::classifier::LabelTable;
use crate::types::prediction::{Prediction, PredictionResponse};

const JPEG_QUALITY: u8 = 90;

/// Client for the remote cervical-cell classification service.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    client: reqwest::Client,
    endpoint: Url,
    labels: LabelTable,
}

impl PredictionClient {
    pub fn new(
        endpoint: Url,
        labels: LabelTable,
        cfg: &PredictionConfig,
    ) -> Result<Self, CerviError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("cervihope/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
            .timeout(Duration::from_secs(cfg.request_timeout_secs));
        if let Some(proxy_url) = cfg.proxy.as_ref() {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint,
            labels,
        })
    }

    /// Re-encode `image_bytes` as JPEG, POST it base64-encoded, and map the
    /// answer onto the label table. One attempt, no retries.
    pub async fn classify(&self, image_bytes: &[u8]) -> Result<Prediction, CerviError> {
        let owned = image_bytes.to_vec();
        let payload = tokio::task::spawn_blocking(move || encode_image(&owned)).await??;
        debug!(
            endpoint = %self.endpoint,
            payload_len = payload.len(),
            "sending prediction request"
        );

        let resp = self
            .client
            .post(self.endpoint.clone())
            .body(payload)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            warn!(endpoint = %self.endpoint, %status, "prediction service rejected request");
            return Err(CerviError::UpstreamStatus(status));
        }

        let body = resp.bytes().await?;
        let parsed: PredictionResponse = serde_json::from_slice(&body)
            .map_err(|e| CerviError::MalformedResponse(e.to_string()))?;
        let prediction = parsed.into_prediction(&self.labels)?;

        info!(
            label = %prediction.label,
            confidence = prediction.confidence,
            "prediction received"
        );
        Ok(prediction)
    }
}

/// Decode any supported image, flatten to RGB, encode as JPEG, then base64.
pub fn encode_image(image_bytes: &[u8]) -> Result<String, CerviError> {
    let img = image::load_from_memory(image_bytes)?;
    let rgb = image::DynamicImage::ImageRgb8(img.to_rgb8());

    let mut cursor = Cursor::new(Vec::new());
    rgb.write_to(&mut cursor, ImageOutputFormat::Jpeg(JPEG_QUALITY))?;

    Ok(base64::engine::general_purpose::STANDARD.encode(cursor.into_inner()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes() -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(8, 8, image::Rgba([120u8, 40, 200, 255]));
        let mut buf = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut buf, ImageOutputFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    #[test]
    fn png_is_reencoded_as_jpeg() {
        let encoded = encode_image(&png_bytes()).expect("encode");
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .unwrap();
        assert_eq!(&decoded[..2], &[0xFF, 0xD8]);
        assert_eq!(
            image::guess_format(&decoded).unwrap(),
            image::ImageFormat::Jpeg
        );
    }

    #[test]
    fn garbage_is_an_image_error() {
        assert!(matches!(
            encode_image(b"definitely not an image"),
            Err(CerviError::Image(_))
        ));
    }
}
