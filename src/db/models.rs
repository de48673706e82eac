use serde::{Deserialize, Serialize};

use crate::types::prediction::Prediction;

/// One analysed sample, owned by the user who submitted it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientRecord {
    pub patient_name: String,
    pub image_filename: String,
    pub prediction_label: String,
    pub confidence_score: f64,
    pub stored_image_path: String,
}

impl PatientRecord {
    pub fn new(
        patient_name: impl Into<String>,
        image_filename: impl Into<String>,
        prediction: &Prediction,
        stored_image_path: impl Into<String>,
    ) -> Self {
        Self {
            patient_name: patient_name.into(),
            image_filename: image_filename.into(),
            prediction_label: prediction.label.clone(),
            confidence_score: prediction.confidence,
            stored_image_path: stored_image_path.into(),
        }
    }
}
