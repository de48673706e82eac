use serde::{Deserialize, Serialize};

use crate::error::CerviError;
use crate::service::classifier::LabelTable;

/// JSON body returned by the remote prediction service.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PredictionResponse {
    pub predicted_label: usize,
    pub score: Vec<f64>,
}

/// A classified image as shown to the user and persisted in a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label_index: usize,
    pub label: String,
    /// Maximum of the score vector, whichever index it sits at.
    pub confidence: f64,
}

impl PredictionResponse {
    pub fn into_prediction(self, labels: &LabelTable) -> Result<Prediction, CerviError> {
        let label = labels.label(self.predicted_label).ok_or_else(|| {
            CerviError::MalformedResponse(format!(
                "predicted_label {} outside label table of {}",
                self.predicted_label,
                labels.len()
            ))
        })?;
        let confidence = self
            .score
            .iter()
            .copied()
            .reduce(f64::max)
            .ok_or_else(|| CerviError::MalformedResponse("empty score vector".to_string()))?;

        Ok(Prediction {
            label_index: self.predicted_label,
            label: label.to_string(),
            confidence,
        })
    }
}
