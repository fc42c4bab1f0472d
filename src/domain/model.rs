use serde::{Deserialize, Serialize};

/// Label reported when no prediction is confident enough.
pub const UNRECOGNIZED_LABEL: &str = "unrecognized";

/// Key of the fallback entry in the disease table.
pub const SENTINEL_CLASS: &str = "Unrecognized";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(rename = "class")]
    pub class_label: String,
    pub confidence: f64,
}

impl Prediction {
    pub fn new(class_label: impl Into<String>, confidence: f64) -> Self {
        Self {
            class_label: class_label.into(),
            confidence,
        }
    }
}

/// Candidates returned by the service for one image, in response order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionSet {
    pub predictions: Vec<Prediction>,
}

impl PredictionSet {
    pub fn new(predictions: Vec<Prediction>) -> Self {
        Self { predictions }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Prediction> {
        self.predictions.iter()
    }
}

impl From<Vec<Prediction>> for PredictionSet {
    fn from(predictions: Vec<Prediction>) -> Self {
        Self::new(predictions)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiseaseRecord {
    pub symptoms: &'static str,
    pub treatment: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosisStatus {
    /// Confident prediction with a table entry.
    Recognized,
    /// Confident prediction whose label has no table entry; sentinel text is used.
    Uncatalogued,
    /// No predictions, or the best one is at or below the threshold.
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub label: String,
    pub confidence: f64,
    pub symptoms: String,
    pub treatment: String,
    pub status: DiagnosisStatus,
}

impl Diagnosis {
    pub fn is_recognized(&self) -> bool {
        self.status != DiagnosisStatus::Unrecognized
    }
}

/// Where an image comes from: a local path, optionally with the bytes already
/// base64-encoded by whatever picked it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub uri: String,
    pub inline_base64: Option<String>,
}

impl ImageRef {
    pub fn from_path(path: impl Into<String>) -> Self {
        Self {
            uri: path.into(),
            inline_base64: None,
        }
    }

    pub fn with_inline_base64(path: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            uri: path.into(),
            inline_base64: Some(data.into()),
        }
    }
}

/// Image payload ready for the inference request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub source: ImageRef,
    pub base64: String,
    pub byte_len: usize,
}
