pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{
    image_source::LocalImageSource,
    inference::{HttpInferenceClient, InferenceSettings},
    presentation::OutputFormat,
};
pub use crate::config::AppConfig;
pub use crate::core::{
    analyzer::DiagnosisEngine,
    resolver::{resolve, CONFIDENCE_THRESHOLD},
    session::AnalysisSession,
};
pub use crate::domain::model::{Diagnosis, DiagnosisStatus, ImageRef, Prediction, PredictionSet};
pub use crate::utils::error::{CropCareError, Result};
