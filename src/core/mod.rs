pub mod analyzer;
pub mod disease_table;
pub mod resolver;
pub mod session;

pub use crate::domain::model::{Diagnosis, DiagnosisStatus, Prediction, PredictionSet};
pub use crate::domain::ports::{ImageSource, InferenceClient};
pub use crate::utils::error::Result;
