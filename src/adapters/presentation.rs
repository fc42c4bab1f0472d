use crate::domain::model::{Diagnosis, DiagnosisStatus};
use crate::utils::error::{CropCareError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const UNRECOGNIZED_DISPLAY: &str = "Unrecognized Image ⚠️";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = CropCareError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(CropCareError::InvalidConfigValueError {
                field: "output.format".to_string(),
                value: other.to_string(),
                reason: "Valid formats: text, json".to_string(),
            }),
        }
    }
}

/// What gets printed for one analysis.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosisReport<'a> {
    pub image: &'a str,
    pub analyzed_at: DateTime<Utc>,
    pub confidence_percent: i64,
    pub diagnosis: &'a Diagnosis,
}

impl<'a> DiagnosisReport<'a> {
    pub fn new(image: &'a str, diagnosis: &'a Diagnosis) -> Self {
        Self {
            image,
            analyzed_at: Utc::now(),
            confidence_percent: confidence_percent(diagnosis.confidence),
            diagnosis,
        }
    }
}

/// Confidence as a whole percentage, for display only.
pub fn confidence_percent(confidence: f64) -> i64 {
    (confidence * 100.0).round() as i64
}

pub fn display_label(diagnosis: &Diagnosis) -> &str {
    if diagnosis.status == DiagnosisStatus::Unrecognized {
        UNRECOGNIZED_DISPLAY
    } else {
        &diagnosis.label
    }
}

pub fn render_text(diagnosis: &Diagnosis) -> String {
    format!(
        "🧾 Analysis Result\nDisease: {}\nConfidence: {}%\nSymptoms: {}\nSolution: {}",
        display_label(diagnosis),
        confidence_percent(diagnosis.confidence),
        diagnosis.symptoms,
        diagnosis.treatment
    )
}

pub fn render_json(report: &DiagnosisReport<'_>) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn render(format: OutputFormat, image: &str, diagnosis: &Diagnosis) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(diagnosis)),
        OutputFormat::Json => render_json(&DiagnosisReport::new(image, diagnosis)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resolver::resolve;
    use crate::domain::model::{Prediction, PredictionSet};

    #[test]
    fn test_confidence_percent_rounding() {
        assert_eq!(confidence_percent(0.92), 92);
        assert_eq!(confidence_percent(0.555), 56);
        assert_eq!(confidence_percent(0.0), 0);
        assert_eq!(confidence_percent(0.004), 0);
        assert_eq!(confidence_percent(1.0), 100);
    }

    #[test]
    fn test_render_text_recognized() {
        let set = PredictionSet::new(vec![Prediction::new("Potato___Late_blight", 0.92)]);
        let text = render_text(&resolve(Some(&set)));

        assert!(text.contains("Disease: Potato___Late_blight"));
        assert!(text.contains("Confidence: 92%"));
        assert!(text.contains("Solution: Spray with fungicides regularly"));
    }

    #[test]
    fn test_render_text_unrecognized() {
        let text = render_text(&resolve(None));
        assert!(text.contains("Disease: Unrecognized Image ⚠️"));
        assert!(text.contains("Confidence: 0%"));
    }

    #[test]
    fn test_confident_class_named_unrecognized_shown_as_is() {
        let set = PredictionSet::new(vec![Prediction::new("unrecognized", 0.9)]);
        let diagnosis = resolve(Some(&set));

        assert_eq!(diagnosis.status, DiagnosisStatus::Uncatalogued);
        assert_eq!(display_label(&diagnosis), "unrecognized");
        assert!(render_text(&diagnosis).contains("Disease: unrecognized"));
    }

    #[test]
    fn test_render_json_report() {
        let diagnosis = resolve(None);
        let json = render(OutputFormat::Json, "leaf.jpg", &diagnosis).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["image"], "leaf.jpg");
        assert_eq!(value["confidence_percent"], 0);
        assert_eq!(value["diagnosis"]["label"], "unrecognized");
        assert_eq!(value["diagnosis"]["status"], "unrecognized");
        assert!(value["analyzed_at"].is_string());
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
