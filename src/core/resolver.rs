use crate::core::disease_table::DiseaseTable;
use crate::domain::model::{
    Diagnosis, DiagnosisStatus, DiseaseRecord, Prediction, PredictionSet, UNRECOGNIZED_LABEL,
};

/// A prediction counts as recognized only when strictly above this value.
pub const CONFIDENCE_THRESHOLD: f64 = 0.5;

/// Resolves against the built-in table and the fixed threshold.
pub fn resolve(predictions: Option<&PredictionSet>) -> Diagnosis {
    resolve_with(predictions, CONFIDENCE_THRESHOLD, DiseaseTable::builtin())
}

pub fn resolve_with(
    predictions: Option<&PredictionSet>,
    threshold: f64,
    table: &DiseaseTable,
) -> Diagnosis {
    let Some(best) = predictions.and_then(best_prediction) else {
        tracing::debug!("No predictions returned, resolving to unrecognized");
        return unrecognized(0.0, table);
    };

    if best.confidence > threshold {
        let (record, status) = match table.get(&best.class_label) {
            Some(record) => (record, DiagnosisStatus::Recognized),
            None => {
                tracing::warn!(
                    "Class '{}' is not in the disease table, using fallback text",
                    best.class_label
                );
                (table.sentinel(), DiagnosisStatus::Uncatalogued)
            }
        };
        build(best.class_label.clone(), best.confidence, record, status)
    } else {
        tracing::debug!(
            "Best prediction '{}' at {} is not above threshold {}",
            best.class_label,
            best.confidence,
            threshold
        );
        unrecognized(best.confidence, table)
    }
}

/// Highest-confidence prediction. On ties the earliest one wins, since a later
/// candidate only replaces the current best when strictly greater.
pub fn best_prediction(predictions: &PredictionSet) -> Option<&Prediction> {
    predictions.iter().fold(None, |best: Option<&Prediction>, current| match best {
        Some(prev) if prev.confidence >= current.confidence => Some(prev),
        // NaN never beats an existing best
        Some(prev) if current.confidence.is_nan() => Some(prev),
        _ => Some(current),
    })
}

fn unrecognized(confidence: f64, table: &DiseaseTable) -> Diagnosis {
    build(
        UNRECOGNIZED_LABEL.to_string(),
        confidence,
        table.sentinel(),
        DiagnosisStatus::Unrecognized,
    )
}

fn build(label: String, confidence: f64, record: &DiseaseRecord, status: DiagnosisStatus) -> Diagnosis {
    Diagnosis {
        label,
        confidence,
        symptoms: record.symptoms.to_string(),
        treatment: record.treatment.to_string(),
        status,
    }
}
