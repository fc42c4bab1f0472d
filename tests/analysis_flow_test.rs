use anyhow::Result;
use crop_care::adapters::presentation::{render, OutputFormat};
use crop_care::core::session::SessionState;
use crop_care::{
    AnalysisSession, CropCareError, DiagnosisEngine, DiagnosisStatus, HttpInferenceClient,
    ImageRef, InferenceSettings, LocalImageSource,
};
use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;
use tempfile::TempDir;

const UNRECOGNIZED_SYMPTOMS: &str = "The image does not clearly match any known plant diseases. Please try a clearer picture of a single leaf.";
const UNRECOGNIZED_TREATMENT: &str = "Please ensure the image is a plant and is well-lit with a plain background. Re-upload for analysis.";

struct Fixture {
    _temp_dir: TempDir,
    server: MockServer,
    engine: DiagnosisEngine<LocalImageSource, HttpInferenceClient>,
    session: AnalysisSession,
}

fn fixture() -> Result<Fixture> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("leaf.jpg"), b"leaf")?;

    let server = MockServer::start();
    let mut settings = InferenceSettings::new(server.url("/infer"), "test-key");
    settings.retry_delay = Duration::from_millis(10);

    let engine = DiagnosisEngine::new(
        LocalImageSource::new(temp_dir.path()),
        HttpInferenceClient::new(settings),
    );

    let mut session = AnalysisSession::new();
    session.pick_image(ImageRef::from_path("leaf.jpg"))?;

    Ok(Fixture {
        _temp_dir: temp_dir,
        server,
        engine,
        session,
    })
}

fn workflow_response(predictions: serde_json::Value) -> serde_json::Value {
    json!({
        "outputs": [{
            "predictions": {
                "image": {"width": 416, "height": 416},
                "predictions": predictions
            }
        }]
    })
}

#[tokio::test]
async fn test_confident_known_disease() -> Result<()> {
    let mut fx = fixture()?;

    let api_mock = fx.server.mock(|when, then| {
        when.method(POST).path("/infer").json_body(json!({
            "api_key": "test-key",
            "inputs": {"image": {"type": "base64", "value": "bGVhZg=="}}
        }));
        then.status(200).json_body(workflow_response(json!([
            {"class": "Potato___Late_blight", "confidence": 0.92}
        ])));
    });

    let diagnosis = fx.engine.analyze(&mut fx.session).await?;

    api_mock.assert();
    assert_eq!(diagnosis.label, "Potato___Late_blight");
    assert_eq!(diagnosis.confidence, 0.92);
    assert_eq!(
        diagnosis.symptoms,
        "Irregular, dark-brown or black lesions on leaves and stems."
    );
    assert_eq!(
        diagnosis.treatment,
        "Spray with fungicides regularly, ensure proper air circulation."
    );
    assert!(fx.session.dialog_visible());

    let text = render(OutputFormat::Text, "leaf.jpg", &diagnosis)?;
    assert!(text.contains("Confidence: 92%"));
    Ok(())
}

#[tokio::test]
async fn test_empty_predictions_resolve_to_unrecognized() -> Result<()> {
    let mut fx = fixture()?;

    let api_mock = fx.server.mock(|when, then| {
        when.method(POST).path("/infer");
        then.status(200).json_body(workflow_response(json!([])));
    });

    let diagnosis = fx.engine.analyze(&mut fx.session).await?;

    api_mock.assert();
    assert_eq!(diagnosis.label, "unrecognized");
    assert_eq!(diagnosis.confidence, 0.0);
    assert_eq!(diagnosis.symptoms, UNRECOGNIZED_SYMPTOMS);
    assert_eq!(diagnosis.treatment, UNRECOGNIZED_TREATMENT);
    assert_eq!(diagnosis.status, DiagnosisStatus::Unrecognized);
    Ok(())
}

#[tokio::test]
async fn test_unknown_class_keeps_label_with_fallback_text() -> Result<()> {
    let mut fx = fixture()?;

    fx.server.mock(|when, then| {
        when.method(POST).path("/infer");
        then.status(200).json_body(workflow_response(json!([
            {"class": "Foo___Unknown", "confidence": 0.8}
        ])));
    });

    let diagnosis = fx.engine.analyze(&mut fx.session).await?;

    assert_eq!(diagnosis.label, "Foo___Unknown");
    assert_eq!(diagnosis.symptoms, UNRECOGNIZED_SYMPTOMS);
    assert_eq!(diagnosis.status, DiagnosisStatus::Uncatalogued);
    Ok(())
}

#[tokio::test]
async fn test_low_confidence_keeps_actual_value() -> Result<()> {
    let mut fx = fixture()?;

    fx.server.mock(|when, then| {
        when.method(POST).path("/infer");
        then.status(200).json_body(workflow_response(json!([
            {"class": "Tomato___Leaf_Mold", "confidence": 0.5},
            {"class": "Tomato___Target_Spot", "confidence": 0.21}
        ])));
    });

    let diagnosis = fx.engine.analyze(&mut fx.session).await?;

    assert_eq!(diagnosis.label, "unrecognized");
    assert_eq!(diagnosis.confidence, 0.5);

    let json_output = render(OutputFormat::Json, "leaf.jpg", &diagnosis)?;
    let value: serde_json::Value = serde_json::from_str(&json_output)?;
    assert_eq!(value["confidence_percent"], 50);
    Ok(())
}

#[tokio::test]
async fn test_service_failure_marks_session_failed() -> Result<()> {
    let mut fx = fixture()?;

    let api_mock = fx.server.mock(|when, then| {
        when.method(POST).path("/infer");
        then.status(500);
    });

    let result = fx.engine.analyze(&mut fx.session).await;

    // 預設重試一次
    api_mock.assert_hits(2);
    assert!(matches!(
        result,
        Err(CropCareError::ServiceStatus { status: 500, .. })
    ));
    assert!(matches!(fx.session.state(), SessionState::Failed { .. }));
    assert_eq!(
        fx.session.notice(),
        Some("Analysis Failed: Something went wrong. Please try again.")
    );
    Ok(())
}

#[tokio::test]
async fn test_missing_image_file_never_hits_service() -> Result<()> {
    let mut fx = fixture()?;
    fx.session.pick_image(ImageRef::from_path("gone.jpg"))?;

    let api_mock = fx.server.mock(|when, then| {
        when.method(POST).path("/infer");
        then.status(200).json_body(workflow_response(json!([])));
    });

    let result = fx.engine.analyze(&mut fx.session).await;

    api_mock.assert_hits(0);
    assert!(matches!(result, Err(CropCareError::InvalidImage { .. })));
    Ok(())
}
