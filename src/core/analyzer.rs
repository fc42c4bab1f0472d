use crate::core::resolver::resolve;
use crate::core::session::AnalysisSession;
use crate::domain::model::{Diagnosis, ImageRef};
use crate::domain::ports::{ImageSource, InferenceClient};
use crate::utils::error::{CropCareError, Result};
use std::future::Future;

/// Runs one analysis: load image, ask the service, resolve the answer.
pub struct DiagnosisEngine<S: ImageSource, C: InferenceClient> {
    source: S,
    client: C,
}

impl<S: ImageSource, C: InferenceClient> DiagnosisEngine<S, C> {
    pub fn new(source: S, client: C) -> Self {
        Self { source, client }
    }

    /// Analyzes the session's picked image. On failure the session ends up
    /// `Failed` with the user-facing notice and the error is returned.
    pub async fn analyze(&self, session: &mut AnalysisSession) -> Result<Diagnosis> {
        self.analyze_until_cancelled(session, std::future::pending::<()>())
            .await
    }

    /// Like [`analyze`](Self::analyze), but gives up as soon as `cancel`
    /// resolves. The in-flight request is dropped and the session goes back
    /// to having only the image picked.
    pub async fn analyze_until_cancelled<F>(
        &self,
        session: &mut AnalysisSession,
        cancel: F,
    ) -> Result<Diagnosis>
    where
        F: Future<Output = ()>,
    {
        let image = session.begin_analysis()?;
        tracing::info!("🔍 Analyzing {}", image.uri);

        let outcome = tokio::select! {
            result = self.run(&image) => Some(result),
            _ = cancel => None,
        };

        match outcome {
            Some(Ok(diagnosis)) => {
                tracing::info!(
                    "✅ Diagnosis: {} ({:.3}, {:?})",
                    diagnosis.label,
                    diagnosis.confidence,
                    diagnosis.status
                );
                session.complete(diagnosis.clone())?;
                Ok(diagnosis)
            }
            Some(Err(e)) => {
                tracing::error!("❌ Analysis of {} failed: {}", image.uri, e);
                session.fail(e.user_friendly_message())?;
                Err(e)
            }
            None => {
                tracing::warn!("⏹️ Analysis of {} cancelled", image.uri);
                session.cancel()?;
                Err(CropCareError::Cancelled)
            }
        }
    }

    async fn run(&self, image: &ImageRef) -> Result<Diagnosis> {
        let encoded = self.source.load(image).await?;
        tracing::debug!("Encoded image: {} bytes", encoded.byte_len);

        let predictions = self.client.predict(&encoded).await?;
        Ok(resolve(Some(&predictions)))
    }
}
