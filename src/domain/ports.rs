use crate::domain::model::{EncodedImage, ImageRef, PredictionSet};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ImageSource: Send + Sync {
    fn load(&self, image: &ImageRef) -> impl std::future::Future<Output = Result<EncodedImage>> + Send;
}

#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// An empty set is a valid answer; errors are reserved for transport and
    /// protocol failures.
    async fn predict(&self, image: &EncodedImage) -> Result<PredictionSet>;
}
