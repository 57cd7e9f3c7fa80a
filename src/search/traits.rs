use crate::model::{GeminiError, GenerationReply, GenerationRequest};

/// A generative model that can answer with web-search grounding.
#[async_trait::async_trait]
pub trait GenerativeSearch: Send + Sync {
    async fn generate(&self, req: &GenerationRequest) -> Result<GenerationReply, GeminiError>;
}
