pub mod gemini;
pub mod orchestrator;
pub mod prompt;
pub mod traits;

pub use gemini::GeminiClient;
pub use orchestrator::SearchOrchestrator;
pub use traits::GenerativeSearch;
