pub mod command_handler;
pub mod listener;
pub mod render;
pub mod session;
pub mod state;

pub use session::SearchSession;
pub use state::{FIXED_ERROR_MESSAGE, Phase, SearchUiState};
