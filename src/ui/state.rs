use crate::model::{OfferRecord, SearchOutcome};
use chrono::{DateTime, Utc};

/// Shown for every failed search, whatever the cause.
pub const FIXED_ERROR_MESSAGE: &str =
    "حدث خطأ أثناء البحث. تأكد من اتصالك بالإنترنت أو حاول مرة أخرى لاحقاً.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    ResultsShown,
    ErrorShown,
}

/// What the screen shows. Replaced wholesale by each search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchUiState {
    pub is_loading: bool,
    pub offers: Vec<OfferRecord>,
    pub raw_text: String,
    pub source_links: Vec<String>,
    pub searched_at: Option<DateTime<Utc>>,
    pub error: Option<String>,
}

impl SearchUiState {
    pub fn phase(&self) -> Phase {
        if self.is_loading {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::ErrorShown
        } else if self.offers.is_empty() && self.raw_text.is_empty() {
            Phase::Idle
        } else {
            Phase::ResultsShown
        }
    }

    pub fn loading() -> Self {
        Self {
            is_loading: true,
            ..Self::default()
        }
    }

    pub fn results(outcome: SearchOutcome) -> Self {
        Self {
            is_loading: false,
            offers: outcome.offers,
            raw_text: outcome.raw_text,
            source_links: outcome.source_links,
            searched_at: Some(outcome.searched_at),
            error: None,
        }
    }

    /// No partial results are kept next to an error.
    pub fn failed() -> Self {
        Self {
            error: Some(FIXED_ERROR_MESSAGE.to_string()),
            ..Self::default()
        }
    }
}
