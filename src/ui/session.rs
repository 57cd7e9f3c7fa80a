use crate::model::{ImagePayload, SearchError, SearchOutcome, SubmitError};
use crate::search::{GenerativeSearch, SearchOrchestrator};
use crate::ui::state::{Phase, SearchUiState};

use std::sync::Arc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info, warn};

type InFlight = JoinHandle<Result<SearchOutcome, SearchError>>;

/// Owns the screen state and the single in-flight search.
///
/// `Idle -> Loading -> ResultsShown | ErrorShown`, and back to `Loading` on the
/// next submit. A submit while a search is pending is refused rather than
/// queued or raced. Dropping the session detaches a pending search; its result
/// is thrown away.
pub struct SearchSession<C> {
    orchestrator: Arc<SearchOrchestrator<C>>,
    state: SearchUiState,
    in_flight: Option<InFlight>,
}

impl<C> SearchSession<C>
where
    C: GenerativeSearch + 'static,
{
    pub fn new(orchestrator: Arc<SearchOrchestrator<C>>) -> Self {
        Self {
            orchestrator,
            state: SearchUiState::default(),
            in_flight: None,
        }
    }

    pub fn state(&self) -> &SearchUiState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Starts a search. Leaves the state untouched when the input is empty or
    /// another search is still running.
    pub fn submit(&mut self, query: &str, image: Option<ImagePayload>) -> Result<(), SubmitError> {
        if query.trim().is_empty() && image.is_none() {
            return Err(SubmitError::InputEmpty);
        }
        if self.is_busy() {
            warn!("Submit ignored, a search is already in flight");
            return Err(SubmitError::Busy);
        }

        info!("Starting search: {:?} (image: {})", query.trim(), image.is_some());
        self.state = SearchUiState::loading();

        let orchestrator = Arc::clone(&self.orchestrator);
        let query = query.to_string();
        self.in_flight = Some(tokio::spawn(async move {
            orchestrator.search(&query, image).await
        }));
        Ok(())
    }

    /// Waits for the pending search and applies its result. Returns at once
    /// when nothing is in flight. Cancel-safe: dropping the future keeps the
    /// search pending.
    pub async fn wait_in_flight(&mut self) -> Phase {
        let Some(handle) = self.in_flight.as_mut() else {
            return self.state.phase();
        };
        let joined = handle.await;
        self.in_flight = None;
        self.apply(joined);
        self.state.phase()
    }

    fn apply(&mut self, joined: Result<Result<SearchOutcome, SearchError>, JoinError>) {
        self.state = match joined {
            Ok(Ok(outcome)) => {
                info!(
                    "Search finished: {} offers, {} sources",
                    outcome.offers.len(),
                    outcome.source_links.len()
                );
                SearchUiState::results(outcome)
            }
            Ok(Err(e)) => {
                warn!("Search failed: {}", e);
                SearchUiState::failed()
            }
            Err(e) => {
                error!("Search task died: {}", e);
                SearchUiState::failed()
            }
        };
    }
}
