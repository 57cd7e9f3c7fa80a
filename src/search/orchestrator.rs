use crate::analyzer::price_ranking::cheapest;
use crate::config::MarketConfig;
use crate::model::{GenerationRequest, ImagePayload, SearchError, SearchOutcome};
use crate::parser::{OfferLineParser, ResponseParser};
use crate::search::prompt::build_prompt;
use crate::search::traits::GenerativeSearch;
use crate::utils::dedup_preserving_order;

use chrono::Utc;
use tracing::{info, warn};

/// Turns one user submission into a ranked [`SearchOutcome`].
pub struct SearchOrchestrator<C> {
    client: C,
    parser: OfferLineParser,
    market: MarketConfig,
}

impl<C: GenerativeSearch> SearchOrchestrator<C> {
    pub fn new(client: C, market: MarketConfig) -> Self {
        Self {
            client,
            parser: OfferLineParser::new(),
            market,
        }
    }

    pub fn build_request(&self, query: &str, image: Option<ImagePayload>) -> GenerationRequest {
        GenerationRequest {
            prompt: build_prompt(query, &self.market),
            image,
            web_search: true,
        }
    }

    /// Runs one search. Returns the outcome even when no offer line parsed;
    /// in that case the caller shows `raw_text`.
    pub async fn search(
        &self,
        query: &str,
        image: Option<ImagePayload>,
    ) -> Result<SearchOutcome, SearchError> {
        if query.trim().is_empty() && image.is_none() {
            return Err(SearchError::InputEmpty);
        }

        let request = self.build_request(query, image);
        let reply = self.client.generate(&request).await.map_err(|e| {
            warn!("Search failed: {}", e);
            SearchError::from(e)
        })?;

        let offers = self.parser.parse(&reply.text);
        let source_links = dedup_preserving_order(reply.citation_uris);
        match cheapest(&offers) {
            Some(best) => info!(
                "Parsed {} offers, cheapest: {} at {} {}",
                offers.len(),
                best.store_name,
                best.price,
                best.currency
            ),
            None => info!("No offer lines in reply, falling back to raw text"),
        }

        Ok(SearchOutcome {
            offers,
            raw_text: reply.text,
            source_links,
            searched_at: Utc::now(),
        })
    }
}
