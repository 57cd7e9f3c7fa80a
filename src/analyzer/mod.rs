// Analyzer module: orders parsed offers and flags the cheapest one.

pub mod price_ranking;

pub use price_ranking::rank_offers;
