pub mod offer_parser;

pub use offer_parser::{OfferLineParser, ResponseParser};
