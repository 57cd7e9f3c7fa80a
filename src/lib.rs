pub mod analyzer;
pub mod config;
pub mod model;
pub mod parser;
pub mod search;
pub mod ui;
pub mod utils;
