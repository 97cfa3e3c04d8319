//! Puzzle source adapters.

mod aoc_client;
mod static_source;

pub use aoc_client::{AocClient, DEFAULT_BASE_URL};
pub use static_source::StaticPuzzleSource;
