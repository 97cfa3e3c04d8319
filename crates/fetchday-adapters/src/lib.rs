//! Infrastructure adapters for fetch-day.
//!
//! This crate implements the ports defined in `fetchday-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_templates;
pub mod cipher;
pub mod filesystem;
pub mod puzzle_source;
pub mod renderer;
pub mod template_loader;
pub mod template_store;

// Re-export commonly used adapters
pub use cipher::AesGcmCipher;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use puzzle_source::{AocClient, StaticPuzzleSource};
pub use renderer::SimpleRenderer;
pub use template_store::InMemoryStore;
