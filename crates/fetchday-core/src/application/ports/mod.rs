//! Application ports (traits) for external dependencies.
//!
//! Ports define what the application needs from the outside world. Adapters
//! in `fetchday-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: called by the application
//!   - `Filesystem`: file operations
//!   - `PuzzleSource`: puzzle pages and personal input
//!   - `DataCipher`: at-rest encryption of input files
//!   - `TemplateStore`: stub template lookup
//!   - `TemplateRenderer`: stub template rendering

pub mod output;

pub use output::{DataCipher, Filesystem, PuzzleSource, TemplateRenderer, TemplateStore};
