//! Application layer for fetch-day.
//!
//! This layer contains:
//! - **Services**: use case orchestration (`DayService`, `DecryptService`)
//! - **Ports**: interface definitions (traits) for external dependencies
//! - **Errors**: application-specific error types

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    DataOutcome, DayService, DecryptService, FetchOptions, FetchReport, InstructionsSource,
    StubOutcome, WorkspacePaths,
};

pub use ports::{DataCipher, Filesystem, PuzzleSource, TemplateRenderer, TemplateStore};

pub use error::ApplicationError;
