//! Fetchday Core - ports and adapters core for the daily puzzle scaffolder.
//!
//! This crate provides the domain and application layers for `fetch-day`,
//! following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          fetchday-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │      (DayService, DecryptService)       │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (Filesystem, PuzzleSource, DataCipher,  │
//! │   TemplateStore, TemplateRenderer)      │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     fetchday-adapters (Infrastructure)  │
//! │ (LocalFilesystem, AocClient, AesGcm...) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (PuzzleId, StubTemplate, RenderContext, │
//! │        instructions converter)          │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fetchday_core::prelude::*;
//!
//! let puzzle = PuzzleId::new(Year::new(2022)?, Day::new(2)?);
//! let options = FetchOptions::new(puzzle, vec![Lang::Rs]);
//!
//! // adapters are injected by the caller
//! let service = DayService::new(filesystem, source, cipher, store, renderer, paths);
//! let report = service.run(&options)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        DayService, DecryptService, FetchOptions, FetchReport, WorkspacePaths,
        ports::{DataCipher, Filesystem, PuzzleSource, TemplateRenderer, TemplateStore},
    };
    pub use crate::domain::{
        Day, Lang, ProjectStructure, PuzzleId, RenderContext, StubTemplate, TemplateFile, Year,
    };
    pub use crate::error::{FetchDayError, FetchDayResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
