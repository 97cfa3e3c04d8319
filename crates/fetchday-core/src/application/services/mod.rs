//! Application services (use cases).

mod day_service;
mod decrypt_service;

pub use day_service::{
    DataOutcome, DayService, FetchOptions, FetchReport, InstructionsSource, StubOutcome,
    WorkspacePaths,
};
pub use decrypt_service::DecryptService;
