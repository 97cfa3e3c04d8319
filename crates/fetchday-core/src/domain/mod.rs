//! Core domain layer for fetch-day.
//!
//! Pure logic only: puzzle identity, stub templates, placeholder rendering
//! and the instructions converter. All I/O goes through the ports defined in
//! the application layer.

pub mod entities;
pub mod error;
pub mod instructions;
pub mod value_objects;

pub use entities::{
    common::RelativePath,
    project_structure::{FileToWrite, ProjectStructure},
    template::{RenderContext, StubTemplate, TemplateFile, TemplateOrigin, TemplateSource},
};

pub use error::DomainError;

pub use value_objects::{Day, ENCRYPTED_SUFFIX, FIRST_YEAR, LAST_DAY, Lang, PuzzleId, Year};
