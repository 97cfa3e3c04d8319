pub mod common;
pub mod project_structure;
pub mod template;

pub use crate::domain::DomainError;
pub use project_structure::ProjectStructure;
pub use template::{RenderContext, StubTemplate};
