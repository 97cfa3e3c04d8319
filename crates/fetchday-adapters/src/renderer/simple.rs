//! Simple marker substitution renderer.

use std::path::Path;

use fetchday_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::{DomainError, ProjectStructure, RelativePath, RenderContext, StubTemplate},
    error::{FetchDayError, FetchDayResult},
};
use tracing::instrument;

/// Renderer replacing `{{NAME}}` markers in paths and contents.
///
/// Every rendered file ends with exactly one newline.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleRenderer;

impl SimpleRenderer {
    /// Create a new simple renderer.
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for SimpleRenderer {
    #[instrument(skip_all, fields(lang = %template.lang, origin = %template.origin))]
    fn render(
        &self,
        template: &StubTemplate,
        context: &RenderContext,
        output_root: &Path,
    ) -> FetchDayResult<ProjectStructure> {
        // Validate template first
        template.validate()?;

        let failed = |e: DomainError| -> FetchDayError {
            match e {
                DomainError::UnresolvedPlaceholder { name } => ApplicationError::RenderingFailed {
                    lang: template.lang.to_string(),
                    reason: format!("unresolved placeholder '{{{{{name}}}}}'"),
                }
                .into(),
                other => other.into(),
            }
        };

        let mut structure = ProjectStructure::new(output_root);

        for file in &template.files {
            let path = context
                .render(&file.path.to_string_lossy())
                .map_err(failed)?;
            let path =
                RelativePath::try_new(path).map_err(|e| ApplicationError::RenderingFailed {
                    lang: template.lang.to_string(),
                    reason: e.to_string(),
                })?;
            let mut content = context.render(file.content.as_str()).map_err(failed)?;

            let trimmed = content.trim_end_matches('\n').len();
            content.truncate(trimmed);
            content.push('\n');

            structure.add_file(path.into_path_buf(), content);
        }

        // Validate final structure
        structure.validate()?;

        Ok(structure)
    }
}
