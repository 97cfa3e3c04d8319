//! Driven (output) ports - implemented by infrastructure.

use std::path::{Path, PathBuf};

use crate::domain::{Lang, ProjectStructure, PuzzleId, RenderContext, StubTemplate};
use crate::error::FetchDayResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `fetchday_adapters::filesystem::LocalFilesystem` (production)
/// - `fetchday_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> FetchDayResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &[u8]) -> FetchDayResult<()>;

    /// Read a UTF-8 file.
    fn read_to_string(&self, path: &Path) -> FetchDayResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> FetchDayResult<()>;

    /// Paths of the entries directly inside `path`.
    fn list_dir(&self, path: &Path) -> FetchDayResult<Vec<PathBuf>>;
}

/// Port for the remote puzzle site.
///
/// Implemented by:
/// - `fetchday_adapters::puzzle_source::AocClient` (HTTP)
/// - `fetchday_adapters::puzzle_source::StaticPuzzleSource` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait PuzzleSource: Send + Sync {
    /// The puzzle page HTML.
    fn fetch_instructions(&self, puzzle: &PuzzleId) -> FetchDayResult<String>;

    /// The personal puzzle input.
    fn fetch_input(&self, puzzle: &PuzzleId) -> FetchDayResult<String>;

    /// Public URL of the puzzle page.
    fn puzzle_url(&self, puzzle: &PuzzleId) -> String;
}

/// Port for at-rest encryption of puzzle input.
#[cfg_attr(test, mockall::automock)]
pub trait DataCipher: Send + Sync {
    /// Encrypt and encode for storage as text.
    fn encrypt(&self, plaintext: &[u8]) -> FetchDayResult<String>;

    /// Decode and decrypt text produced by [`DataCipher::encrypt`].
    fn decrypt(&self, encoded: &str) -> FetchDayResult<Vec<u8>>;
}

/// Port for stub template storage and retrieval.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateStore: Send + Sync {
    /// Template set for a language.
    fn get(&self, lang: Lang) -> FetchDayResult<StubTemplate>;

    /// Insert or replace the template set for its language.
    fn insert(&self, template: StubTemplate) -> FetchDayResult<()>;
}

/// Port for template rendering.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Render a template into a structure rooted at `output_root`.
    fn render(
        &self,
        template: &StubTemplate,
        context: &RenderContext,
        output_root: &Path,
    ) -> FetchDayResult<ProjectStructure>;
}
