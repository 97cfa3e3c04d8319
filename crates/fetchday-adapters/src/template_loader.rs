//! Filesystem-based template loader.
//!
//! Reads user stub templates from a directory tree, converting them into
//! domain [`StubTemplate`] objects that override the built-ins.
//!
//! # Directory layout expected
//!
//! ```text
//! templates/
//! ├── go/
//! │   ├── main.stpl.go          → main.go
//! │   └── main_test.stpl.go     → main_test.go
//! ├── rs/
//! │   ├── Cargo.stpl.toml       → Cargo.toml
//! │   ├── src/lib.stpl.rs       → src/lib.rs
//! │   └── src/bin/{{CRATE_NAME}}.stpl.rs
//! └── ts/
//!     └── ...
//! ```
//!
//! Only files with a `.stpl` segment in their name are templates; anything
//! else (notes, editor backups) is ignored. A language without a directory
//! keeps its built-in set.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use fetchday_core::domain::{DomainError, Lang, StubTemplate, TemplateOrigin};

/// Marker segment in template file names.
const STPL: &str = ".stpl";

/// Loads `<root>/<lang>/` template directories.
#[derive(Debug, Clone)]
pub struct FilesystemTemplateLoader {
    root: PathBuf,
}

impl FilesystemTemplateLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load the template set for `lang`, or `None` if the directory has no
    /// `<lang>/` entry.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn load(&self, lang: Lang) -> Result<Option<StubTemplate>, DomainError> {
        let dir = self.root.join(lang.as_str());
        if !dir.is_dir() {
            debug!(path = %dir.display(), "No template directory for language");
            return Ok(None);
        }

        let mut entries: Vec<walkdir::DirEntry> = WalkDir::new(&dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable template entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .collect();
        entries.sort_by(|a, b| a.path().cmp(b.path()));

        let mut template = StubTemplate::new(lang, TemplateOrigin::Directory(dir.clone()));
        for entry in entries {
            let relative = entry.path().strip_prefix(&dir).map_err(|e| {
                DomainError::InvalidTemplate(format!("{}: {e}", entry.path().display()))
            })?;

            let Some(output) = output_path(relative) else {
                debug!(path = %relative.display(), "Not a template file, ignoring");
                continue;
            };

            let content = fs::read_to_string(entry.path()).map_err(|e| {
                DomainError::InvalidTemplate(format!(
                    "failed to read {}: {e}",
                    entry.path().display()
                ))
            })?;

            template = template.with_file(output, content)?;
        }

        template.validate()?;
        debug!(files = template.files.len(), "Template directory loaded");
        Ok(Some(template))
    }

    /// Load every language present in the directory.
    pub fn load_all(&self) -> Result<Vec<StubTemplate>, DomainError> {
        let mut templates = Vec::new();
        for lang in Lang::ALL {
            if let Some(template) = self.load(lang)? {
                templates.push(template);
            }
        }
        Ok(templates)
    }
}

/// `src/lib.stpl.rs` → `src/lib.rs`, `Makefile.stpl` → `Makefile`.
/// `None` for names without the `.stpl` segment.
pub fn output_path(relative: &Path) -> Option<PathBuf> {
    let name = relative.file_name()?.to_str()?;

    let renamed = if let Some((stem, ext)) = name.split_once(".stpl.") {
        format!("{stem}.{ext}")
    } else {
        name.strip_suffix(STPL)?.to_string()
    };

    if renamed.is_empty() {
        return None;
    }
    Some(relative.with_file_name(renamed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, path: &str, content: &str) {
        let path = root.join(path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn output_path_drops_marker_segment() {
        assert_eq!(
            output_path(Path::new("src/lib.stpl.rs")),
            Some(PathBuf::from("src/lib.rs"))
        );
        assert_eq!(
            output_path(Path::new("day.test.stpl.ts")),
            Some(PathBuf::from("day.test.ts"))
        );
        assert_eq!(
            output_path(Path::new("Makefile.stpl")),
            Some(PathBuf::from("Makefile"))
        );
        assert_eq!(output_path(Path::new("README.md")), None);
    }

    #[test]
    fn loads_only_template_files() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "go/main.stpl.go", "package main");
        write(dir.path(), "go/notes.txt", "ignored");

        let loader = FilesystemTemplateLoader::new(dir.path());
        let go = loader.load(Lang::Go).unwrap().unwrap();

        assert_eq!(go.files.len(), 1);
        assert_eq!(go.files[0].path.to_string(), "main.go");
        assert_eq!(go.origin, TemplateOrigin::Directory(dir.path().join("go")));
    }

    #[test]
    fn missing_language_directory_is_none() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "go/main.stpl.go", "package main");

        let loader = FilesystemTemplateLoader::new(dir.path());
        assert!(loader.load(Lang::Ts).unwrap().is_none());
        assert_eq!(loader.load_all().unwrap().len(), 1);
    }

    #[test]
    fn directory_without_templates_is_rejected() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "rs/README.md", "nothing to render");

        let loader = FilesystemTemplateLoader::new(dir.path());
        assert_eq!(
            loader.load(Lang::Rs),
            Err(DomainError::EmptyTemplate { lang: "rs".into() })
        );
    }
}
