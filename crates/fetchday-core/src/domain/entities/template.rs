//! Stub templates and the render context.
//!
//! ```text
//! StubTemplate (Aggregate Root)
//! ├── Lang                - which stub directory it fills
//! ├── TemplateOrigin      - built-in or loaded from a directory
//! └── Vec<TemplateFile>
//!      ├── RelativePath   - output path, may contain placeholders
//!      └── TemplateSource - Static (compiled in) or Owned (loaded)
//!
//! RenderContext
//! └── {{PACKAGE_NAME}} -> "day_02", {{DISPLAY_NAME}} -> "Day 02", ...
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{
    entities::common::RelativePath,
    error::DomainError,
    value_objects::{Lang, PuzzleId},
};

// ── TemplateSource ────────────────────────────────────────────────────────────

/// Raw template text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Compiled into the binary.
    Static(&'static str),
    /// Loaded at runtime from a templates directory.
    Owned(String),
}

impl TemplateSource {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static(s) => s,
            Self::Owned(s) => s,
        }
    }
}

impl From<&'static str> for TemplateSource {
    fn from(s: &'static str) -> Self {
        Self::Static(s)
    }
}

impl From<String> for TemplateSource {
    fn from(s: String) -> Self {
        Self::Owned(s)
    }
}

// ── TemplateFile ──────────────────────────────────────────────────────────────

/// One file of a stub template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// Output path relative to the stub directory. Placeholders allowed.
    pub path: RelativePath,
    pub content: TemplateSource,
}

impl TemplateFile {
    pub fn new(
        path: impl Into<PathBuf>,
        content: impl Into<TemplateSource>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            path: RelativePath::try_new(path)?,
            content: content.into(),
        })
    }
}

// ── StubTemplate ──────────────────────────────────────────────────────────────

/// Where a template set came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOrigin {
    Builtin,
    Directory(PathBuf),
}

impl fmt::Display for TemplateOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin => f.write_str("built-in"),
            Self::Directory(dir) => write!(f, "{}", dir.display()),
        }
    }
}

/// The set of files generated for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubTemplate {
    pub lang: Lang,
    pub origin: TemplateOrigin,
    pub files: Vec<TemplateFile>,
}

impl StubTemplate {
    pub fn new(lang: Lang, origin: TemplateOrigin) -> Self {
        Self {
            lang,
            origin,
            files: Vec::new(),
        }
    }

    pub fn with_file(
        mut self,
        path: impl Into<PathBuf>,
        content: impl Into<TemplateSource>,
    ) -> Result<Self, DomainError> {
        self.files.push(TemplateFile::new(path, content)?);
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.files.is_empty() {
            return Err(DomainError::EmptyTemplate {
                lang: self.lang.to_string(),
            });
        }

        let mut seen = HashSet::new();
        for file in &self.files {
            if !seen.insert(file.path.as_path()) {
                return Err(DomainError::DuplicatePath {
                    path: file.path.to_string(),
                });
            }
        }

        Ok(())
    }
}

// ── RenderContext ─────────────────────────────────────────────────────────────

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([A-Z][A-Z0-9_]*)\}\}").expect("placeholder pattern is valid")
});

/// Variables available to templates.
///
/// ## Built-in Variables
///
/// | Variable | Example |
/// |----------|---------|
/// | `PACKAGE_NAME` | "day_02" |
/// | `CRATE_NAME` | "day_02" |
/// | `DISPLAY_NAME` | "Day 02" |
/// | `DAY` | "2" |
/// | `YEAR` | "2022" |
/// | `PUZZLE_URL` | "https://adventofcode.com/2022/day/2" |
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    variables: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for a puzzle whose page lives at `puzzle_url`.
    pub fn for_puzzle(puzzle: &PuzzleId, puzzle_url: impl Into<String>) -> Self {
        let package = puzzle.package_name();
        Self::new()
            .with_variable("PACKAGE_NAME", package.clone())
            .with_variable("CRATE_NAME", package)
            .with_variable("DISPLAY_NAME", puzzle.display_name())
            .with_variable("DAY", puzzle.day().to_string())
            .with_variable("YEAR", puzzle.year().to_string())
            .with_variable("PUZZLE_URL", puzzle_url)
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Replace every `{{NAME}}` marker with its value.
    ///
    /// A marker whose name is not defined is an error. Braces that do not
    /// form an upper-case marker (`struct{}{`, `Input {}`) are left alone.
    pub fn render(&self, template: &str) -> Result<String, DomainError> {
        let mut output = String::with_capacity(template.len());
        let mut last = 0;

        for caps in PLACEHOLDER.captures_iter(template) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let value = self.get(name.as_str()).ok_or_else(|| {
                DomainError::UnresolvedPlaceholder {
                    name: name.as_str().to_string(),
                }
            })?;
            output.push_str(&template[last..whole.start()]);
            output.push_str(value);
            last = whole.end();
        }

        output.push_str(&template[last..]);
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Day, Year};

    fn ctx() -> RenderContext {
        let puzzle = PuzzleId::new(Year::new(2022).unwrap(), Day::new(2).unwrap());
        RenderContext::for_puzzle(&puzzle, "https://adventofcode.com/2022/day/2")
    }

    #[test]
    fn builtin_variables() {
        let ctx = ctx();
        assert_eq!(ctx.get("PACKAGE_NAME"), Some("day_02"));
        assert_eq!(ctx.get("CRATE_NAME"), Some("day_02"));
        assert_eq!(ctx.get("DISPLAY_NAME"), Some("Day 02"));
        assert_eq!(ctx.get("DAY"), Some("2"));
        assert_eq!(ctx.get("YEAR"), Some("2022"));
        assert_eq!(
            ctx.get("PUZZLE_URL"),
            Some("https://adventofcode.com/2022/day/2")
        );
    }

    #[test]
    fn replaces_repeated_markers() {
        let out = ctx()
            .render("mod {{CRATE_NAME}}_tests; // {{CRATE_NAME}}")
            .unwrap();
        assert_eq!(out, "mod day_02_tests; // day_02");
    }

    #[test]
    fn leaves_ordinary_braces_alone() {
        let source = "tests := map[string]struct{}{}\nreturn &Input{}\n{{ not_a_marker }}";
        assert_eq!(ctx().render(source).unwrap(), source);
    }

    #[test]
    fn unknown_marker_is_an_error() {
        assert_eq!(
            ctx().render("{{PACKAGE}}"),
            Err(DomainError::UnresolvedPlaceholder {
                name: "PACKAGE".into()
            })
        );
    }

    #[test]
    fn template_rejects_duplicate_paths() {
        let template = StubTemplate::new(Lang::Go, TemplateOrigin::Builtin)
            .with_file("main.go", "package main")
            .unwrap()
            .with_file("main.go", "package main")
            .unwrap();
        assert!(matches!(
            template.validate(),
            Err(DomainError::DuplicatePath { .. })
        ));
    }

    #[test]
    fn template_rejects_empty_set() {
        let template = StubTemplate::new(Lang::Ts, TemplateOrigin::Builtin);
        assert_eq!(
            template.validate(),
            Err(DomainError::EmptyTemplate { lang: "ts".into() })
        );
    }

    #[test]
    fn template_file_rejects_escaping_path() {
        assert!(TemplateFile::new("../main.go", "package main").is_err());
    }
}
