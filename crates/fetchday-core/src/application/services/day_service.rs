//! Day Service - the `fetch` use case.
//!
//! For one puzzle this service:
//! 1. Downloads the personal input and stores a plain and an encrypted copy
//! 2. Converts the puzzle page into a README per language
//! 3. Renders the stub template of every selected language
//!
//! Each step talks to the outside world only through the ports.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{DataCipher, Filesystem, PuzzleSource, TemplateRenderer, TemplateStore},
    },
    domain::{Lang, PuzzleId, RenderContext, instructions},
    error::FetchDayResult,
};

/// Where the service reads and writes, relative to nothing: callers pass
/// resolved paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspacePaths {
    /// Root under which `<lang>/<package>/` directories are created.
    pub root: PathBuf,
    /// Directory holding `day_NN.txt` and `day_NN.enc.txt`.
    pub data_dir: PathBuf,
    /// Cache file for the downloaded puzzle page.
    pub instructions_file: PathBuf,
}

impl WorkspacePaths {
    /// Default layout under `root`: `data/` and `instructions.html`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            data_dir: root.join("data"),
            instructions_file: root.join("instructions.html"),
            root,
        }
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_instructions_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.instructions_file = file.into();
        self
    }

    /// `<root>/<lang>/<package>`
    pub fn stub_dir(&self, lang: Lang, puzzle: &PuzzleId) -> PathBuf {
        self.root.join(lang.as_str()).join(puzzle.package_name())
    }
}

impl Default for WorkspacePaths {
    fn default() -> Self {
        Self::new(".")
    }
}

/// What a `fetch` run should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    pub puzzle: PuzzleId,
    /// Sorted, without duplicates.
    pub langs: Vec<Lang>,
    /// Download the puzzle page even if a cached copy exists.
    pub force_download: bool,
    /// Skip downloading the puzzle input.
    pub no_data: bool,
    /// Skip rendering stub templates.
    pub skip_templates: bool,
    /// Keep the cached puzzle page after conversion.
    pub keep_instructions: bool,
    /// Replace stub files that already exist.
    pub overwrite: bool,
}

impl FetchOptions {
    pub fn new(puzzle: PuzzleId, langs: impl IntoIterator<Item = Lang>) -> Self {
        let mut langs: Vec<Lang> = langs.into_iter().collect();
        langs.sort();
        langs.dedup();

        Self {
            puzzle,
            langs,
            force_download: false,
            no_data: false,
            skip_templates: false,
            keep_instructions: false,
            overwrite: false,
        }
    }

    /// Refresh the READMEs once part one is solved: force the page download,
    /// leave data and stubs alone.
    pub fn part_two(mut self) -> Self {
        self.force_download = true;
        self.no_data = true;
        self.skip_templates = true;
        self
    }
}

/// Outcome of the data step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataOutcome {
    /// `no_data` was set.
    Skipped,
    /// The plain data file was already there.
    AlreadyPresent(PathBuf),
    Downloaded { plain: PathBuf, encrypted: PathBuf },
}

/// Where the puzzle page came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionsSource {
    Cache,
    Remote,
}

/// Stub files handled for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubOutcome {
    pub lang: Lang,
    pub written: Vec<PathBuf>,
    /// Existing files left untouched.
    pub skipped: Vec<PathBuf>,
}

/// Summary of a `fetch` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchReport {
    pub data: DataOutcome,
    pub instructions: InstructionsSource,
    pub readmes: Vec<PathBuf>,
    pub stubs: Vec<StubOutcome>,
}

/// Orchestrates the `fetch` workflow.
pub struct DayService {
    filesystem: Box<dyn Filesystem>,
    source: Box<dyn PuzzleSource>,
    cipher: Option<Box<dyn DataCipher>>,
    store: Box<dyn TemplateStore>,
    renderer: Box<dyn TemplateRenderer>,
    paths: WorkspacePaths,
}

impl DayService {
    /// Create a new day service with the given adapters.
    ///
    /// `cipher` may be `None` when the caller never downloads input
    /// (`no_data`); asking for a download without one is an error.
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        source: Box<dyn PuzzleSource>,
        cipher: Option<Box<dyn DataCipher>>,
        store: Box<dyn TemplateStore>,
        renderer: Box<dyn TemplateRenderer>,
        paths: WorkspacePaths,
    ) -> Self {
        Self {
            filesystem,
            source,
            cipher,
            store,
            renderer,
            paths,
        }
    }

    pub fn paths(&self) -> &WorkspacePaths {
        &self.paths
    }

    /// Run the whole workflow for one puzzle.
    #[instrument(skip_all, fields(puzzle = %options.puzzle))]
    pub fn run(&self, options: &FetchOptions) -> FetchDayResult<FetchReport> {
        info!("Fetching {}", options.puzzle);

        let data = self.write_data_file(options)?;
        let (instructions, readmes) = self.write_instruction_files(options)?;

        let mut stubs = Vec::with_capacity(options.langs.len());
        if options.skip_templates {
            debug!("Skipping stub templates");
        } else {
            for &lang in &options.langs {
                stubs.push(self.add_templates(&options.puzzle, lang, options.overwrite)?);
            }
        }

        info!("Fetch completed successfully");
        Ok(FetchReport {
            data,
            instructions,
            readmes,
            stubs,
        })
    }

    /// Download the personal input, unless it is already on disk.
    #[instrument(skip_all, fields(puzzle = %options.puzzle))]
    pub fn write_data_file(&self, options: &FetchOptions) -> FetchDayResult<DataOutcome> {
        if options.no_data {
            debug!("Skipping puzzle input");
            return Ok(DataOutcome::Skipped);
        }

        let puzzle = &options.puzzle;
        let plain = self.paths.data_dir.join(puzzle.data_file_name());
        let encrypted = self.paths.data_dir.join(puzzle.encrypted_data_file_name());

        self.filesystem.create_dir_all(&self.paths.data_dir)?;

        if self.filesystem.exists(&plain) {
            info!(path = %plain.display(), "Puzzle input already present");
            return Ok(DataOutcome::AlreadyPresent(plain));
        }

        let cipher = self
            .cipher
            .as_deref()
            .ok_or(ApplicationError::AdapterNotConfigured { name: "DataCipher" })?;

        let input = self.source.fetch_input(puzzle)?;
        self.filesystem.write_file(&plain, input.as_bytes())?;

        let sealed = cipher.encrypt(input.as_bytes())?;
        self.filesystem.write_file(&encrypted, sealed.as_bytes())?;

        info!(path = %plain.display(), "Puzzle input saved");
        Ok(DataOutcome::Downloaded { plain, encrypted })
    }

    /// Convert the puzzle page into `<lang>/<package>/README.md` files.
    #[instrument(skip_all, fields(puzzle = %options.puzzle))]
    pub fn write_instruction_files(
        &self,
        options: &FetchOptions,
    ) -> FetchDayResult<(InstructionsSource, Vec<PathBuf>)> {
        let puzzle = &options.puzzle;
        let cache = &self.paths.instructions_file;

        let (html, origin) = if !options.force_download && self.filesystem.exists(cache) {
            debug!(path = %cache.display(), "Using cached instructions");
            (self.filesystem.read_to_string(cache)?, InstructionsSource::Cache)
        } else {
            let html = self.source.fetch_instructions(puzzle)?;
            if options.keep_instructions {
                if let Some(parent) = cache.parent() {
                    self.filesystem.create_dir_all(parent)?;
                }
                self.filesystem.write_file(cache, html.as_bytes())?;
            }
            (html, InstructionsSource::Remote)
        };

        let puzzle_url = self.source.puzzle_url(puzzle);
        let readme = instructions::instructions_to_markdown(&html, &puzzle_url)?;

        // A cache that a forced download bypassed is left for the user.
        if origin == InstructionsSource::Cache && !options.keep_instructions {
            self.filesystem.remove_file(cache)?;
        }

        let mut written = Vec::with_capacity(options.langs.len());
        for &lang in &options.langs {
            let dir = self.paths.stub_dir(lang, puzzle);
            self.filesystem.create_dir_all(&dir)?;

            let path = dir.join("README.md");
            self.filesystem.write_file(&path, readme.as_bytes())?;
            written.push(path);
        }

        info!(count = written.len(), "Instructions written");
        Ok((origin, written))
    }

    /// Render the stub template for `lang` into `<lang>/<package>/`.
    ///
    /// Existing files are left alone unless `overwrite` is set. If a write
    /// fails, files written by this call are removed again.
    #[instrument(skip(self, puzzle), fields(puzzle = %puzzle))]
    pub fn add_templates(
        &self,
        puzzle: &PuzzleId,
        lang: Lang,
        overwrite: bool,
    ) -> FetchDayResult<StubOutcome> {
        let template = self.store.get(lang)?;
        debug!(origin = %template.origin, "Template resolved");

        let context = RenderContext::for_puzzle(puzzle, self.source.puzzle_url(puzzle));
        let output_root = self.paths.stub_dir(lang, puzzle);
        let structure = self.renderer.render(&template, &context, &output_root)?;
        structure.validate()?;

        let mut outcome = StubOutcome {
            lang,
            written: Vec::new(),
            skipped: Vec::new(),
        };

        for file in structure.files() {
            let path = structure.root().join(&file.path);

            if !overwrite && self.filesystem.exists(&path) {
                debug!(path = %path.display(), "Stub exists, leaving it alone");
                outcome.skipped.push(path);
                continue;
            }

            if let Err(e) = self.write_stub(&path, &file.content) {
                warn!("Write failed, attempting rollback");
                self.rollback(&outcome.written);
                return Err(e);
            }
            outcome.written.push(path);
        }

        info!(
            written = outcome.written.len(),
            skipped = outcome.skipped.len(),
            "{} stubs ready",
            lang.display_name()
        );
        Ok(outcome)
    }

    fn write_stub(&self, path: &Path, content: &str) -> FetchDayResult<()> {
        if let Some(parent) = path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(path, content.as_bytes())
    }

    /// Best-effort removal of files written before a failure.
    fn rollback(&self, written: &[PathBuf]) {
        for path in written {
            if let Err(e) = self.filesystem.remove_file(path) {
                warn!(
                    error = %e,
                    path = %path.display(),
                    "Rollback failed"
                );
            }
        }
    }
}
