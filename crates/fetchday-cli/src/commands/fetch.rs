//! `fetch-day fetch`: download a puzzle and scaffold its stubs.
//!
//! Credentials are only demanded when the run actually needs them: the
//! session token when something has to be downloaded, the AES key when the
//! puzzle input is.

use std::path::PathBuf;

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument};

use fetchday_adapters::{AesGcmCipher, AocClient, InMemoryStore, LocalFilesystem, SimpleRenderer};
use fetchday_core::application::{
    DataCipher, DataOutcome, DayService, FetchOptions, FetchReport, InstructionsSource,
    WorkspacePaths,
};
use fetchday_core::domain::{Day, LAST_DAY, Lang, PuzzleId, Year};
use fetchday_core::error::FetchDayError;

use crate::{
    cli::FetchArgs,
    commands::{AES_KEY_VAR, SESSION_TOKEN_VAR, env_var, require_env},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Puzzles unlock at midnight UTC-5.
const RELEASE_OFFSET_HOURS: i64 = 5;

#[instrument(skip_all)]
pub fn execute(args: FetchArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let now = Utc::now();
    let puzzle = resolve_puzzle(&args, now)?;
    let options = build_options(&args, puzzle, &config);
    let paths = config.workspace();
    debug!(?options, ?paths, "Resolved fetch options");

    let needs_input = needs_input(&options, &paths);
    let needs_network = needs_input || needs_page(&options, &paths);

    let token = if needs_network {
        require_env(SESSION_TOKEN_VAR, "download puzzle pages and input")?
    } else {
        env_var(SESSION_TOKEN_VAR).unwrap_or_default()
    };

    let cipher = if needs_input {
        let key = require_env(AES_KEY_VAR, "store an encrypted copy of the puzzle input")?;
        Some(Box::new(AesGcmCipher::from_text(&key)?) as Box<dyn DataCipher>)
    } else {
        None
    };

    let source = AocClient::with_base_url(config.remote.base_url.as_str(), token)?;
    let store = match &config.templates.local_path {
        Some(dir) => InMemoryStore::with_overrides(dir)?,
        None => InMemoryStore::with_builtin()?,
    };

    let service = DayService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(source),
        cipher,
        Box::new(store),
        Box::new(SimpleRenderer::new()),
        paths,
    );

    info!(%puzzle, network = needs_network, "Starting fetch");
    let spinner = needs_network.then(|| output.spinner(format!("Fetching {puzzle}"))).flatten();
    let result = service.run(&options);
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let report = result?;

    if output.is_json() {
        output.json(&FetchSummary::new(&puzzle, &report))?;
    } else {
        print_report(&output, &puzzle, &report)?;
    }

    Ok(())
}

/// Day of month at the puzzle release offset, capped at the last day.
pub fn default_day(now: DateTime<Utc>) -> u32 {
    let release_time = now - Duration::hours(RELEASE_OFFSET_HOURS);
    release_time.day().min(LAST_DAY)
}

fn resolve_puzzle(args: &FetchArgs, now: DateTime<Utc>) -> CliResult<PuzzleId> {
    let day = args.day.unwrap_or_else(|| default_day(now));
    let year = match args.year {
        Some(year) => year,
        None => u32::try_from(now.year()).unwrap_or_default(),
    };

    let day = Day::new(day).map_err(FetchDayError::from)?;
    let year = Year::new(year).map_err(FetchDayError::from)?;
    Ok(PuzzleId::new(year, day))
}

fn build_options(args: &FetchArgs, puzzle: PuzzleId, config: &AppConfig) -> FetchOptions {
    let langs: Vec<Lang> = if args.langs.is_empty() {
        config.defaults.langs.clone()
    } else {
        args.langs.iter().copied().map(Lang::from).collect()
    };

    let mut options = FetchOptions::new(puzzle, langs);
    options.force_download = args.download;
    options.no_data = args.no_data;
    options.skip_templates = args.skip_templates;
    options.keep_instructions = args.keep_instructions;
    options.overwrite = args.overwrite;

    if args.part_2 {
        options = options.part_two();
    }
    options
}

fn needs_input(options: &FetchOptions, paths: &WorkspacePaths) -> bool {
    !options.no_data && !paths.data_dir.join(options.puzzle.data_file_name()).exists()
}

fn needs_page(options: &FetchOptions, paths: &WorkspacePaths) -> bool {
    options.force_download || !paths.instructions_file.exists()
}

// ── output ────────────────────────────────────────────────────────────────────

fn print_report(output: &OutputManager, puzzle: &PuzzleId, report: &FetchReport) -> CliResult<()> {
    output.header(&format!("Puzzle {puzzle}"))?;

    match &report.data {
        DataOutcome::Skipped => debug!("Input skipped"),
        DataOutcome::AlreadyPresent(path) => {
            output.info(&format!("Input already present at {}", path.display()))?;
        }
        DataOutcome::Downloaded { plain, encrypted } => {
            output.success(&format!(
                "Saved input to {} (encrypted copy {})",
                plain.display(),
                encrypted.display()
            ))?;
        }
    }

    let origin = match report.instructions {
        InstructionsSource::Cache => "cached page",
        InstructionsSource::Remote => "puzzle page",
    };
    output.success(&format!(
        "Wrote {} README(s) from the {origin}",
        report.readmes.len()
    ))?;

    for stub in &report.stubs {
        output.success(&format!(
            "{}: {} file(s) written",
            stub.lang.display_name(),
            stub.written.len()
        ))?;
        if !stub.skipped.is_empty() {
            output.warning(&format!(
                "{}: kept {} existing file(s), pass --overwrite to replace them",
                stub.lang.display_name(),
                stub.skipped.len()
            ))?;
        }
    }

    Ok(())
}

/// JSON shape of a fetch run.
#[derive(Debug, Serialize)]
struct FetchSummary {
    year: u32,
    day: u32,
    data: DataSummary,
    instructions: &'static str,
    readmes: Vec<PathBuf>,
    stubs: Vec<StubSummary>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum DataSummary {
    Skipped,
    AlreadyPresent { path: PathBuf },
    Downloaded { plain: PathBuf, encrypted: PathBuf },
}

#[derive(Debug, Serialize)]
struct StubSummary {
    lang: Lang,
    written: Vec<PathBuf>,
    skipped: Vec<PathBuf>,
}

impl FetchSummary {
    fn new(puzzle: &PuzzleId, report: &FetchReport) -> Self {
        let data = match &report.data {
            DataOutcome::Skipped => DataSummary::Skipped,
            DataOutcome::AlreadyPresent(path) => DataSummary::AlreadyPresent { path: path.clone() },
            DataOutcome::Downloaded { plain, encrypted } => DataSummary::Downloaded {
                plain: plain.clone(),
                encrypted: encrypted.clone(),
            },
        };

        Self {
            year: puzzle.year().get(),
            day: puzzle.day().get(),
            data,
            instructions: match report.instructions {
                InstructionsSource::Cache => "cache",
                InstructionsSource::Remote => "remote",
            },
            readmes: report.readmes.clone(),
            stubs: report
                .stubs
                .iter()
                .map(|stub| StubSummary {
                    lang: stub.lang,
                    written: stub.written.clone(),
                    skipped: stub.skipped.clone(),
                })
                .collect(),
        }
    }
}
