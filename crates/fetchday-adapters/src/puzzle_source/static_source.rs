//! Canned puzzle pages for tests and offline runs.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use fetchday_core::{
    application::{ApplicationError, ports::PuzzleSource},
    domain::PuzzleId,
    error::FetchDayResult,
};

use super::DEFAULT_BASE_URL;

#[derive(Debug, Default)]
struct Page {
    instructions: Option<String>,
    input: Option<String>,
}

/// Serves pages registered up front. Missing pages behave like an
/// unpublished puzzle.
#[derive(Debug, Clone, Default)]
pub struct StaticPuzzleSource {
    pages: Arc<RwLock<HashMap<PuzzleId, Page>>>,
    requests: Arc<RwLock<Vec<String>>>,
}

impl StaticPuzzleSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_instructions(self, puzzle: PuzzleId, html: impl Into<String>) -> Self {
        if let Ok(mut pages) = self.pages.write() {
            pages.entry(puzzle).or_default().instructions = Some(html.into());
        }
        self
    }

    pub fn with_input(self, puzzle: PuzzleId, input: impl Into<String>) -> Self {
        if let Ok(mut pages) = self.pages.write() {
            pages.entry(puzzle).or_default().input = Some(input.into());
        }
        self
    }

    /// Paths requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .read()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    fn serve(
        &self,
        puzzle: &PuzzleId,
        path: String,
        pick: impl Fn(&Page) -> Option<&String>,
    ) -> FetchDayResult<String> {
        self.requests
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?
            .push(path);

        let pages = self
            .pages
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        pages.get(puzzle).and_then(pick).cloned().ok_or_else(|| {
            ApplicationError::PuzzleNotAvailable {
                puzzle: puzzle.to_string(),
            }
            .into()
        })
    }
}

impl PuzzleSource for StaticPuzzleSource {
    fn fetch_instructions(&self, puzzle: &PuzzleId) -> FetchDayResult<String> {
        self.serve(puzzle, puzzle.puzzle_path(), |page| page.instructions.as_ref())
    }

    fn fetch_input(&self, puzzle: &PuzzleId) -> FetchDayResult<String> {
        self.serve(puzzle, puzzle.input_path(), |page| page.input.as_ref())
    }

    fn puzzle_url(&self, puzzle: &PuzzleId) -> String {
        format!("{}{}", DEFAULT_BASE_URL, puzzle.puzzle_path())
    }
}
