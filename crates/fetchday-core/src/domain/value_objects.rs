//! Domain value objects: Day, Year, Lang, PuzzleId.
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! Range checks happen at construction, so a `Day` or `Year` in hand is
//! always valid.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// First year the puzzle series was published.
pub const FIRST_YEAR: u32 = 2015;

/// Last puzzle day in a series.
pub const LAST_DAY: u32 = 25;

// ── Day ───────────────────────────────────────────────────────────────────────

/// A puzzle day, 1..=25.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(u32);

impl Day {
    pub fn new(day: u32) -> Result<Self, DomainError> {
        if (1..=LAST_DAY).contains(&day) {
            Ok(Self(day))
        } else {
            Err(DomainError::InvalidDay { day })
        }
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Year ──────────────────────────────────────────────────────────────────────

/// A puzzle series year, 2015 onwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Year(u32);

impl Year {
    pub fn new(year: u32) -> Result<Self, DomainError> {
        if year >= FIRST_YEAR {
            Ok(Self(year))
        } else {
            Err(DomainError::InvalidYear { year })
        }
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Lang ──────────────────────────────────────────────────────────────────────

/// A language stubs are generated for.
///
/// Ordering follows the declaration order, which is also the order stub
/// directories are written in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Go,
    Rs,
    Ts,
}

impl Lang {
    pub const ALL: [Lang; 3] = [Lang::Go, Lang::Rs, Lang::Ts];

    /// Short name, also the top-level directory for this language's stubs.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Go => "go",
            Self::Rs => "rs",
            Self::Ts => "ts",
        }
    }

    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Go => "Go",
            Self::Rs => "Rust",
            Self::Ts => "TypeScript",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lang {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "go" | "golang" => Ok(Self::Go),
            "rs" | "rust" => Ok(Self::Rs),
            "ts" | "typescript" => Ok(Self::Ts),
            other => Err(DomainError::UnknownLang(other.to_string())),
        }
    }
}

// ── PuzzleId ──────────────────────────────────────────────────────────────────

/// Identifies one puzzle: a day within a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PuzzleId {
    year: Year,
    day: Day,
}

impl PuzzleId {
    pub const fn new(year: Year, day: Day) -> Self {
        Self { year, day }
    }

    pub const fn year(&self) -> Year {
        self.year
    }

    pub const fn day(&self) -> Day {
        self.day
    }

    /// `day_02`: directory, crate and data-file stem.
    pub fn package_name(&self) -> String {
        format!("day_{:02}", self.day.get())
    }

    /// `Day 02`: used for benchmark group names.
    pub fn display_name(&self) -> String {
        format!("Day {:02}", self.day.get())
    }

    /// Path of the puzzle page relative to the remote base URL.
    pub fn puzzle_path(&self) -> String {
        format!("/{}/day/{}", self.year, self.day)
    }

    /// Path of the personal input relative to the remote base URL.
    pub fn input_path(&self) -> String {
        format!("{}/input", self.puzzle_path())
    }

    /// Name of the plaintext data file.
    pub fn data_file_name(&self) -> String {
        format!("{}.txt", self.package_name())
    }

    /// Name of the encrypted data file.
    pub fn encrypted_data_file_name(&self) -> String {
        format!("{}{}", self.package_name(), ENCRYPTED_SUFFIX)
    }
}

impl fmt::Display for PuzzleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} day {}", self.year, self.day)
    }
}

/// Suffix of encrypted data files.
pub const ENCRYPTED_SUFFIX: &str = ".enc.txt";
