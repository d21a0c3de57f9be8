use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Markers the transcribers used for a field that was not recorded.
/// The second form is the same dot after a Latin-1/UTF-8 mix-up.
pub const NOT_RECORDED: &[&str] = &["·", "Â·"];

/// Children field value meaning "this household has no children".
pub const NO_CHILDREN: &str = "sans enfant";

/// Separator between entries of the children name/birth-year fields.
pub const CHILD_DELIMITER: char = '|';

/// Returns true if a raw field value carries no information.
#[must_use]
pub fn is_not_recorded(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || NOT_RECORDED.contains(&value)
}

/// Invalid tracking configuration. Always fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unsupported mode '{0}' (expected 'head' or 'children')")]
    UnsupportedMode(String),

    #[error("Invalid birth year range: minimum {min} is greater than maximum {max}")]
    InvertedRange { min: i32, max: i32 },

    #[error("Invalid birth year range '{0}' (expected MIN:MAX)")]
    MalformedRange(String),

    #[error("Similarity cutoff must be in (0, 1], got {0}")]
    InvalidCutoff(String),
}

/// How head-of-household rows are turned into people
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// One person per row: the head of household
    #[default]
    Head,
    /// One person per listed child; the head only serves as their parent
    Children,
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "head" | "normal" => Ok(Self::Head),
            "children" => Ok(Self::Children),
            _ => Err(ConfigError::UnsupportedMode(s.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Head => write!(f, "head"),
            Self::Children => write!(f, "children"),
        }
    }
}

/// Discriminator that settled a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchReason {
    Name,
    Origin,
    BirthYear,
    Street,
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Origin => write!(f, "origin"),
            Self::BirthYear => write!(f, "birth_year"),
            Self::Street => write!(f, "street"),
        }
    }
}

/// Inclusive range of plausible birth years for one snapshot.
///
/// There is no default: each comparison supplies its own bounds, usually
/// derived from the census year with [`BirthYearRange::for_census`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthYearRange {
    min: i32,
    max: i32,
}

impl BirthYearRange {
    /// # Errors
    ///
    /// Returns `ConfigError::InvertedRange` if `min > max`.
    pub fn new(min: i32, max: i32) -> Result<Self, ConfigError> {
        if min > max {
            return Err(ConfigError::InvertedRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Birth years from `span` years before the census up to the census year.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvertedRange` if `span` is negative.
    pub fn for_census(census_year: i32, span: i32) -> Result<Self, ConfigError> {
        Self::new(census_year.saturating_sub(span), census_year)
    }

    #[must_use]
    pub fn min(&self) -> i32 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> i32 {
        self.max
    }

    #[must_use]
    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }
}

impl FromStr for BirthYearRange {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ConfigError::MalformedRange(s.to_string());
        let (min, max) = s.split_once(':').ok_or_else(malformed)?;
        let min = min.trim().parse().map_err(|_| malformed())?;
        let max = max.trim().parse().map_err(|_| malformed())?;
        Self::new(min, max)
    }
}

impl fmt::Display for BirthYearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.min, self.max)
    }
}
