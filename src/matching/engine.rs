use std::ptr;

use serde::Serialize;
use tracing::{debug, info};

use crate::core::person::Person;
use crate::core::types::{BirthYearRange, ConfigError, MatchReason, Mode};
use crate::matching::candidates::{CandidateFinder, CandidateSet};
use crate::matching::similarity::DEFAULT_CUTOFF;

/// A person from the first snapshot linked to one from the second
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedPair<'a> {
    pub person_a: &'a Person,
    pub person_b: &'a Person,
    pub reason: MatchReason,
}

impl TrackedPair<'_> {
    /// Both birth years are known and they disagree
    #[must_use]
    pub fn birth_year_mismatch(&self) -> bool {
        matches!(
            (self.person_a.birth_year, self.person_b.birth_year),
            (Some(a), Some(b)) if a != b
        )
    }
}

/// What one pass over the unmatched people achieved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PassStats {
    /// One-based pass number
    pub pass: usize,
    /// Pairs committed during this pass
    pub matched: usize,
    /// People left with two or more candidates
    pub ambiguities: usize,
    /// Unmatched people in each snapshot once the pass is over
    pub unmatched_a: usize,
    pub unmatched_b: usize,
}

/// Final state of a resolution run
#[derive(Debug, Clone)]
pub struct Resolution<'a> {
    /// Committed pairs in commit order
    pub tracked: Vec<TrackedPair<'a>>,
    pub unmatched_a: Vec<&'a Person>,
    pub unmatched_b: Vec<&'a Person>,
    /// Ambiguities seen in the last pass only
    pub ambiguities: usize,
    pub passes: Vec<PassStats>,
}

impl Resolution<'_> {
    #[must_use]
    pub fn birth_year_mismatches(&self) -> usize {
        self.tracked.iter().filter(|pair| pair.birth_year_mismatch()).count()
    }
}

/// Everything a run between two snapshots needs to know
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackingConfig {
    /// How the first snapshot is expanded; the second always uses [`Mode::Head`]
    pub mode: Mode,
    /// Similarity cutoff for names, origins and streets
    pub cutoff: f64,
    /// Plausible birth years in the first snapshot
    pub range_a: BirthYearRange,
    /// Plausible birth years in the second snapshot
    pub range_b: BirthYearRange,
}

impl TrackingConfig {
    #[must_use]
    pub fn new(mode: Mode, range_a: BirthYearRange, range_b: BirthYearRange) -> Self {
        Self {
            mode,
            cutoff: DEFAULT_CUTOFF,
            range_a,
            range_b,
        }
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidCutoff` unless `0 < cutoff <= 1`.
    pub fn with_cutoff(mut self, cutoff: f64) -> Result<Self, ConfigError> {
        if !(cutoff > 0.0 && cutoff <= 1.0) {
            return Err(ConfigError::InvalidCutoff(cutoff.to_string()));
        }
        self.cutoff = cutoff;
        Ok(self)
    }
}

/// Links two populations one-to-one by repeated elimination.
///
/// Each pass asks the [`CandidateFinder`] about every still-unmatched person
/// of the first population, against the still-unmatched people of the second.
/// A unique candidate is committed immediately and leaves the second
/// population for good, which can settle people that were ambiguous earlier
/// in the pass or in a previous one. Passes repeat until one commits nothing.
///
/// ## Cost
///
/// A pass makes up to `|unmatched_a| * |unmatched_b|` name comparisons. Every
/// pass but the last commits at least one pair, so there are at most
/// `|a| + 1` passes: quadratic per pass, linear in the number of passes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolutionEngine {
    finder: CandidateFinder,
}

impl ResolutionEngine {
    #[must_use]
    pub fn new(cutoff: f64) -> Self {
        Self {
            finder: CandidateFinder::new(cutoff),
        }
    }

    #[must_use]
    pub fn with_config(config: &TrackingConfig) -> Self {
        Self::new(config.cutoff)
    }

    /// Resolve `a` against `b` until a pass makes no progress.
    ///
    /// The input slices are never modified; the working sets borrow from them.
    #[must_use]
    pub fn resolve<'a>(&self, a: &'a [Person], b: &'a [Person]) -> Resolution<'a> {
        let mut unmatched_a: Vec<&'a Person> = a.iter().collect();
        let mut unmatched_b: Vec<&'a Person> = b.iter().collect();
        let mut tracked = Vec::new();
        let mut passes: Vec<PassStats> = Vec::new();

        loop {
            let mut next_pass = Vec::with_capacity(unmatched_a.len());
            let mut matched = 0;
            let mut ambiguities = 0;

            for &person in &unmatched_a {
                let candidates = self.finder.find_candidates(person, &unmatched_b);
                match candidates {
                    CandidateSet::NotFound => next_pass.push(person),
                    CandidateSet::Ambiguous(_) => {
                        ambiguities += 1;
                        next_pass.push(person);
                    }
                    CandidateSet::Unique {
                        person: candidate,
                        reason,
                    } => {
                        tracked.push(TrackedPair {
                            person_a: person,
                            person_b: candidate,
                            reason,
                        });
                        unmatched_b.retain(|other| !ptr::eq(*other, candidate));
                        matched += 1;
                    }
                }
            }
            unmatched_a = next_pass;

            let stats = PassStats {
                pass: passes.len() + 1,
                matched,
                ambiguities,
                unmatched_a: unmatched_a.len(),
                unmatched_b: unmatched_b.len(),
            };
            debug!(
                "Pass {}: {} matched, {} ambiguous, {} + {} unmatched",
                stats.pass, stats.matched, stats.ambiguities, stats.unmatched_a, stats.unmatched_b
            );
            passes.push(stats);

            if matched == 0 {
                break;
            }
        }

        let ambiguities = passes.last().map_or(0, |p| p.ambiguities);
        info!(
            "Tracked {} people in {} passes ({} ambiguities left)",
            tracked.len(),
            passes.len(),
            ambiguities
        );

        Resolution {
            tracked,
            unmatched_a,
            unmatched_b,
            ambiguities,
            passes,
        }
    }
}
