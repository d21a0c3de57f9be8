//! Entity resolution between two census snapshots.
//!
//! - [`close_enough`](similarity::close_enough): fuzzy, case-insensitive string equality
//! - [`CandidateFinder`]: narrows a population to the plausible matches for one person
//! - [`ResolutionEngine`]: links two populations one-to-one, pass after pass
//!
//! ## Discriminators
//!
//! Candidates are narrowed by a fixed cascade, each stage applied only while
//! more than one candidate remains and only if the query person has the field:
//!
//! 1. **Name**: first and last names both close enough
//! 2. **Origin**: birthplace close enough
//! 3. **Birth year**: exact equality
//! 4. **Street**: street name close enough
//!
//! The stage that isolates a single candidate becomes the pair's
//! [`MatchReason`](crate::core::types::MatchReason).
//!
//! ## Example
//!
//! ```rust
//! use census_tracker::core::types::{BirthYearRange, Mode};
//! use census_tracker::{load_population, CensusRow, ResolutionEngine};
//!
//! let range_a = BirthYearRange::new(1725, 1835).unwrap();
//! let range_b = BirthYearRange::new(1745, 1855).unwrap();
//!
//! let a = load_population(&[CensusRow::named("Jean", "Dupont")], Mode::Head, range_a);
//! let b = load_population(&[CensusRow::named("Jean", "Dupond")], Mode::Head, range_b);
//!
//! let resolution = ResolutionEngine::default().resolve(a.people(), b.people());
//! assert_eq!(resolution.tracked.len(), 1);
//! ```

pub mod candidates;
pub mod engine;
pub mod similarity;

pub use candidates::{CandidateFinder, CandidateSet};
pub use engine::{PassStats, Resolution, ResolutionEngine, TrackedPair, TrackingConfig};
