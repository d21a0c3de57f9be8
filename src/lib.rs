//! # census-tracker
//!
//! A library for following the same people across successive historical census snapshots.
//!
//! Census transcriptions from different years rarely agree exactly: names are spelled
//! differently, birth years are missing or misread, and households move. Yet the same
//! baker living on the same street in 1835 and 1855 is usually one person.
//!
//! `census-tracker` builds a population per census year and links the two populations
//! one-to-one, committing a link only when exactly one candidate is left.
//!
//! ## Features
//!
//! - **Fuzzy names**: Case-insensitive edit-similarity on first and last names
//! - **Cascading tie-breaks**: Origin, then birth year, then street
//! - **Fixed-point resolution**: Claimed people free up ambiguous cases in later passes
//! - **Children tracking**: Follows children listed in a household into the next census
//! - **Robust parsing**: Unreadable fields degrade to "unknown" instead of failing
//!
//! ## Example
//!
//! ```rust
//! use census_tracker::core::types::{BirthYearRange, MatchReason, Mode};
//! use census_tracker::{load_population, CensusRow, ResolutionEngine};
//!
//! let range_a = BirthYearRange::new(1725, 1835).unwrap();
//! let range_b = BirthYearRange::new(1745, 1855).unwrap();
//!
//! let a = load_population(
//!     &[CensusRow::named("Jean", "Dupont").with_birth_year("1800")],
//!     Mode::Head,
//!     range_a,
//! );
//! let b = load_population(
//!     &[
//!         CensusRow::named("Jean", "Dupont").with_birth_year("1800"),
//!         CensusRow::named("Jean", "Dupont").with_birth_year("1801"),
//!     ],
//!     Mode::Head,
//!     range_b,
//! );
//!
//! let resolution = ResolutionEngine::default().resolve(a.people(), b.people());
//! assert_eq!(resolution.tracked[0].reason, MatchReason::BirthYear);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: People, snapshots and configuration types
//! - [`matching`]: Name similarity, candidate finding and the resolution engine
//! - [`parsing`]: Reading census files into the uniform row schema
//! - [`report`]: Summaries of a resolution run
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod report;
pub mod utils;

// Re-export commonly used types for convenience
pub use core::person::{build_head, build_person, Person, PersonId};
pub use core::snapshot::{load_population, Snapshot};
pub use core::types::*;
pub use matching::engine::{Resolution, ResolutionEngine, TrackedPair, TrackingConfig};
pub use matching::similarity::close_enough;
pub use parsing::row::CensusRow;
pub use report::TrackingReport;
