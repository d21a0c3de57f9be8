//! Core data types for census record linkage.
//!
//! - [`Person`]: one individual as recorded in one census year
//! - [`Snapshot`]: the population built from one census dataset
//! - [`Mode`], [`MatchReason`], [`BirthYearRange`]: configuration and result tags
//!
//! ## Building people
//!
//! Each census row describes a household. In [`Mode::Head`] it yields the
//! head of household; in [`Mode::Children`] it yields one person per listed
//! child, who inherits the household's last name and address and refers back
//! to the head through a [`PersonId`].
//!
//! Malformed data never fails a load: unreadable birth years become `None`,
//! and rows without a usable first and last name are skipped.

pub mod person;
pub mod snapshot;
pub mod types;
