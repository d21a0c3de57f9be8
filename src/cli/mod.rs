//! Command-line interface for census-tracker.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **track**: Link the people of one census snapshot to those of a later one
//!
//! ## Usage
//!
//! ```text
//! # Follow heads of household from 1835 to 1855
//! census-tracker track 1835.csv 1855.csv --year-a 1835 --year-b 1855
//!
//! # Follow the children of 1835 households into 1855
//! census-tracker track 1835.csv 1855.csv --year-a 1835 --year-b 1855 --mode children
//!
//! # Explicit birth-year windows and JSON output for scripting
//! census-tracker --format json track 1835.csv 1855.csv --range-a 1725:1835 --range-b 1745:1855
//! ```

use clap::{Parser, Subcommand};

pub mod track;

#[derive(Parser)]
#[command(name = "census-tracker")]
#[command(version)]
#[command(about = "Link the same people across successive census snapshots")]
#[command(
    long_about = "census-tracker follows individuals from one census year to a later one.\n\nIt matches people by fuzzy name similarity and breaks ties with origin, birth year and street, committing a match only when exactly one candidate remains:\n- Heads of household can be followed directly\n- Children listed in a household can be followed as adults\n- Every match is one-to-one and reports the discriminator that settled it"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Track people from a first snapshot into a second one
    Track(track::TrackArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
