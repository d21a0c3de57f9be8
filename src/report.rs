//! Human-readable summaries of a resolution run.

use std::io::{self, Write};

use serde::Serialize;

use crate::core::person::Person;
use crate::core::snapshot::Snapshot;
use crate::core::types::{MatchReason, Mode};
use crate::matching::engine::{PassStats, Resolution, TrackedPair};

/// Counts describing one run
#[derive(Debug, Clone, Serialize)]
pub struct TrackingSummary {
    pub label_a: String,
    pub label_b: String,
    pub mode: Mode,
    pub rows_a: usize,
    pub people_a: usize,
    pub rows_b: usize,
    pub people_b: usize,
    pub tracked: usize,
    pub ambiguities: usize,
    pub birth_year_mismatches: usize,
    pub unmatched_a: usize,
    pub unmatched_b: usize,
    pub passes: Vec<PassStats>,
}

/// The fields of a person worth showing next to a match
#[derive(Debug, Clone, Serialize)]
pub struct PersonSummary {
    pub first_name: String,
    pub last_name: String,
    pub birth_year: Option<i32>,
    pub street: String,
    pub house_number: String,
    pub job: String,
    pub origin: Option<String>,
}

impl From<&Person> for PersonSummary {
    fn from(person: &Person) -> Self {
        Self {
            first_name: person.first_name.clone(),
            last_name: person.last_name.clone(),
            birth_year: person.birth_year,
            street: person.street.clone(),
            house_number: person.house_number.clone(),
            job: person.job.clone(),
            origin: person.origin.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PairReport {
    pub reason: MatchReason,
    pub first: PersonSummary,
    pub second: PersonSummary,
    pub birth_year_mismatch: bool,
    /// Head of household of the first person, in children mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<PersonSummary>,
}

/// Everything a run produced, ready to print
#[derive(Debug, Clone, Serialize)]
pub struct TrackingReport {
    pub summary: TrackingSummary,
    pub pairs: Vec<PairReport>,
}

impl TrackingReport {
    #[must_use]
    pub fn build(
        label_a: &str,
        snapshot_a: &Snapshot,
        label_b: &str,
        snapshot_b: &Snapshot,
        resolution: &Resolution<'_>,
    ) -> Self {
        let pairs = resolution
            .tracked
            .iter()
            .map(|pair| pair_report(pair, snapshot_a))
            .collect();

        Self {
            summary: TrackingSummary {
                label_a: label_a.to_string(),
                label_b: label_b.to_string(),
                mode: snapshot_a.mode(),
                rows_a: snapshot_a.rows(),
                people_a: snapshot_a.len(),
                rows_b: snapshot_b.rows(),
                people_b: snapshot_b.len(),
                tracked: resolution.tracked.len(),
                ambiguities: resolution.ambiguities,
                birth_year_mismatches: resolution.birth_year_mismatches(),
                unmatched_a: resolution.unmatched_a.len(),
                unmatched_b: resolution.unmatched_b.len(),
                passes: resolution.passes.clone(),
            },
            pairs,
        }
    }

    /// # Errors
    ///
    /// Returns any error from writing to `out`.
    pub fn write_text(&self, out: &mut impl Write) -> io::Result<()> {
        let s = &self.summary;

        writeln!(out, "Tracking Results")?;
        writeln!(out, "{}", "=".repeat(60))?;

        for pair in &self.pairs {
            writeln!(
                out,
                "{} -> {} [{}]",
                describe(&pair.first),
                describe(&pair.second),
                pair.reason
            )?;
            if let Some(parent) = &pair.parent {
                writeln!(
                    out,
                    "  from {} and my father was from {}",
                    or_unknown(pair.second.origin.as_deref()),
                    or_unknown(parent.origin.as_deref())
                )?;
                writeln!(
                    out,
                    "  my job is {} and my father was a {}",
                    or_unknown(Some(pair.second.job.as_str())),
                    or_unknown(Some(parent.job.as_str()))
                )?;
            }
            if pair.birth_year_mismatch {
                writeln!(out, "  ^ birth year mismatch")?;
            }
        }

        let population = match s.mode {
            Mode::Head => "people",
            Mode::Children => "children",
        };
        writeln!(out, "\nSummary:")?;
        writeln!(out, "  Rows in {}: {}", s.label_a, s.rows_a)?;
        writeln!(out, "  Number of {population} in {}: {}", s.label_a, s.people_a)?;
        writeln!(out, "  Rows in {}: {}", s.label_b, s.rows_b)?;
        writeln!(out, "  Number of people in {}: {}", s.label_b, s.people_b)?;
        writeln!(out, "  Tracked people: {}", s.tracked)?;
        writeln!(out, "  Ambiguities: {}", s.ambiguities)?;
        writeln!(out, "  Birth year mismatches: {}", s.birth_year_mismatches)?;
        writeln!(out, "  Passes: {}", s.passes.len())?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if serialization or writing to `out` fails.
    pub fn write_json(&self, out: &mut impl Write) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)
    }

    /// # Errors
    ///
    /// Returns any error from writing to `out`.
    pub fn write_tsv(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(
            out,
            "first_name_a\tlast_name_a\tbirth_year_a\tfirst_name_b\tlast_name_b\tbirth_year_b\treason\tbirth_year_mismatch\tjob_a\tjob_b\tparent_job"
        )?;
        for pair in &self.pairs {
            writeln!(
                out,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                pair.first.first_name,
                pair.first.last_name,
                year(pair.first.birth_year),
                pair.second.first_name,
                pair.second.last_name,
                year(pair.second.birth_year),
                pair.reason,
                pair.birth_year_mismatch,
                pair.first.job,
                pair.second.job,
                pair.parent.as_ref().map_or("", |p| p.job.as_str()),
            )?;
        }
        Ok(())
    }
}

fn pair_report(pair: &TrackedPair<'_>, snapshot_a: &Snapshot) -> PairReport {
    PairReport {
        reason: pair.reason,
        first: pair.person_a.into(),
        second: pair.person_b.into(),
        birth_year_mismatch: pair.birth_year_mismatch(),
        parent: snapshot_a.parent_of(pair.person_a).map(PersonSummary::from),
    }
}

fn describe(person: &PersonSummary) -> String {
    format!(
        "{} {} ({}), {} {}",
        person.first_name,
        person.last_name,
        or_unknown(person.birth_year.map(|y| y.to_string()).as_deref()),
        person.house_number,
        person.street
    )
}

fn or_unknown(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "?",
    }
}

fn year(value: Option<i32>) -> String {
    value.map(|y| y.to_string()).unwrap_or_default()
}
