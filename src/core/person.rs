use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::types::{is_not_recorded, BirthYearRange, Mode, CHILD_DELIMITER, NO_CHILDREN};
use crate::matching::similarity::close_enough;
use crate::parsing::row::CensusRow;
use crate::utils::validation::parse_in_range;

/// Stable identity of a person within one snapshot.
///
/// Derived from the source row and, for synthesized children, the child's
/// position in that row. Parents are referenced through this id rather than
/// owned, so a child can never keep its head alive or form a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PersonId {
    /// Zero-based index of the source row
    pub row: usize,
    /// Position in the row's children list, `None` for the head of household
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child: Option<usize>,
}

impl PersonId {
    #[must_use]
    pub fn head(row: usize) -> Self {
        Self { row, child: None }
    }

    #[must_use]
    pub fn child(row: usize, slot: usize) -> Self {
        Self {
            row,
            child: Some(slot),
        }
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.child {
            Some(slot) => write!(f, "row {} child {}", self.row, slot),
            None => write!(f, "row {}", self.row),
        }
    }
}

/// A child listed on a head-of-household row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<i32>,
}

/// One individual as recorded in one census year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,

    pub first_name: String,

    pub last_name: String,

    /// Always inside the snapshot's plausible range when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<i32>,

    /// Empty when not recorded
    pub street: String,

    pub house_number: String,

    /// Occupation; reported, never matched on
    pub job: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Child>,

    /// Head of household this person was synthesized from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<PersonId>,
}

impl Person {
    /// Both last and first names are close enough under `cutoff`.
    #[must_use]
    pub fn is_close_to(&self, other: &Person, cutoff: f64) -> bool {
        close_enough(&self.last_name, &other.last_name, cutoff)
            && close_enough(&self.first_name, &other.first_name, cutoff)
    }

    #[must_use]
    pub fn is_synthesized_child(&self) -> bool {
        self.parent.is_some()
    }

    /// One person per listed child, living at this person's address.
    ///
    /// Children with a blank name are skipped; their slot is still counted so
    /// the ids of their siblings stay aligned with the source row.
    #[must_use]
    pub fn spawn_children(&self) -> Vec<Person> {
        self.children
            .iter()
            .enumerate()
            .filter(|(_, child)| !is_not_recorded(&child.first_name))
            .map(|(slot, child)| Person {
                id: PersonId::child(self.id.row, slot),
                first_name: child.first_name.clone(),
                last_name: self.last_name.clone(),
                birth_year: child.birth_year,
                street: self.street.clone(),
                house_number: self.house_number.clone(),
                job: String::new(),
                origin: self.origin.clone(),
                children: Vec::new(),
                parent: Some(self.id),
            })
            .collect()
    }

    /// The people this head-of-household record contributes under `mode`.
    #[must_use]
    pub fn expand(&self, mode: Mode) -> Vec<Person> {
        match mode {
            Mode::Head => vec![self.clone()],
            Mode::Children => self.spawn_children(),
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)?;
        if let Some(year) = self.birth_year {
            write!(f, " ({year})")?;
        }
        if !self.street.is_empty() {
            write!(f, ", {} {}", self.house_number, self.street)?;
        }
        Ok(())
    }
}

/// Build the head-of-household person from row `index`.
///
/// Returns `None` if the first or last name is missing or not recorded.
#[must_use]
pub fn build_head(index: usize, row: &CensusRow, range: BirthYearRange) -> Option<Person> {
    let (Some(first_name), Some(last_name)) = (
        recorded(row.first_name.as_deref()),
        recorded(row.last_name.as_deref()),
    ) else {
        debug!("Row {index} has no usable name, skipping");
        return None;
    };

    Some(Person {
        id: PersonId::head(index),
        first_name,
        last_name,
        birth_year: parse_year(row.birth_year.as_deref(), range),
        street: recorded(row.street.as_deref()).unwrap_or_default(),
        house_number: recorded(row.house_number.as_deref()).unwrap_or_default(),
        job: recorded(row.job.as_deref()).unwrap_or_default(),
        origin: recorded(row.origin.as_deref()),
        children: parse_children(
            index,
            row.children_first_names.as_deref(),
            row.children_birth_years.as_deref(),
            range,
        ),
        parent: None,
    })
}

/// Build the people contributed by row `index` under `mode`.
///
/// Empty if the row has no usable name; in children mode, also empty if the
/// row lists no children.
#[must_use]
pub fn build_person(index: usize, row: &CensusRow, mode: Mode, range: BirthYearRange) -> Vec<Person> {
    build_head(index, row, range)
        .map(|head| head.expand(mode))
        .unwrap_or_default()
}

fn recorded(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !is_not_recorded(v))
        .map(|v| v.trim().to_string())
}

fn parse_year(raw: Option<&str>, range: BirthYearRange) -> Option<i32> {
    raw.and_then(|raw| parse_in_range(raw, range.min(), range.max()))
}

/// Split the children fields into index-aligned (name, birth year) entries.
///
/// The length check runs on the raw split, before any year is parsed: if the
/// two lists disagree in length no year can be attributed safely, so every
/// child gets `None`. With equal lengths each year is parsed on its own.
fn parse_children(
    index: usize,
    names: Option<&str>,
    birth_years: Option<&str>,
    range: BirthYearRange,
) -> Vec<Child> {
    let Some(names) = names.filter(|n| !is_not_recorded(n) && n.trim() != NO_CHILDREN) else {
        return Vec::new();
    };

    let names: Vec<&str> = names.split(CHILD_DELIMITER).collect();
    let years: Vec<&str> = birth_years.unwrap_or("").split(CHILD_DELIMITER).collect();

    if names.len() != years.len() {
        debug!(
            "Row {index}: {} children but {} birth years, ignoring birth years",
            names.len(),
            years.len()
        );
        return names
            .into_iter()
            .map(|name| Child {
                first_name: name.trim().to_string(),
                birth_year: None,
            })
            .collect();
    }

    names
        .into_iter()
        .zip(years)
        .map(|(name, year)| Child {
            first_name: name.trim().to_string(),
            birth_year: parse_year(Some(year), range),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range() -> BirthYearRange {
        BirthYearRange::new(1725, 1835).unwrap()
    }

    fn household() -> CensusRow {
        CensusRow::named("Jean", "Dupont")
            .with_birth_year("1790")
            .with_address("Rue de Bourg", "12")
            .with_job("boulanger")
            .with_origin("Lausanne")
            .with_children("Paul|Marie", "1820|1822")
    }

    #[test]
    fn test_build_head() {
        let person = build_head(3, &household(), range()).unwrap();
        assert_eq!(person.id, PersonId::head(3));
        assert_eq!(person.first_name, "Jean");
        assert_eq!(person.last_name, "Dupont");
        assert_eq!(person.birth_year, Some(1790));
        assert_eq!(person.street, "Rue de Bourg");
        assert_eq!(person.house_number, "12");
        assert_eq!(person.job, "boulanger");
        assert_eq!(person.origin.as_deref(), Some("Lausanne"));
        assert_eq!(person.children.len(), 2);
        assert!(person.parent.is_none());
    }

    #[test]
    fn test_missing_or_sentinel_name_yields_nothing() {
        let rows = [
            CensusRow::named("·", "Dupont"),
            CensusRow::named("Jean", "·"),
            CensusRow::named("", "Dupont"),
            CensusRow {
                last_name: Some("Dupont".to_string()),
                ..CensusRow::default()
            },
        ];
        for row in &rows {
            assert!(build_head(0, row, range()).is_none());
            assert!(build_person(0, row, Mode::Head, range()).is_empty());
            assert!(build_person(0, row, Mode::Children, range()).is_empty());
        }
    }

    #[test]
    fn test_birth_year_outside_range_is_absent() {
        for raw in ["1700", "1836", "17xx", "", "vers 1800"] {
            let row = CensusRow::named("Jean", "Dupont").with_birth_year(raw);
            let person = build_head(0, &row, range()).unwrap();
            assert_eq!(person.birth_year, None, "raw birth year {raw:?}");
        }
    }

    #[test]
    fn test_head_mode_returns_one_person() {
        let people = build_person(0, &household(), Mode::Head, range());
        assert_eq!(people.len(), 1);
        assert_eq!(people[0].job, "boulanger");
    }

    #[test]
    fn test_children_mode_synthesizes_children() {
        let people = build_person(7, &household(), Mode::Children, range());
        assert_eq!(people.len(), 2);

        let paul = &people[0];
        assert_eq!(paul.id, PersonId::child(7, 0));
        assert_eq!(paul.first_name, "Paul");
        assert_eq!(paul.last_name, "Dupont");
        assert_eq!(paul.birth_year, Some(1820));
        assert_eq!(paul.street, "Rue de Bourg");
        assert_eq!(paul.house_number, "12");
        assert_eq!(paul.job, "");
        assert_eq!(paul.origin.as_deref(), Some("Lausanne"));
        assert_eq!(paul.parent, Some(PersonId::head(7)));
        assert!(paul.children.is_empty());

        assert_eq!(people[1].first_name, "Marie");
        assert_eq!(people[1].birth_year, Some(1822));
    }

    #[test]
    fn test_equal_length_split_parses_each_year() {
        let row = CensusRow::named("Jean", "Dupont").with_children("Paul|Marie", "1820|bad");
        let people = build_person(0, &row, Mode::Children, range());
        assert_eq!(people[0].birth_year, Some(1820));
        assert_eq!(people[1].birth_year, None);
    }

    #[test]
    fn test_unequal_length_split_drops_all_years() {
        let row = CensusRow::named("Jean", "Dupont").with_children("Paul|Marie", "1820");
        let head = build_head(0, &row, range()).unwrap();
        assert_eq!(head.children.len(), 2);
        assert!(head.children.iter().all(|c| c.birth_year.is_none()));
    }

    #[test]
    fn test_no_children_markers() {
        for marker in ["sans enfant", "·", ""] {
            let row = CensusRow::named("Jean", "Dupont").with_children(marker, "");
            let head = build_head(0, &row, range()).unwrap();
            assert!(head.children.is_empty(), "marker {marker:?}");
            assert!(build_person(0, &row, Mode::Children, range()).is_empty());
        }
    }

    #[test]
    fn test_missing_children_years_field() {
        let mut row = CensusRow::named("Jean", "Dupont");
        row.children_first_names = Some("Paul".to_string());
        let head = build_head(0, &row, range()).unwrap();
        assert_eq!(
            head.children,
            vec![Child {
                first_name: "Paul".to_string(),
                birth_year: None
            }]
        );
    }

    #[test]
    fn test_blank_child_keeps_sibling_slots() {
        let row = CensusRow::named("Jean", "Dupont").with_children("Paul||Marie", "1820|1821|1822");
        let people = build_person(0, &row, Mode::Children, range());
        assert_eq!(people.len(), 2);
        assert_eq!(people[1].id, PersonId::child(0, 2));
        assert_eq!(people[1].birth_year, Some(1822));
    }

    #[test]
    fn test_names_are_close_in_both_parts() {
        let a = build_head(0, &CensusRow::named("Jean", "Dupont"), range()).unwrap();
        let b = build_head(1, &CensusRow::named("JEAN", "Dupond"), range()).unwrap();
        let c = build_head(2, &CensusRow::named("Pierre", "Dupont"), range()).unwrap();
        assert!(a.is_close_to(&b, 0.8));
        assert!(!a.is_close_to(&c, 0.8));
    }
}
