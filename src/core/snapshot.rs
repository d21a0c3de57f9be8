use std::collections::HashMap;

use tracing::{debug, warn};

use crate::core::person::{build_head, Person, PersonId};
use crate::core::types::{BirthYearRange, Mode};
use crate::parsing::row::CensusRow;

/// The population extracted from one census year
#[derive(Debug, Clone)]
pub struct Snapshot {
    mode: Mode,
    range: BirthYearRange,
    rows: usize,
    rejected_rows: usize,
    people: Vec<Person>,
    /// Heads of household that produced synthesized children, by id
    households: HashMap<PersonId, Person>,
}

impl Snapshot {
    /// People in source row order
    #[must_use]
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.people.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn range(&self) -> BirthYearRange {
        self.range
    }

    /// Number of source rows read, including rejected ones
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Rows skipped for lack of a usable name
    #[must_use]
    pub fn rejected_rows(&self) -> usize {
        self.rejected_rows
    }

    /// Resolve a synthesized child's parent reference.
    #[must_use]
    pub fn parent_of(&self, person: &Person) -> Option<&Person> {
        person.parent.and_then(|id| self.households.get(&id))
    }
}

/// Build the population for one snapshot, preserving input row order.
///
/// Each row goes through the person builder; rows without a usable name are
/// counted and skipped. In children mode the heads are retained only so that
/// [`Snapshot::parent_of`] can resolve their children's parent references.
pub fn load_population<'r, I>(rows: I, mode: Mode, range: BirthYearRange) -> Snapshot
where
    I: IntoIterator<Item = &'r CensusRow>,
{
    let mut snapshot = Snapshot {
        mode,
        range,
        rows: 0,
        rejected_rows: 0,
        people: Vec::new(),
        households: HashMap::new(),
    };

    for (index, row) in rows.into_iter().enumerate() {
        snapshot.rows += 1;

        let Some(head) = build_head(index, row, range) else {
            snapshot.rejected_rows += 1;
            continue;
        };

        snapshot.people.extend(head.expand(mode));
        if mode == Mode::Children && !head.children.is_empty() {
            snapshot.households.insert(head.id, head);
        }
    }

    debug!(
        "Loaded {} people from {} rows ({} rejected, mode {mode}, birth years {range})",
        snapshot.people.len(),
        snapshot.rows,
        snapshot.rejected_rows
    );
    if snapshot.people.is_empty() && snapshot.rows > 0 {
        warn!("No people could be built from {} rows", snapshot.rows);
    }

    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::person::build_person;

    fn range() -> BirthYearRange {
        BirthYearRange::new(1745, 1855).unwrap()
    }

    fn rows() -> Vec<CensusRow> {
        vec![
            CensusRow::named("Jean", "Dupont")
                .with_job("vigneron")
                .with_children("Paul|Marie", "1830|1832"),
            CensusRow::named("·", "Nobody"),
            CensusRow::named("Louise", "Martin").with_children("sans enfant", ""),
            CensusRow::named("Henri", "Favre").with_job("tonnelier").with_children("Louis", "1840"),
        ]
    }

    #[test]
    fn test_head_mode_preserves_row_order() {
        let snapshot = load_population(&rows(), Mode::Head, range());
        let names: Vec<&str> = snapshot.people().iter().map(|p| p.first_name.as_str()).collect();
        assert_eq!(names, ["Jean", "Louise", "Henri"]);
        assert_eq!(snapshot.rows(), 4);
        assert_eq!(snapshot.rejected_rows(), 1);
        assert_eq!(snapshot.people()[2].id, PersonId::head(3));
    }

    #[test]
    fn test_loader_concatenates_builder_output() {
        let rows = rows();
        let snapshot = load_population(&rows, Mode::Children, range());
        let expected: Vec<Person> = rows
            .iter()
            .enumerate()
            .flat_map(|(i, row)| build_person(i, row, Mode::Children, range()))
            .collect();
        assert_eq!(snapshot.people(), expected.as_slice());
    }

    #[test]
    fn test_children_resolve_their_parent() {
        let snapshot = load_population(&rows(), Mode::Children, range());
        let names: Vec<&str> = snapshot.people().iter().map(|p| p.first_name.as_str()).collect();
        assert_eq!(names, ["Paul", "Marie", "Louis"]);

        let louis = &snapshot.people()[2];
        let parent = snapshot.parent_of(louis).unwrap();
        assert_eq!(parent.first_name, "Henri");
        assert_eq!(parent.job, "tonnelier");
    }

    #[test]
    fn test_heads_have_no_parent() {
        let snapshot = load_population(&rows(), Mode::Head, range());
        assert!(snapshot
            .people()
            .iter()
            .all(|p| snapshot.parent_of(p).is_none()));
    }

    #[test]
    fn test_empty_input() {
        let snapshot = load_population(&Vec::<CensusRow>::new(), Mode::Head, range());
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.rows(), 0);
    }
}
