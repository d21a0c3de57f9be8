use crate::core::person::Person;
use crate::core::types::MatchReason;
use crate::matching::similarity::{close_enough, DEFAULT_CUTOFF};

/// Outcome of looking for one person among the remaining candidates
#[derive(Debug, Clone, PartialEq)]
pub enum CandidateSet<'p> {
    /// Nobody has a close enough name
    NotFound,
    /// Exactly one candidate survived; `reason` is the stage that isolated it
    Unique {
        person: &'p Person,
        reason: MatchReason,
    },
    /// Two or more candidates survived every applicable stage
    Ambiguous(Vec<&'p Person>),
}

impl<'p> CandidateSet<'p> {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::NotFound => 0,
            Self::Unique { .. } => 1,
            Self::Ambiguous(candidates) => candidates.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// The surviving candidates with their reason tag, `None` when untagged.
    #[must_use]
    pub fn into_vec(self) -> Vec<(&'p Person, Option<MatchReason>)> {
        match self {
            Self::NotFound => Vec::new(),
            Self::Unique { person, reason } => vec![(person, Some(reason))],
            Self::Ambiguous(candidates) => candidates.into_iter().map(|p| (p, None)).collect(),
        }
    }
}

/// Narrows a population down to the plausible matches for one person.
///
/// Stages run in order (name, origin, birth year, street), each one only
/// while more than one candidate is left, and only when the query person
/// actually has the field. A stage that keeps nobody is ignored: the
/// working set can shrink but never grow, and missing data is never taken
/// as evidence.
#[derive(Debug, Clone, Copy)]
pub struct CandidateFinder {
    cutoff: f64,
}

impl Default for CandidateFinder {
    fn default() -> Self {
        Self::new(DEFAULT_CUTOFF)
    }
}

impl CandidateFinder {
    #[must_use]
    pub fn new(cutoff: f64) -> Self {
        Self { cutoff }
    }

    #[must_use]
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Find the candidates for `person` among `remaining`, keeping their order.
    #[must_use]
    pub fn find_candidates<'p>(&self, person: &Person, remaining: &[&'p Person]) -> CandidateSet<'p> {
        let mut candidates: Vec<&'p Person> = remaining
            .iter()
            .copied()
            .filter(|candidate| person.is_close_to(candidate, self.cutoff))
            .collect();

        match candidates.len() {
            0 => return CandidateSet::NotFound,
            1 => {
                return CandidateSet::Unique {
                    person: candidates[0],
                    reason: MatchReason::Name,
                }
            }
            _ => {}
        }

        if let Some(origin) = person.origin.as_deref() {
            let same_origin = |c: &Person| {
                c.origin
                    .as_deref()
                    .is_some_and(|other| close_enough(origin, other, self.cutoff))
            };
            if let Some(found) = narrow(&mut candidates, MatchReason::Origin, same_origin) {
                return found;
            }
        }

        if let Some(year) = person.birth_year {
            let same_year = |c: &Person| c.birth_year == Some(year);
            if let Some(found) = narrow(&mut candidates, MatchReason::BirthYear, same_year) {
                return found;
            }
        }

        if !person.street.is_empty() {
            let same_street = |c: &Person| close_enough(&person.street, &c.street, self.cutoff);
            if let Some(found) = narrow(&mut candidates, MatchReason::Street, same_street) {
                return found;
            }
        }

        CandidateSet::Ambiguous(candidates)
    }
}

/// Apply one discriminator stage.
///
/// Returns the unique survivor if there is one. Otherwise the working set is
/// replaced by the survivors when there are several, and left untouched when
/// there are none.
fn narrow<'p>(
    candidates: &mut Vec<&'p Person>,
    reason: MatchReason,
    keep: impl Fn(&Person) -> bool,
) -> Option<CandidateSet<'p>> {
    let survivors: Vec<&'p Person> = candidates.iter().copied().filter(|c| keep(c)).collect();

    match survivors.len() {
        0 => None,
        1 => Some(CandidateSet::Unique {
            person: survivors[0],
            reason,
        }),
        _ => {
            debug_assert!(survivors.len() <= candidates.len());
            *candidates = survivors;
            None
        }
    }
}
