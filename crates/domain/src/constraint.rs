//! Selection constraints evaluated while sampling.
//!
//! Constraints only ever reject, so evaluation order does not change which
//! candidates are legal; only tie-breaking among legal candidates is random.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::entities::Candidate;
use crate::ids::CandidateId;

/// A single declarative rule checked against a candidate and the picks
/// already accepted into the same selection.
#[derive(Clone)]
pub enum SelectionConstraint {
    /// At most one accepted candidate per exclusivity group.
    MaxPerGroup,
    /// No two accepted candidates may share a unique-effect id.
    ForbidSharedUniqueEffect,
    /// These ids are never accepted.
    ExcludeIds(BTreeSet<CandidateId>),
    /// Candidates matching the predicate are never accepted.
    ExcludeIf(Arc<dyn Fn(&Candidate) -> bool + Send + Sync>),
}

impl fmt::Debug for SelectionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxPerGroup => write!(f, "MaxPerGroup"),
            Self::ForbidSharedUniqueEffect => write!(f, "ForbidSharedUniqueEffect"),
            Self::ExcludeIds(ids) => f.debug_tuple("ExcludeIds").field(ids).finish(),
            Self::ExcludeIf(_) => write!(f, "ExcludeIf(..)"),
        }
    }
}

impl SelectionConstraint {
    pub fn exclude_if<F>(predicate: F) -> Self
    where
        F: Fn(&Candidate) -> bool + Send + Sync + 'static,
    {
        Self::ExcludeIf(Arc::new(predicate))
    }

    fn admits(&self, candidate: &Candidate, accepted: &Accepted) -> bool {
        match self {
            Self::MaxPerGroup => candidate
                .exclusivity_group()
                .map_or(true, |group| !accepted.groups.contains(group)),
            Self::ForbidSharedUniqueEffect => candidate
                .unique_effect_ids()
                .is_disjoint(&accepted.effects),
            Self::ExcludeIds(ids) => !ids.contains(candidate.id()),
            Self::ExcludeIf(predicate) => !predicate(candidate),
        }
    }
}

/// Composable set of constraints. Duplicate ids are always rejected.
#[derive(Debug, Clone, Default)]
pub struct ConstraintSet {
    constraints: Vec<SelectionConstraint>,
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group exclusivity plus unique-effect exclusivity, as used for item builds.
    pub fn exclusive() -> Self {
        Self::new()
            .with(SelectionConstraint::MaxPerGroup)
            .with(SelectionConstraint::ForbidSharedUniqueEffect)
    }

    pub fn with(mut self, constraint: SelectionConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn constraints(&self) -> &[SelectionConstraint] {
        &self.constraints
    }

    pub(crate) fn admits(&self, candidate: &Candidate, accepted: &Accepted) -> bool {
        !accepted.ids.contains(candidate.id())
            && self.constraints.iter().all(|c| c.admits(candidate, accepted))
    }
}

/// What a selection has consumed so far.
#[derive(Debug, Default)]
pub(crate) struct Accepted {
    ids: BTreeSet<CandidateId>,
    groups: BTreeSet<String>,
    effects: BTreeSet<String>,
}

impl Accepted {
    pub(crate) fn record(&mut self, candidate: &Candidate) {
        self.ids.insert(candidate.id().clone());
        if let Some(group) = candidate.exclusivity_group() {
            self.groups.insert(group.to_string());
        }
        self.effects
            .extend(candidate.unique_effect_ids().iter().cloned());
    }
}
