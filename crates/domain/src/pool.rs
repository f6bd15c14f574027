//! Candidate pools and the declarative predicates that derive them.
//!
//! A pool is never patched. When the inputs of its predicate change (role
//! mode, chosen champion, prior pick) a new predicate is built and the pool
//! is derived again from the raw candidates.

use std::collections::BTreeSet;

use crate::entities::Candidate;
use crate::ids::{CandidateId, MapId};
use crate::value_objects::RangeKind;

/// "Id is one of these, or carries one of these tags."
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Membership {
    pub ids: BTreeSet<CandidateId>,
    pub tags: BTreeSet<String>,
}

impl Membership {
    fn admits(&self, candidate: &Candidate) -> bool {
        self.ids.contains(candidate.id())
            || candidate.display_tags().iter().any(|t| self.tags.contains(t))
    }
}

/// Declarative filter over candidates.
///
/// Every clause is ANDed; a default predicate admits everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolPredicate {
    on_map: Option<MapId>,
    off_maps: BTreeSet<MapId>,
    purchasable_only: bool,
    min_cost: Option<u32>,
    max_cost: Option<u32>,
    required_tags: BTreeSet<String>,
    forbidden_tags: BTreeSet<String>,
    member_of: Option<Membership>,
    excluded_ids: BTreeSet<CandidateId>,
    usable_by: Option<RangeKind>,
}

impl PoolPredicate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Must be eligible on `map`.
    pub fn on_map(mut self, map: impl Into<MapId>) -> Self {
        self.on_map = Some(map.into());
        self
    }

    /// Must not be eligible on `map`.
    pub fn not_on_map(mut self, map: impl Into<MapId>) -> Self {
        self.off_maps.insert(map.into());
        self
    }

    pub fn purchasable(mut self) -> Self {
        self.purchasable_only = true;
        self
    }

    /// Inclusive on both ends. Candidates without a cost never match.
    pub fn cost_between(mut self, min: u32, max: u32) -> Self {
        self.min_cost = Some(min);
        self.max_cost = Some(max);
        self
    }

    pub fn cost_at_least(mut self, min: u32) -> Self {
        self.min_cost = Some(min);
        self
    }

    pub fn tagged(mut self, tag: impl Into<String>) -> Self {
        self.required_tags.insert(tag.into());
        self
    }

    pub fn not_tagged(mut self, tag: impl Into<String>) -> Self {
        self.forbidden_tags.insert(tag.into());
        self
    }

    /// Restrict to these ids (plus anything added with [`or_tagged`](Self::or_tagged)).
    pub fn one_of<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<CandidateId>,
    {
        let membership = self.member_of.get_or_insert_with(Membership::default);
        membership.ids.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Widen the membership clause to anything carrying `tag`.
    pub fn or_tagged(mut self, tag: impl Into<String>) -> Self {
        let membership = self.member_of.get_or_insert_with(Membership::default);
        membership.tags.insert(tag.into());
        self
    }

    pub fn excluding<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<CandidateId>,
    {
        self.excluded_ids.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Drop candidates whose range constraint does not fit `range`.
    pub fn usable_by(mut self, range: RangeKind) -> Self {
        self.usable_by = Some(range);
        self
    }

    pub fn admits(&self, candidate: &Candidate) -> bool {
        if let Some(map) = &self.on_map {
            if !candidate.is_eligible_on(map) {
                return false;
            }
        }
        if self.off_maps.iter().any(|m| candidate.is_eligible_on(m)) {
            return false;
        }
        if self.purchasable_only && !candidate.is_purchasable() {
            return false;
        }
        if self.min_cost.is_some() || self.max_cost.is_some() {
            let Some(cost) = candidate.cost() else {
                return false;
            };
            if self.min_cost.is_some_and(|min| cost < min) {
                return false;
            }
            if self.max_cost.is_some_and(|max| cost > max) {
                return false;
            }
        }
        if !self.required_tags.iter().all(|t| candidate.has_tag(t)) {
            return false;
        }
        if self.forbidden_tags.iter().any(|t| candidate.has_tag(t)) {
            return false;
        }
        if let Some(membership) = &self.member_of {
            if !membership.admits(candidate) {
                return false;
            }
        }
        if self.excluded_ids.contains(candidate.id()) {
            return false;
        }
        if let Some(range) = self.usable_by {
            if !candidate.is_usable_by(range) {
                return false;
            }
        }
        true
    }
}

/// Named, immutable list of candidates plus the predicate that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidatePool {
    name: String,
    predicate: PoolPredicate,
    candidates: Vec<Candidate>,
}

impl CandidatePool {
    /// Derive a pool by filtering `entries` with `predicate`. Catalog order is kept.
    pub fn derive(name: impl Into<String>, entries: &[Candidate], predicate: PoolPredicate) -> Self {
        let candidates = entries
            .iter()
            .filter(|c| predicate.admits(c))
            .cloned()
            .collect();
        Self {
            name: name.into(),
            predicate,
            candidates,
        }
    }

    /// Pool admitting every entry.
    pub fn all(name: impl Into<String>, entries: &[Candidate]) -> Self {
        Self::derive(name, entries, PoolPredicate::new())
    }

    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            predicate: PoolPredicate::new(),
            candidates: Vec::new(),
        }
    }

    /// Derive again from (possibly new) entries with the same predicate.
    pub fn rederive(&self, entries: &[Candidate]) -> Self {
        Self::derive(self.name.clone(), entries, self.predicate.clone())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn predicate(&self) -> &PoolPredicate {
        &self.predicate
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn contains(&self, id: &CandidateId) -> bool {
        self.candidates.iter().any(|c| c.id() == id)
    }

    pub fn ids(&self) -> BTreeSet<CandidateId> {
        self.candidates.iter().map(|c| c.id().clone()).collect()
    }
}
