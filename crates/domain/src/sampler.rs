//! Pure sampling functions.
//!
//! Randomness is injected as a `pick` closure: `pick(len)` must return a
//! uniformly random index in `[0, len)`. Out-of-range answers are clamped, so
//! a misbehaving source can bias a draw but never panic. Given a
//! deterministic `pick`, every function here is deterministic.

use std::collections::BTreeMap;

use crate::constraint::{Accepted, ConstraintSet};
use crate::entities::Candidate;

/// Retries of the second draw before falling back to an explicit draw over
/// the distinct remainder.
const PAIR_RETRY_LIMIT: usize = 16;

fn index(pick: &mut dyn FnMut(usize) -> usize, len: usize) -> usize {
    pick(len).min(len.saturating_sub(1))
}

/// Uniformly draw one candidate. An empty pool yields `None`.
pub fn draw_one(pool: &[Candidate], pick: &mut dyn FnMut(usize) -> usize) -> Option<Candidate> {
    if pool.is_empty() {
        return None;
    }
    pool.get(index(pick, pool.len())).cloned()
}

/// Draw up to `n` candidates without replacement under `constraints`.
///
/// Each draw removes the candidate from a working copy whether it is accepted
/// or rejected, so the loop ends after at most `pool.len()` draws. The result
/// always has exactly `n` slots; slots that could not be filled are `None`.
pub fn draw_many(
    pool: &[Candidate],
    n: usize,
    constraints: &ConstraintSet,
    pick: &mut dyn FnMut(usize) -> usize,
) -> Vec<Option<Candidate>> {
    let mut working: Vec<&Candidate> = pool.iter().collect();
    let mut accepted = Accepted::default();
    let mut slots = Vec::with_capacity(n);

    while slots.len() < n && !working.is_empty() {
        let candidate = working.swap_remove(index(pick, working.len()));
        if constraints.admits(candidate, &accepted) {
            accepted.record(candidate);
            slots.push(Some(candidate.clone()));
        }
    }

    slots.resize(n, None);
    slots
}

/// [`draw_many`] into a fixed-size array.
pub fn draw_slots<const N: usize>(
    pool: &[Candidate],
    constraints: &ConstraintSet,
    pick: &mut dyn FnMut(usize) -> usize,
) -> [Option<Candidate>; N] {
    let mut slots = draw_many(pool, N, constraints, pick).into_iter();
    std::array::from_fn(|_| slots.next().flatten())
}

/// Draw a pair whose ids differ: the first from `first`, the second from `second`.
///
/// Only the second draw is retried, and only on an id match with the first.
/// When `second` holds nothing distinct from the first pick (fewer than two
/// entries, or a single shared entry) the best-effort pair is returned at once,
/// possibly a duplicate.
pub fn draw_distinct_pair(
    first: &[Candidate],
    second: &[Candidate],
    pick: &mut dyn FnMut(usize) -> usize,
) -> (Option<Candidate>, Option<Candidate>) {
    let Some(a) = draw_one(first, pick) else {
        return (None, draw_one(second, pick));
    };

    let distinct: Vec<Candidate> = second.iter().filter(|c| c.id() != a.id()).cloned().collect();
    if distinct.is_empty() {
        let b = draw_one(second, pick);
        return (Some(a), b);
    }

    for _ in 0..PAIR_RETRY_LIMIT {
        if let Some(b) = draw_one(second, pick) {
            if b.id() != a.id() {
                return (Some(a), Some(b));
            }
        }
    }

    let b = draw_one(&distinct, pick);
    (Some(a), b)
}

/// Draw one candidate from each exclusivity group.
///
/// Groups come out in first-seen order; ungrouped candidates form one extra
/// trailing group.
pub fn draw_one_per_group(
    pool: &[Candidate],
    pick: &mut dyn FnMut(usize) -> usize,
) -> Vec<Candidate> {
    let mut order: Vec<Option<&str>> = Vec::new();
    let mut groups: BTreeMap<Option<&str>, Vec<Candidate>> = BTreeMap::new();
    for candidate in pool {
        let key = candidate.exclusivity_group();
        if key.is_some() && !groups.contains_key(&key) {
            order.push(key);
        }
        groups.entry(key).or_default().push(candidate.clone());
    }
    if groups.contains_key(&None) {
        order.push(None);
    }

    order
        .into_iter()
        .filter_map(|key| groups.get(&key).and_then(|members| draw_one(members, pick)))
        .collect()
}
