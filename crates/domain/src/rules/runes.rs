//! Rune trees and page drawing.

use crate::constraint::{ConstraintSet, SelectionConstraint};
use crate::entities::Candidate;
use crate::ids::CandidateId;
use crate::sampler::{draw_distinct_pair, draw_one, draw_one_per_group, draw_slots};
use crate::selection::{PrimaryTree, RunePage, SecondaryTree};

/// Rows after the keystone row that minors are drawn from.
const MINOR_ROWS: usize = 3;

/// One rune tree. Row 0 holds the keystones.
#[derive(Debug, Clone, PartialEq)]
pub struct RuneTree {
    tree: Candidate,
    rows: Vec<Vec<Candidate>>,
}

impl RuneTree {
    /// Every rune is placed in the exclusivity group `"{tree}:{row}"` so that
    /// row-exclusive draws can use the ordinary group constraint.
    pub fn new(tree: Candidate, rows: Vec<Vec<Candidate>>) -> Self {
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(row, runes)| {
                let group = format!("{}:{row}", tree.id());
                runes
                    .into_iter()
                    .map(|rune| rune.with_exclusivity_group(group.clone()))
                    .collect()
            })
            .collect();
        Self { tree, rows }
    }

    pub fn tree(&self) -> &Candidate {
        &self.tree
    }

    pub fn rows(&self) -> &[Vec<Candidate>] {
        &self.rows
    }

    pub fn keystones(&self) -> &[Candidate] {
        self.rows.first().map(Vec::as_slice).unwrap_or_default()
    }

    fn minor_row(&self, n: usize) -> &[Candidate] {
        self.rows.get(n + 1).map(Vec::as_slice).unwrap_or_default()
    }

    fn minors(&self) -> Vec<Candidate> {
        (0..MINOR_ROWS).flat_map(|n| self.minor_row(n).iter().cloned()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuneBook {
    trees: Vec<RuneTree>,
    stat_shards: Vec<Candidate>,
}

impl RuneBook {
    pub fn new(trees: Vec<RuneTree>, stat_shards: Vec<Candidate>) -> Self {
        Self { trees, stat_shards }
    }

    pub fn trees(&self) -> &[RuneTree] {
        &self.trees
    }

    pub fn stat_shards(&self) -> &[Candidate] {
        &self.stat_shards
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty() && self.stat_shards.is_empty()
    }

    fn find(&self, id: &CandidateId) -> Option<&RuneTree> {
        self.trees.iter().find(|t| t.tree.id() == id)
    }

    /// Draw a full page: two distinct trees, keystone plus one rune per
    /// minor row from the primary, two minors from different rows of the
    /// secondary, and one stat shard per shard row.
    pub fn draw_page(&self, pick: &mut dyn FnMut(usize) -> usize) -> RunePage {
        let trees: Vec<Candidate> = self.trees.iter().map(|t| t.tree.clone()).collect();
        let (primary, secondary) = draw_distinct_pair(&trees, &trees, pick);

        let primary_tree = primary.as_ref().and_then(|c| self.find(c.id()));
        let keystone = primary_tree.and_then(|t| draw_one(t.keystones(), pick));
        let minors = std::array::from_fn(|n| primary_tree.and_then(|t| draw_one(t.minor_row(n), pick)));

        let secondary_pool = secondary
            .as_ref()
            .and_then(|c| self.find(c.id()))
            .map(RuneTree::minors)
            .unwrap_or_default();
        let secondary_minors = draw_slots(
            &secondary_pool,
            &ConstraintSet::new().with(SelectionConstraint::MaxPerGroup),
            pick,
        );

        let mut shards = draw_one_per_group(&self.stat_shards, pick).into_iter();
        let stats = std::array::from_fn(|_| shards.next());

        RunePage {
            primary: PrimaryTree {
                tree: primary,
                keystone,
                minors,
            },
            secondary: SecondaryTree {
                tree: secondary,
                minors: secondary_minors,
            },
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn tree(name: &str) -> RuneTree {
        let rows = (0..4)
            .map(|row| {
                (0..3)
                    .map(|n| Candidate::new(format!("{name}-{row}-{n}"), format!("{name} rune")))
                    .collect()
            })
            .collect();
        RuneTree::new(Candidate::new(name, name), rows)
    }

    fn shards() -> Vec<Candidate> {
        (0..3)
            .flat_map(|row| {
                (0..3).map(move |n| {
                    Candidate::new(format!("shard-{row}-{n}"), "Shard")
                        .with_exclusivity_group(format!("stat-{row}"))
                })
            })
            .collect()
    }

    fn book() -> RuneBook {
        RuneBook::new(
            vec![tree("Precision"), tree("Domination"), tree("Sorcery")],
            shards(),
        )
    }

    fn row_of(rune: &Candidate) -> String {
        rune.exclusivity_group().unwrap_or_default().to_string()
    }

    #[test]
    fn page_uses_two_trees_and_fills_every_slot() {
        let book = book();
        for seed in 0..25 {
            let mut rng = StdRng::seed_from_u64(seed);
            let page = book.draw_page(&mut |len| rng.gen_range(0..len));

            let primary = page.primary.tree.clone().unwrap();
            let secondary = page.secondary.tree.clone().unwrap();
            assert_ne!(primary.id(), secondary.id());

            let keystone = page.primary.keystone.clone().unwrap();
            assert_eq!(row_of(&keystone), format!("{}:0", primary.id()));
            for (n, minor) in page.primary.minors.iter().enumerate() {
                assert_eq!(row_of(minor.as_ref().unwrap()), format!("{}:{}", primary.id(), n + 1));
            }

            let [first, second] = &page.secondary.minors;
            let (first, second) = (first.as_ref().unwrap(), second.as_ref().unwrap());
            assert_ne!(row_of(first), row_of(second));
            assert!(row_of(first).starts_with(secondary.id().as_str()));
            assert!(!row_of(first).ends_with(":0"));
            assert!(!row_of(second).ends_with(":0"));
        }
    }

    #[test]
    fn nine_shards_in_three_rows_give_one_per_row() {
        let page = book().draw_page(&mut |len| len / 2);
        let groups: Vec<&str> = page
            .stats
            .iter()
            .map(|s| s.as_ref().and_then(Candidate::exclusivity_group).unwrap())
            .collect();
        assert_eq!(groups, ["stat-0", "stat-1", "stat-2"]);
    }

    #[test]
    fn single_tree_book_still_draws_a_page() {
        let book = RuneBook::new(vec![tree("Precision")], Vec::new());
        let page = book.draw_page(&mut |_| 0);
        assert_eq!(page.primary.tree, page.secondary.tree);
        assert!(page.primary.keystone.is_some());
        assert!(page.stats.iter().all(Option::is_none));
    }

    #[test]
    fn empty_book_yields_sentinel_page() {
        assert_eq!(RuneBook::default().draw_page(&mut |_| 0), RunePage::default());
    }
}
