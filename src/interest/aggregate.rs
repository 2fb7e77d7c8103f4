use super::{classify_tree, tip_counts, MutationOfInterest, TreeInterestData};
use crate::ensemble::{Mutation, MutationKey, PhyloTree};
use crate::utils::Allele;
use std::collections::BTreeMap;

/// Running per-mutation statistics, folded one tree at a time.
#[derive(Debug, Default)]
pub struct MutationTable {
    pub(super) entries: BTreeMap<MutationKey, MutationOfInterest>,
    pub(super) trees_added: usize,
}

impl MutationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn distinct_mutations(&self) -> usize {
        self.entries.len()
    }

    /// Classifies `tree` and credits its introductions. `tree_index` is recorded
    /// as evidence for any feature found; `is_apobec` is asked once per credited
    /// mutation with the tree's root sequence.
    ///
    /// Credited introductions are unique per mutation within a tree: keys carry
    /// the site, and each site credits at most one occurrence per key.
    pub fn add_tree<T, F>(&mut self, tree: &T, tree_index: usize, is_apobec: &F)
    where
        T: PhyloTree,
        F: Fn(&Mutation, &[Allele]) -> bool,
    {
        let tips = tip_counts(tree);
        let root_sequence = tree.root_sequence();
        let mut credited = 0;

        for site in classify_tree(tree) {
            for intro in &site.credited {
                let key = intro.mutation.key();
                credited += 1;
                let moi = self
                    .entries
                    .entry(key)
                    .or_insert_with(|| MutationOfInterest::new(intro.mutation));
                moi.tree_count += 1;
                moi.base_tip_counts.push(tips[intro.node_index]);
                if is_apobec(&intro.mutation, root_sequence) {
                    moi.apobec_count += 1;
                }
                if let Some(feature) = site.feature {
                    moi.features
                        .entry(feature)
                        .or_default()
                        .introductions
                        .push(TreeInterestData {
                            tree_index,
                            introductions: site.introductions.clone(),
                        });
                }
            }
        }
        self.trees_added += 1;
        log::trace!(
            "Tree {}: credited {} mutations",
            tree_index,
            credited
        );
    }
}
