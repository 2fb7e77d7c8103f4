mod aggregate;
mod apobec;
mod classify;
mod distribution;
mod finalize;
mod moi;
pub mod select;
mod tip_counts;

pub use aggregate::MutationTable;
pub use apobec::is_apobec_context;
pub use classify::{
    classify_site, classify_tree, count_unplaced, dedup_earliest, gather_site_introductions,
    SiteClassification, SiteIntroductions,
};
pub use distribution::{mutation_distribution, MutationDistribution};
pub use moi::{
    Feature, Introduction, InterestData, MutationOfInterest, MutationOfInterestSet,
    TreeInterestData,
};
pub use tip_counts::tip_counts;

use crate::ensemble::{validate_trees, Mutation, PhyloTree};
use crate::utils::{Allele, Result};

/// Validates every tree, folds them in index order and finalizes the table.
/// Evidence `tree_index` values are positions in `trees`.
pub fn analyze_ensemble<T, F>(trees: &[T], is_apobec: F) -> Result<MutationOfInterestSet>
where
    T: PhyloTree,
    F: Fn(&Mutation, &[Allele]) -> bool,
{
    if trees.is_empty() {
        return Err("No trees to analyze".to_string());
    }
    validate_trees(trees)?;

    let unplaced: usize = trees.iter().map(count_unplaced).sum();
    if unplaced > 0 {
        log::warn!(
            "Skipped {} mutations without a time across {} trees",
            unplaced,
            trees.len()
        );
    }

    let mut table = MutationTable::new();
    for (tree_index, tree) in trees.iter().enumerate() {
        table.add_tree(tree, tree_index, &is_apobec);
        log::debug!(
            "Folded tree {}/{}: {} distinct mutations so far",
            tree_index + 1,
            trees.len(),
            table.distinct_mutations()
        );
    }

    let set = table.finalize(trees.len())?;
    log::info!(
        "Analyzed {} trees: {} mutations, {} reversals, {} same-site, {} multiple introductions",
        set.tree_count(),
        set.all().len(),
        set.bucket_indices(Feature::Reversal).len(),
        set.bucket_indices(Feature::SameSite).len(),
        set.bucket_indices(Feature::MultipleIntroductions).len()
    );
    Ok(set)
}
