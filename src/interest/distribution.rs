use crate::ensemble::{MutationKey, PhyloTree};
use std::collections::BTreeSet;

/// Every placed occurrence of one mutation across an ensemble.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationDistribution {
    pub key: MutationKey,
    pub times: Vec<f64>,
    /// Tree each entry of `times` came from.
    pub tree_indices: Vec<usize>,
    pub possible_trees: usize,
}

impl MutationDistribution {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn tree_count(&self) -> usize {
        self.tree_indices.iter().collect::<BTreeSet<_>>().len()
    }

    pub fn confidence(&self) -> f64 {
        if self.possible_trees == 0 {
            return 0.0;
        }
        self.tree_count() as f64 / self.possible_trees as f64
    }

    pub fn time_range(&self) -> Option<(f64, f64)> {
        let (first, rest) = self.times.split_first()?;
        Some(rest.iter().fold((*first, *first), |(lo, hi), &t| {
            (lo.min(t), hi.max(t))
        }))
    }
}

pub fn mutation_distribution<T: PhyloTree>(trees: &[T], key: &MutationKey) -> MutationDistribution {
    let mut times = Vec::new();
    let mut tree_indices = Vec::new();
    for (tree_index, tree) in trees.iter().enumerate() {
        for node in 0..tree.size() {
            for mutation in tree.mutations_of(node) {
                if mutation.key() == *key && mutation.is_placed() {
                    times.push(mutation.time);
                    tree_indices.push(tree_index);
                }
            }
        }
    }
    MutationDistribution {
        key: *key,
        times,
        tree_indices,
        possible_trees: trees.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ensemble::{ArenaTree, Mutation, Node};
    use crate::utils::Allele::*;

    fn tree(times: &[f64]) -> ArenaTree {
        let mut nodes = vec![Node::new(None, 0.0, vec![])];
        for &time in times {
            nodes.push(Node::new(Some(0), 10.0, vec![Mutation::new(4, G, T, time)]));
        }
        nodes.push(Node::new(Some(0), 10.0, vec![Mutation::new(4, G, A, 1.0)]));
        ArenaTree::new(nodes, vec![A, C, G, T, G])
    }

    #[test]
    fn collects_placed_times_with_tree_of_origin() {
        let trees = vec![tree(&[3.0, 5.0]), tree(&[]), tree(&[f64::NAN, 2.0]), tree(&[])];
        let dist = mutation_distribution(&trees, &MutationKey::new(4, G, T));
        assert_eq!(dist.times, vec![3.0, 5.0, 2.0]);
        assert_eq!(dist.tree_indices, vec![0, 0, 2]);
        assert_eq!(dist.tree_count(), 2);
        assert_eq!(dist.confidence(), 0.5);
        assert_eq!(dist.time_range(), Some((2.0, 5.0)));
    }

    #[test]
    fn absent_mutation_is_empty() {
        let trees = vec![tree(&[1.0])];
        let dist = mutation_distribution(&trees, &MutationKey::new(4, G, C));
        assert!(dist.is_empty());
        assert_eq!(dist.confidence(), 0.0);
        assert_eq!(dist.time_range(), None);
    }

    #[test]
    fn empty_ensemble_has_zero_confidence() {
        let trees: Vec<ArenaTree> = vec![];
        let dist = mutation_distribution(&trees, &MutationKey::new(0, A, C));
        assert_eq!(dist.possible_trees, 0);
        assert_eq!(dist.confidence(), 0.0);
    }
}
