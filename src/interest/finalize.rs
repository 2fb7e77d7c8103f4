use super::{Feature, MutationOfInterest, MutationOfInterestSet, MutationTable};
use crate::utils::{math::median, Result};

impl MutationTable {
    /// Turns raw tallies into confidences and medians over `total_tree_count`
    /// trees and builds the classifier buckets.
    pub fn finalize(self, total_tree_count: usize) -> Result<MutationOfInterestSet> {
        if total_tree_count == 0 {
            return Err("Cannot finalize mutation statistics over zero trees".to_string());
        }
        if self.trees_added > total_tree_count {
            return Err(format!(
                "Table holds {} trees but the ensemble has only {}",
                self.trees_added, total_tree_count
            ));
        }

        let total = total_tree_count as f64;
        let mut all: Vec<MutationOfInterest> = self.entries.into_values().collect();
        for moi in all.iter_mut() {
            moi.confidence = moi.tree_count as f64 / total;
            for data in moi.features.values_mut() {
                data.confidence = data.introductions.len() as f64 / total;
            }
            moi.median_tip_count = median(&moi.base_tip_counts).unwrap_or(0.0);
        }

        let bucket = |feature: Feature| -> Vec<usize> {
            all.iter()
                .enumerate()
                .filter(|(_, moi)| moi.has_feature(feature))
                .map(|(index, _)| index)
                .collect()
        };
        let reversals = bucket(Feature::Reversal);
        let same_site = bucket(Feature::SameSite);
        let multiple_introductions = bucket(Feature::MultipleIntroductions);

        Ok(MutationOfInterestSet {
            all,
            reversals,
            same_site,
            multiple_introductions,
            tree_count: total_tree_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ensemble::{ArenaTree, Mutation, MutationKey, Node};
    use crate::utils::Allele::{self, *};

    fn never(_: &Mutation, _: &[Allele]) -> bool {
        false
    }

    fn tree_with(mutations: Vec<(usize, Mutation)>) -> ArenaTree {
        let parents = [None, Some(0), Some(0), Some(0), Some(3), Some(3)];
        let mut nodes: Vec<Node> = parents
            .iter()
            .map(|&p| Node::new(p, 0.0, vec![]))
            .collect();
        for (node, m) in mutations {
            nodes[node].mutations.push(m);
        }
        ArenaTree::new(nodes, vec![A, C, G, T])
    }

    #[test]
    fn confidence_is_tree_fraction() {
        let mut table = MutationTable::new();
        for tree_index in 0..10 {
            let mutations = if tree_index % 3 == 0 && tree_index < 9 {
                vec![(1, Mutation::new(2, G, T, 1.0))]
            } else {
                vec![]
            };
            table.add_tree(&tree_with(mutations), tree_index, &never);
        }
        let set = table.finalize(10).unwrap();
        let moi = set.get(&MutationKey::new(2, G, T)).unwrap();
        assert_eq!(moi.tree_count, 3);
        assert_eq!(moi.confidence, 0.3);
    }

    #[test]
    fn feature_confidence_and_median() {
        let mut table = MutationTable::new();
        let twice = vec![
            (3, Mutation::new(0, A, G, 1.0)),
            (1, Mutation::new(0, A, G, 2.0)),
        ];
        table.add_tree(&tree_with(twice), 0, &never);
        table.add_tree(&tree_with(vec![(1, Mutation::new(0, A, G, 1.0))]), 1, &never);
        table.add_tree(&tree_with(vec![(0, Mutation::new(0, A, G, 1.0))]), 2, &never);
        let set = table.finalize(4).unwrap();

        let moi = set.get(&MutationKey::new(0, A, G)).unwrap();
        // Tree order is kept; the median selects without sorting
        assert_eq!(moi.base_tip_counts, vec![2, 1, 4]);
        assert_eq!(moi.median_tip_count, 2.0);
        assert_eq!(moi.confidence, 0.75);
        assert_eq!(moi.features[&Feature::MultipleIntroductions].confidence, 0.25);
        assert_eq!(set.tree_count(), 4);
    }

    #[test]
    fn buckets_reference_the_full_table() {
        let mut table = MutationTable::new();
        let tree = tree_with(vec![
            (3, Mutation::new(0, A, C, 1.0)),
            (4, Mutation::new(0, C, A, 2.0)),
            (1, Mutation::new(1, C, G, 1.0)),
            (2, Mutation::new(1, C, T, 1.0)),
            (5, Mutation::new(3, T, A, 1.0)),
        ]);
        table.add_tree(&tree, 0, &never);
        let set = table.finalize(1).unwrap();

        assert_eq!(set.all().len(), 5);
        let reversals: Vec<&str> = set.bucket(Feature::Reversal).map(|m| m.name.as_str()).collect();
        assert_eq!(reversals, vec!["A1C", "C1A"]);
        let same_site: Vec<&str> = set.bucket(Feature::SameSite).map(|m| m.name.as_str()).collect();
        assert_eq!(same_site, vec!["C2G", "C2T"]);
        assert_eq!(set.bucket(Feature::MultipleIntroductions).count(), 0);
        assert_eq!(set.bucket(Feature::ManyTips).count(), 0);

        for feature in Feature::CLASSIFIED {
            for moi in set.bucket(feature) {
                assert_eq!(set.get(&moi.key()).map(|m| &m.name), Some(&moi.name));
            }
        }
    }

    #[test]
    fn zero_trees_rejected() {
        assert!(MutationTable::new().finalize(0).is_err());
    }

    #[test]
    fn more_trees_than_total_rejected() {
        let mut table = MutationTable::new();
        table.add_tree(&tree_with(vec![]), 0, &never);
        table.add_tree(&tree_with(vec![]), 1, &never);
        assert!(table.finalize(1).is_err());
    }
}
