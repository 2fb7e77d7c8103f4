use super::{Feature, Introduction};
use crate::ensemble::{MutationKey, PhyloTree};
use crate::utils::Allele;
use std::cmp::Ordering;
use std::collections::{btree_map::Entry, BTreeMap, BTreeSet};

/// Placed introductions grouped by site, in node order within each site.
pub type SiteIntroductions = BTreeMap<u32, Vec<Introduction>>;

/// Classification of one site in one tree.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteClassification {
    pub site: u32,
    /// `None` when the site carries a single introduction.
    pub feature: Option<Feature>,
    /// Earliest occurrence of each distinct mutation at the site.
    pub credited: Vec<Introduction>,
    /// Every introduction at the site.
    pub introductions: Vec<Introduction>,
}

/// Placed mutations grouped by site. Unplaced ones are left out; see `count_unplaced`.
pub fn gather_site_introductions<T: PhyloTree>(tree: &T) -> SiteIntroductions {
    let mut sites = SiteIntroductions::new();
    for node_index in 0..tree.size() {
        for mutation in tree.mutations_of(node_index).iter().filter(|m| m.is_placed()) {
            sites
                .entry(mutation.site)
                .or_default()
                .push(Introduction::new(*mutation, node_index));
        }
    }
    sites
}

pub fn count_unplaced<T: PhyloTree>(tree: &T) -> usize {
    (0..tree.size())
        .flat_map(|node| tree.mutations_of(node))
        .filter(|m| !m.is_placed())
        .count()
}

/// Decision table over the alleles at one site. `root_allele` is the allele the
/// root carries at that site.
pub fn classify_site(introductions: &[Introduction], root_allele: Option<Allele>) -> Option<Feature> {
    if introductions.len() < 2 {
        return None;
    }
    let from_alleles: BTreeSet<Allele> = introductions.iter().map(|i| i.mutation.from).collect();
    let to_alleles: BTreeSet<Allele> = introductions.iter().map(|i| i.mutation.to).collect();

    // A reversal is assumed whenever the root allele is re-derived; no
    // ancestor/descendant check is made between the branches involved.
    let feature = match (from_alleles.len(), to_alleles.len()) {
        (1, 1) => Feature::MultipleIntroductions,
        (1, _) => Feature::SameSite,
        _ if root_allele.is_some_and(|root| to_alleles.contains(&root)) => Feature::Reversal,
        _ => Feature::SameSite,
    };
    Some(feature)
}

// Earlier time wins; equal times (0.0 and -0.0 included) fall back to the
// lower node index. Only placed, hence finite, times reach this point.
fn precedes(a: &Introduction, b: &Introduction) -> bool {
    a.mutation
        .time
        .partial_cmp(&b.mutation.time)
        .unwrap_or(Ordering::Equal)
        .then(a.node_index.cmp(&b.node_index))
        == Ordering::Less
}

/// Keeps the most ancestral occurrence of each distinct mutation, ordered by mutation identity.
pub fn dedup_earliest(introductions: &[Introduction]) -> Vec<Introduction> {
    let mut earliest: BTreeMap<MutationKey, Introduction> = BTreeMap::new();
    for intro in introductions {
        match earliest.entry(intro.mutation.key()) {
            Entry::Vacant(entry) => {
                entry.insert(*intro);
            }
            Entry::Occupied(mut entry) => {
                if precedes(intro, entry.get()) {
                    entry.insert(*intro);
                }
            }
        }
    }
    earliest.into_values().collect()
}

/// Groups a tree's mutations by site and classifies every site.
pub fn classify_tree<T: PhyloTree>(tree: &T) -> Vec<SiteClassification> {
    let root_sequence = tree.root_sequence();
    gather_site_introductions(tree)
        .into_iter()
        .map(|(site, introductions)| {
            let root_allele = root_sequence.get(site as usize).copied();
            let feature = classify_site(&introductions, root_allele);
            let credited = match feature {
                Some(_) => dedup_earliest(&introductions),
                None => introductions.clone(),
            };
            SiteClassification {
                site,
                feature,
                credited,
                introductions,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ensemble::{ArenaTree, Mutation, Node};
    use crate::utils::Allele::*;

    fn intro(from: Allele, to: Allele, time: f64, node_index: usize) -> Introduction {
        Introduction::new(Mutation::new(10, from, to, time), node_index)
    }

    #[test]
    fn single_introduction_has_no_feature() {
        assert_eq!(classify_site(&[intro(A, C, 1.0, 1)], Some(A)), None);
    }

    #[test]
    fn same_substitution_twice_is_multiple_introductions() {
        let intros = [intro(A, C, 1.0, 1), intro(A, C, 2.0, 2)];
        assert_eq!(
            classify_site(&intros, Some(A)),
            Some(Feature::MultipleIntroductions)
        );
    }

    #[test]
    fn divergent_derived_alleles_are_same_site() {
        let intros = [intro(A, C, 1.0, 1), intro(A, C, 2.0, 2), intro(A, G, 3.0, 3)];
        assert_eq!(classify_site(&intros, Some(A)), Some(Feature::SameSite));
    }

    #[test]
    fn return_to_root_allele_is_reversal() {
        let intros = [intro(A, C, 1.0, 1), intro(C, A, 2.0, 2)];
        assert_eq!(classify_site(&intros, Some(A)), Some(Feature::Reversal));
    }

    #[test]
    fn multi_from_without_root_allele_is_same_site() {
        let intros = [intro(A, C, 1.0, 1), intro(C, G, 2.0, 2)];
        assert_eq!(classify_site(&intros, Some(A)), Some(Feature::SameSite));
        assert_eq!(classify_site(&intros, None), Some(Feature::SameSite));
    }

    #[test]
    fn dedup_keeps_earliest() {
        let intros = [intro(A, C, 5.0, 1), intro(A, C, 2.0, 2), intro(A, G, 3.0, 3)];
        let credited = dedup_earliest(&intros);
        assert_eq!(credited, vec![intro(A, C, 2.0, 2), intro(A, G, 3.0, 3)]);
    }

    #[test]
    fn dedup_tie_goes_to_lower_node_index() {
        let intros = [intro(A, C, 2.0, 7), intro(A, C, 2.0, 3), intro(A, C, 2.0, 5)];
        assert_eq!(dedup_earliest(&intros), vec![intro(A, C, 2.0, 3)]);
    }

    #[test]
    fn dedup_treats_signed_zeros_as_a_tie() {
        let intros = [intro(A, C, 0.0, 2), intro(A, C, -0.0, 6)];
        let credited = dedup_earliest(&intros);
        assert_eq!(credited[0].node_index, 2);
        let reversed = [intro(A, C, -0.0, 6), intro(A, C, 0.0, 2)];
        assert_eq!(dedup_earliest(&reversed)[0].node_index, 2);
    }

    #[test]
    fn classify_tree_groups_by_site_and_skips_unplaced() {
        let nodes = vec![
            Node::new(None, 0.0, vec![]),
            Node::new(
                Some(0),
                4.0,
                vec![
                    Mutation::new(1, C, T, 1.0),
                    Mutation::new(2, G, A, f64::NAN),
                ],
            ),
            Node::new(Some(0), 4.0, vec![Mutation::new(1, C, T, 3.0)]),
            Node::new(Some(1), 8.0, vec![Mutation::new(3, T, G, 6.0)]),
        ];
        let tree = ArenaTree::new(nodes, vec![A, C, G, T]);

        let sites = gather_site_introductions(&tree);
        assert_eq!(sites.keys().copied().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(count_unplaced(&tree), 1);
        assert_eq!(sites[&1].len(), 2);

        let classified = classify_tree(&tree);
        assert_eq!(classified.len(), 2);
        assert_eq!(classified[0].site, 1);
        assert_eq!(classified[0].feature, Some(Feature::MultipleIntroductions));
        assert_eq!(classified[0].credited.len(), 1);
        assert_eq!(classified[0].credited[0].node_index, 1);
        assert_eq!(classified[0].introductions.len(), 2);
        assert_eq!(classified[1].feature, None);
        assert_eq!(classified[1].credited[0].node_index, 3);
    }
}
