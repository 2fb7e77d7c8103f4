use super::Mutation;
use crate::utils::Allele;

/// Read-only view of one sampled tree as produced by the inference engine.
/// Nodes are addressed by index; the root has no parent.
pub trait PhyloTree {
    fn size(&self) -> usize;
    fn parent_of(&self, node: usize) -> Option<usize>;
    fn time_of(&self, node: usize) -> f64;
    /// Mutations on the branch leading into `node`.
    fn mutations_of(&self, node: usize) -> &[Mutation];
    fn is_tip(&self, node: usize) -> bool;
    /// Inferred allele at every site at the root.
    fn root_sequence(&self) -> &[Allele];

    fn tip_count(&self) -> usize {
        (0..self.size()).filter(|&node| self.is_tip(node)).count()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub parent: Option<usize>,
    pub time: f64,
    pub mutations: Vec<Mutation>,
}

impl Node {
    pub fn new(parent: Option<usize>, time: f64, mutations: Vec<Mutation>) -> Self {
        Self {
            parent,
            time,
            mutations,
        }
    }
}

/// Flat-array tree; parent links are indices into `nodes`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArenaTree {
    nodes: Vec<Node>,
    child_counts: Vec<usize>,
    root_sequence: Vec<Allele>,
}

impl ArenaTree {
    pub fn new(nodes: Vec<Node>, root_sequence: Vec<Allele>) -> Self {
        let mut child_counts = vec![0; nodes.len()];
        for node in &nodes {
            // Dangling parents are reported by validate_topology
            if let Some(count) = node.parent.and_then(|p| child_counts.get_mut(p)) {
                *count += 1;
            }
        }
        Self {
            nodes,
            child_counts,
            root_sequence,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn mutation_count(&self) -> usize {
        self.nodes.iter().map(|n| n.mutations.len()).sum()
    }
}

impl PhyloTree for ArenaTree {
    fn size(&self) -> usize {
        self.nodes.len()
    }

    fn parent_of(&self, node: usize) -> Option<usize> {
        self.nodes[node].parent
    }

    fn time_of(&self, node: usize) -> f64 {
        self.nodes[node].time
    }

    fn mutations_of(&self, node: usize) -> &[Mutation] {
        &self.nodes[node].mutations
    }

    fn is_tip(&self, node: usize) -> bool {
        self.child_counts[node] == 0
    }

    fn root_sequence(&self) -> &[Allele] {
        &self.root_sequence
    }
}

/// Ordered posterior sample of trees.
#[derive(Debug, Clone)]
pub struct Ensemble<T> {
    trees: Vec<T>,
}

impl<T: PhyloTree> Ensemble<T> {
    pub fn new(trees: Vec<T>) -> Self {
        Self { trees }
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    pub fn trees(&self) -> &[T] {
        &self.trees
    }

    /// First index kept once the leading `burn_in` fraction of samples is discarded.
    pub fn knee_index(&self, burn_in: f64) -> usize {
        let knee = (burn_in.clamp(0.0, 1.0) * self.trees.len() as f64).round() as usize;
        knee.min(self.trees.len())
    }

    pub fn after_burn_in(&self, burn_in: f64) -> &[T] {
        &self.trees[self.knee_index(burn_in)..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cherry() -> ArenaTree {
        // 0 is the root of tips 1 and 2
        ArenaTree::new(
            vec![
                Node::new(None, 0.0, vec![]),
                Node::new(Some(0), 5.0, vec![]),
                Node::new(Some(0), 6.0, vec![]),
            ],
            vec![Allele::A],
        )
    }

    #[test]
    fn tips_have_no_children() {
        let tree = cherry();
        assert!(!tree.is_tip(0));
        assert!(tree.is_tip(1));
        assert!(tree.is_tip(2));
        assert_eq!(tree.tip_count(), 2);
    }

    #[test]
    fn tree_accessors() {
        let tree = cherry();
        assert_eq!(tree.size(), 3);
        assert_eq!(tree.parent_of(0), None);
        assert_eq!(tree.parent_of(2), Some(0));
        assert_eq!(tree.time_of(1), 5.0);
        assert!(tree.mutations_of(1).is_empty());
        assert_eq!(tree.root_sequence(), &[Allele::A]);
    }

    #[test]
    fn knee_index_rounds() {
        let ensemble = Ensemble::new(vec![cherry(); 10]);
        assert_eq!(ensemble.knee_index(0.0), 0);
        assert_eq!(ensemble.knee_index(0.25), 3);
        assert_eq!(ensemble.knee_index(1.0), 10);
        assert_eq!(ensemble.after_burn_in(0.3).len(), 7);
        assert!(ensemble.after_burn_in(1.0).is_empty());
    }
}
