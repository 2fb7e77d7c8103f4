use crate::ensemble::PhyloTree;

/// Number of tips under every node, counting a tip as its own descendant.
/// The topology must already be validated: parent chains are followed blindly.
pub fn tip_counts<T: PhyloTree>(tree: &T) -> Vec<u32> {
    let mut counts = vec![0; tree.size()];
    for tip in (0..tree.size()).filter(|&node| tree.is_tip(node)) {
        let mut node = Some(tip);
        while let Some(current) = node {
            counts[current] += 1;
            node = tree.parent_of(current);
        }
    }
    counts
}
