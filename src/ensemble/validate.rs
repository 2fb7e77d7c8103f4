use super::PhyloTree;
use crate::utils::Result;

#[derive(Clone, Copy, PartialEq)]
enum Visit {
    New,
    OnPath,
    Done,
}

/// Checks that parent links form a single rooted tree and that every mutation
/// site has a root allele. Tip counting walks parent chains and relies on this.
pub fn validate_topology<T: PhyloTree>(tree: &T) -> Result<()> {
    let size = tree.size();
    if size == 0 {
        return Err("Tree has no nodes".to_string());
    }

    let roots: Vec<usize> = (0..size)
        .filter(|&node| tree.parent_of(node).is_none())
        .collect();
    match roots.len() {
        0 => return Err("Tree has no root".to_string()),
        1 => {}
        n => {
            return Err(format!(
                "Tree has {} roots (nodes {:?}), expected one",
                n, roots
            ))
        }
    }

    for node in 0..size {
        if let Some(parent) = tree.parent_of(node) {
            if parent >= size {
                return Err(format!(
                    "Node {} has parent index {} out of range (tree size {})",
                    node, parent, size
                ));
            }
        }
    }

    let mut state = vec![Visit::New; size];
    let mut path = Vec::new();
    for start in 0..size {
        let mut node = start;
        loop {
            match state[node] {
                Visit::Done => break,
                Visit::OnPath => {
                    return Err(format!("Parent chain of node {} contains a cycle", start))
                }
                Visit::New => {
                    state[node] = Visit::OnPath;
                    path.push(node);
                    match tree.parent_of(node) {
                        Some(parent) => node = parent,
                        None => break,
                    }
                }
            }
        }
        for visited in path.drain(..) {
            state[visited] = Visit::Done;
        }
    }

    let num_sites = tree.root_sequence().len();
    for node in 0..size {
        if let Some(m) = tree
            .mutations_of(node)
            .iter()
            .find(|m| m.site as usize >= num_sites)
        {
            return Err(format!(
                "Mutation {} on node {} is outside the root sequence (length {})",
                m.name(),
                node,
                num_sites
            ));
        }
    }

    Ok(())
}

/// Validates every tree, naming the first bad one.
pub fn validate_trees<T: PhyloTree>(trees: &[T]) -> Result<()> {
    for (tree_index, tree) in trees.iter().enumerate() {
        validate_topology(tree).map_err(|e| format!("Tree {}: {}", tree_index, e))?;
    }
    Ok(())
}
