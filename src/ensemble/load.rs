use super::{validate_trees, ArenaTree, Ensemble, Mutation, Node};
use crate::utils::{parse_sequence, read_json, Allele, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Deserialize)]
struct EnsembleRecord {
    trees: Vec<TreeRecord>,
}

#[derive(Deserialize)]
struct TreeRecord {
    root_sequence: String,
    nodes: Vec<NodeRecord>,
}

#[derive(Deserialize)]
struct NodeRecord {
    parent: i64,
    time: f64,
    #[serde(default)]
    mutations: Vec<MutationRecord>,
}

#[derive(Deserialize)]
struct MutationRecord {
    site: u32,
    from: Allele,
    to: Allele,
    // null marks an unplaced event
    time: Option<f64>,
}

impl TreeRecord {
    fn into_tree(self) -> Result<ArenaTree> {
        let root_sequence = parse_sequence(&self.root_sequence)
            .map_err(|e| format!("Invalid root sequence: {}", e))?;
        let nodes = self
            .nodes
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let parent = match record.parent {
                    -1 => None,
                    p if p >= 0 => Some(p as usize),
                    p => return Err(format!("Node {} has invalid parent index {}", index, p)),
                };
                let mutations = record
                    .mutations
                    .into_iter()
                    .map(|m| Mutation::new(m.site, m.from, m.to, m.time.unwrap_or(f64::NAN)))
                    .collect();
                Ok(Node::new(parent, record.time, mutations))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(ArenaTree::new(nodes, root_sequence))
    }
}

fn into_ensemble(record: EnsembleRecord) -> Result<Ensemble<ArenaTree>> {
    let trees = record
        .trees
        .into_iter()
        .enumerate()
        .map(|(i, t)| t.into_tree().map_err(|e| format!("Tree {}: {}", i, e)))
        .collect::<Result<Vec<_>>>()?;
    validate_trees(&trees)?;
    Ok(Ensemble::new(trees))
}

/// Loads and validates an ensemble from a JSON document (optionally gzipped).
pub fn load_ensemble(path: &Path) -> Result<Ensemble<ArenaTree>> {
    let record: EnsembleRecord = read_json(path)?;
    let ensemble = into_ensemble(record)?;
    log::debug!(
        "Loaded {} trees from {}",
        ensemble.len(),
        path.display()
    );
    Ok(ensemble)
}

pub fn parse_ensemble(json: &str) -> Result<Ensemble<ArenaTree>> {
    let record: EnsembleRecord = serde_json::from_str(json).map_err(|e| e.to_string())?;
    into_ensemble(record)
}
