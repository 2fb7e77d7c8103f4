mod load;
mod mutation;
mod tree;
mod validate;

pub use load::{load_ensemble, parse_ensemble};
pub use mutation::{Mutation, MutationKey};
pub use tree::{ArenaTree, Ensemble, Node, PhyloTree};
pub use validate::{validate_topology, validate_trees};
