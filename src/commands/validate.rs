use crate::cli::ValidateArgs;
use crate::ensemble::{load_ensemble, ArenaTree, PhyloTree};
use crate::utils::{math::median, Result};

pub fn validate(args: ValidateArgs) -> Result<()> {
    // Topology errors surface here as load failures
    let ensemble = load_ensemble(&args.ensemble_path)?;
    let trees = ensemble.after_burn_in(args.burn_in);
    if trees.is_empty() {
        return Err("No trees left after burn-in".to_string());
    }

    let node_stats = calculate_stats(&collect(trees, |t| t.size()));
    let tip_stats = calculate_stats(&collect(trees, |t| t.tip_count()));
    let mutation_stats = calculate_stats(&collect(trees, |t| t.mutation_count()));
    let unplaced: usize = trees
        .iter()
        .flat_map(|t| t.nodes())
        .flat_map(|n| &n.mutations)
        .filter(|m| !m.is_placed())
        .count();
    let sites: Vec<usize> = trees.iter().map(|t| t.root_sequence().len()).collect();

    log::info!(
        "Nodes per Tree - Range: [{},{}], Median: {:.2}, Mean: {:.2}, StdDev: {:.2}",
        node_stats.min,
        node_stats.max,
        node_stats.median,
        node_stats.mean,
        node_stats.std_dev
    );
    log::info!(
        "Tips per Tree - Range: [{},{}], Median: {:.2}, Mean: {:.2}, StdDev: {:.2}",
        tip_stats.min,
        tip_stats.max,
        tip_stats.median,
        tip_stats.mean,
        tip_stats.std_dev
    );
    log::info!(
        "Mutations per Tree - Range: [{},{}], Median: {:.2}, Mean: {:.2}, StdDev: {:.2}",
        mutation_stats.min,
        mutation_stats.max,
        mutation_stats.median,
        mutation_stats.mean,
        mutation_stats.std_dev
    );
    if unplaced > 0 {
        log::warn!("{} mutations have no time and are ignored", unplaced);
    }
    if sites.iter().any(|&n| n != sites[0]) {
        log::warn!("Root sequences differ in length across trees");
    }

    log::info!(
        "Validation successful. Trees pass={} (of {} sampled)",
        trees.len(),
        ensemble.len()
    );
    Ok(())
}

fn collect<F: Fn(&ArenaTree) -> usize>(trees: &[ArenaTree], f: F) -> Vec<u32> {
    trees.iter().map(|t| f(t) as u32).collect()
}

fn calculate_stats(data: &[u32]) -> Stats {
    let len = data.len().max(1) as f64;
    let mean = data.iter().map(|&x| x as f64).sum::<f64>() / len;
    let std_dev = (data
        .iter()
        .map(|&x| (x as f64 - mean).powi(2))
        .sum::<f64>()
        / len)
        .sqrt();
    Stats {
        min: data.iter().copied().min().unwrap_or(0),
        max: data.iter().copied().max().unwrap_or(0),
        mean,
        median: median(data).unwrap_or(0.0),
        std_dev,
    }
}

struct Stats {
    min: u32,
    max: u32,
    mean: f64,
    median: f64,
    std_dev: f64,
}
