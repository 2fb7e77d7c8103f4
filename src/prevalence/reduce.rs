use super::AlleleSamples;
use crate::utils::{
    math::{percentile, sort_floats},
    Allele, Result,
};

/// Normalized ranks reported for each day: lower tail, median, upper tail.
pub const REPORTING_RANKS: [f64; 3] = [0.025, 0.5, 0.975];

/// Spread of the alt-allele proportion across the ensemble on one day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrevalenceBand {
    pub low: f64,
    pub median: f64,
    pub high: f64,
}

/// One band per day for the share of sampled sequences carrying `alt`.
pub fn reduce_prevalence(samples: &AlleleSamples, alt: Allele) -> Result<Vec<PrevalenceBand>> {
    let num_trees = samples.num_trees();
    let mut proportions = Vec::with_capacity(num_trees);
    let mut bands = Vec::with_capacity(samples.num_days());

    for day in 0..samples.num_days() {
        proportions.clear();
        proportions.extend((0..num_trees).map(|tree| samples.proportion(tree, alt, day)));
        sort_floats(&mut proportions);

        let [low, median, high] = REPORTING_RANKS.map(|rank| percentile(&proportions, rank));
        match (low, median, high) {
            (Some(low), Some(median), Some(high)) => bands.push(PrevalenceBand { low, median, high }),
            _ => return Err(format!("Day {} has no sampled trees", day)),
        }
    }

    log::debug!(
        "Reduced {} days of {} prevalence over {} trees",
        bands.len(),
        alt,
        num_trees
    );
    Ok(bands)
}
