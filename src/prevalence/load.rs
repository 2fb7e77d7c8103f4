use super::AlleleSamples;
use crate::ensemble::MutationKey;
use crate::utils::{read_json, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Deserialize)]
struct SampleRecord {
    mutation: Option<String>,
    #[serde(default)]
    first_day: i64,
    counts: Vec<Vec<Vec<f64>>>,
}

/// Sampled allele counts for one mutation, as exported by the sampler.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    pub mutation: Option<MutationKey>,
    /// Day index of the first column, counted from the date epoch.
    pub first_day: i64,
    pub samples: AlleleSamples,
}

impl SampleRecord {
    fn into_sample_set(self) -> Result<SampleSet> {
        let mutation = self
            .mutation
            .as_deref()
            .map(MutationKey::from_name)
            .transpose()?;
        Ok(SampleSet {
            mutation,
            first_day: self.first_day,
            samples: AlleleSamples::new(self.counts)?,
        })
    }
}

pub fn load_samples(path: &Path) -> Result<SampleSet> {
    let record: SampleRecord = read_json(path)?;
    let set = record
        .into_sample_set()
        .map_err(|e| format!("{}: {}", path.display(), e))?;
    log::debug!(
        "Loaded {} trees x {} days of samples from {}",
        set.samples.num_trees(),
        set.samples.num_days(),
        path.display()
    );
    Ok(set)
}

pub fn parse_samples(json: &str) -> Result<SampleSet> {
    let record: SampleRecord = serde_json::from_str(json).map_err(|e| e.to_string())?;
    record.into_sample_set()
}
