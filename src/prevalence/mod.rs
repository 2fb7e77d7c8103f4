mod load;
mod reduce;
mod samples;

pub use load::{load_samples, parse_samples, SampleSet};
pub use reduce::{reduce_prevalence, PrevalenceBand, REPORTING_RANKS};
pub use samples::AlleleSamples;
