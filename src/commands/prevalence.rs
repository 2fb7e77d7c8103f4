use crate::cli::PrevalenceArgs;
use crate::ensemble::{load_ensemble, MutationKey};
use crate::interest::mutation_distribution;
use crate::prevalence::{load_samples, reduce_prevalence};
use crate::utils::{create_writer, open_output_file, Result};
use crate::writers::PrevalenceWriter;
use std::path::Path;

pub fn prevalence(args: PrevalenceArgs) -> Result<()> {
    let sample_set = load_samples(&args.samples_path)?;
    let key = match (&args.mutation, sample_set.mutation) {
        (Some(name), _) => MutationKey::from_name(name)?,
        (None, Some(key)) => key,
        (None, None) => {
            return Err(format!(
                "{} names no mutation; pass one with --mutation",
                args.samples_path.display()
            ))
        }
    };
    if let Some(named) = sample_set.mutation.filter(|named| *named != key) {
        log::warn!("Sample file is for {}, reporting {}", named, key);
    }

    if let Some(path) = &args.ensemble_path {
        log_time_distribution(path, args.burn_in, &key)?;
    }

    let bands = reduce_prevalence(&sample_set.samples, key.to)?;
    log::info!(
        "{}: {} days of prevalence over {} trees",
        key,
        bands.len(),
        sample_set.samples.num_trees()
    );

    let mut writer = create_writer(&args.output_prefix, "prevalence.tsv", |path| {
        PrevalenceWriter::new(open_output_file(path)?, &key.name())
    })?;
    writer.write_series(sample_set.first_day, &bands)?;
    writer.finish()?;
    Ok(())
}

fn log_time_distribution(path: &Path, burn_in: f64, key: &MutationKey) -> Result<()> {
    let ensemble = load_ensemble(path)?;
    let distribution = mutation_distribution(ensemble.after_burn_in(burn_in), key);
    match distribution.time_range() {
        Some((earliest, latest)) => log::info!(
            "{} placed {} times in {} of {} trees ({:.1}%), times {:.2} to {:.2}",
            key,
            distribution.len(),
            distribution.tree_count(),
            distribution.possible_trees,
            100.0 * distribution.confidence(),
            earliest,
            latest
        ),
        None => log::warn!("{} is never placed in the ensemble", key),
    }
    Ok(())
}
