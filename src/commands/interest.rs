use crate::cli::InterestArgs;
use crate::ensemble::{load_ensemble, Mutation, PhyloTree};
use crate::interest::{
    analyze_ensemble, is_apobec_context,
    select::{category, select, sort_mutations, SelectionParams, SortDirection, SortKey},
    Feature,
};
use crate::utils::{create_writer, format_number_with_commas, open_output_file, Allele, Result};
use crate::writers::MutationsWriter;
use std::time;

/// Settings for one interest report, resolved from the command line.
#[derive(Debug, Clone)]
pub struct InterestParams {
    pub burn_in: f64,
    pub feature: Option<Feature>,
    pub many_tips_fraction: f64,
    pub min_confidence: f64,
    pub min_tip_fraction: f64,
    pub sort_key: SortKey,
    pub direction: SortDirection,
    pub score_apobec: bool,
}

impl InterestParams {
    pub fn from_args(args: &InterestArgs) -> Result<Self> {
        let feature = match args.feature.as_str() {
            "all" => None,
            name => Some(name.parse::<Feature>()?),
        };
        Ok(Self {
            burn_in: args.burn_in,
            feature,
            many_tips_fraction: args.many_tips_fraction,
            min_confidence: args.min_confidence,
            min_tip_fraction: args.min_tip_fraction,
            sort_key: args.sort_key,
            direction: if args.descending {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            },
            score_apobec: !args.no_apobec,
        })
    }
}

pub fn interest(args: InterestArgs) -> Result<()> {
    let start_timer = time::Instant::now();
    let params = InterestParams::from_args(&args)?;

    let ensemble = load_ensemble(&args.ensemble_path)?;
    let knee = ensemble.knee_index(params.burn_in);
    let trees = ensemble.after_burn_in(params.burn_in);
    log::info!(
        "Ensemble has {} trees, analyzing {} after burn-in (knee index {})",
        format_number_with_commas(ensemble.len()),
        format_number_with_commas(trees.len()),
        knee
    );

    let score_apobec = params.score_apobec;
    let set = analyze_ensemble(trees, |mutation: &Mutation, root: &[Allele]| {
        score_apobec && is_apobec_context(mutation, root)
    })?;

    // Tip thresholds refer to the first tree kept after burn-in
    let tree_tip_count = trees.first().map_or(0, |tree| tree.tip_count());
    let selection = SelectionParams {
        min_confidence: params.min_confidence,
        min_tip_fraction: params.min_tip_fraction,
        tree_tip_count,
    };
    let candidates = category(
        &set,
        params.feature,
        tree_tip_count,
        params.many_tips_fraction,
    );
    let mut rows = select(candidates, &selection);
    sort_mutations(&mut rows, params.sort_key, params.direction);

    let mut writer = create_writer(&args.output_prefix, "mutations.tsv", |path| {
        MutationsWriter::new(open_output_file(path)?)
    })?;
    for moi in &rows {
        writer.write(moi)?;
    }
    log::info!(
        "Wrote {} of {} mutations ({})",
        writer.rows(),
        set.all().len(),
        params.feature.map_or("all", |f| f.as_str())
    );
    writer.finish()?;

    log::info!("Total execution time: {:.2?}", start_timer.elapsed());
    Ok(())
}
