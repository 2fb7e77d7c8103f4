use crate::interest::select::{
    SortKey, DEFAULT_MANY_TIPS_FRACTION, DEFAULT_MIN_CONFIDENCE, DEFAULT_MIN_TIP_FRACTION,
};
use crate::utils::Result;
use clap::{ArgAction, ArgGroup, Parser, Subcommand};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

pub static FULL_VERSION: Lazy<String> = Lazy::new(|| {
    match option_env!("MUTINTEREST_BUILD_TAG") {
        Some(tag) => format!("{}-{}", env!("CARGO_PKG_VERSION"), tag),
        None => env!("CARGO_PKG_VERSION").to_string(),
    }
});

#[derive(Parser)]
#[command(name="mutinterest",
          author,
          version=&**FULL_VERSION,
          about,
          long_about = None,
          disable_help_subcommand = true,
          help_template = "{name} {version}\n{author}\n{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}{after-help}",
          )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = ArgAction::Count, help = "Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)")]
    pub verbosity: u8,
}

#[derive(Subcommand)]
pub enum Command {
    #[clap(about = "Mutations of interest across a tree ensemble")]
    Interest(InterestArgs),
    #[clap(about = "Ensemble prevalence bands for one mutation")]
    Prevalence(PrevalenceArgs),
    #[clap(about = "Tree ensemble validator")]
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("interest")))]
#[command(arg_required_else_help(true))]
pub struct InterestArgs {
    #[clap(required = true)]
    #[clap(short = 'e')]
    #[clap(long = "ensemble")]
    #[clap(help = "JSON file with the sampled trees (optionally gzipped)")]
    #[clap(value_name = "ENSEMBLE")]
    #[arg(value_parser = check_file_exists)]
    pub ensemble_path: PathBuf,

    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output-prefix")]
    #[clap(help = "Prefix for output files")]
    #[clap(value_name = "OUTPUT_PREFIX")]
    #[arg(value_parser = check_prefix_path)]
    pub output_prefix: String,

    #[clap(short = 'f')]
    #[clap(long = "feature")]
    #[clap(value_name = "FEATURE")]
    #[clap(help = "Report all mutations or a single category")]
    #[clap(value_parser(["all", "reversal", "same-site", "multiple-introductions", "many-tips"]))]
    #[clap(default_value = "all")]
    pub feature: String,

    #[clap(long = "burn-in")]
    #[clap(value_name = "FRAC")]
    #[clap(help = "Fraction of leading samples to discard")]
    #[clap(default_value = "0.1")]
    #[arg(value_parser = ensure_unit_float)]
    pub burn_in: f64,

    #[clap(long = "sort")]
    #[clap(value_name = "SORT")]
    #[clap(help = "Order rows by site, tips or trees")]
    #[clap(default_value = "site")]
    pub sort_key: SortKey,

    #[clap(long = "descending")]
    #[clap(help = "Sort in descending order")]
    pub descending: bool,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "min-confidence")]
    #[clap(value_name = "FRAC")]
    #[clap(help = "Minimum fraction of trees carrying a mutation")]
    #[clap(default_value_t = DEFAULT_MIN_CONFIDENCE)]
    #[arg(value_parser = ensure_unit_float)]
    pub min_confidence: f64,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "min-tip-fraction")]
    #[clap(value_name = "FRAC")]
    #[clap(help = "Minimum median tip count as a fraction of the tips in the first tree")]
    #[clap(default_value_t = DEFAULT_MIN_TIP_FRACTION)]
    #[arg(value_parser = ensure_unit_float)]
    pub min_tip_fraction: f64,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "many-tips-fraction")]
    #[clap(value_name = "FRAC")]
    #[clap(help = "Tip fraction above which a mutation counts as covering many tips")]
    #[clap(default_value_t = DEFAULT_MANY_TIPS_FRACTION)]
    #[arg(value_parser = ensure_unit_float)]
    pub many_tips_fraction: f64,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "no-apobec")]
    #[clap(help = "Do not score APOBEC context")]
    pub no_apobec: bool,
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("prevalence")))]
#[command(arg_required_else_help(true))]
pub struct PrevalenceArgs {
    #[clap(required = true)]
    #[clap(short = 's')]
    #[clap(long = "samples")]
    #[clap(help = "JSON file with per-tree allele counts by day (optionally gzipped)")]
    #[clap(value_name = "SAMPLES")]
    #[arg(value_parser = check_file_exists)]
    pub samples_path: PathBuf,

    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output-prefix")]
    #[clap(help = "Prefix for output files")]
    #[clap(value_name = "OUTPUT_PREFIX")]
    #[arg(value_parser = check_prefix_path)]
    pub output_prefix: String,

    #[clap(short = 'm')]
    #[clap(long = "mutation")]
    #[clap(value_name = "MUTATION")]
    #[clap(help = "Mutation name such as C241T; overrides the name in the sample file")]
    #[arg(value_parser = check_mutation_name)]
    pub mutation: Option<String>,

    #[clap(help_heading("Advanced"))]
    #[clap(short = 'e')]
    #[clap(long = "ensemble")]
    #[clap(help = "Tree ensemble to report the mutation's time distribution from")]
    #[clap(value_name = "ENSEMBLE")]
    #[arg(value_parser = check_file_exists)]
    pub ensemble_path: Option<PathBuf>,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "burn-in")]
    #[clap(value_name = "FRAC")]
    #[clap(help = "Fraction of leading samples to discard from the ensemble")]
    #[clap(default_value = "0.1")]
    #[arg(value_parser = ensure_unit_float)]
    pub burn_in: f64,
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("validate")))]
#[command(arg_required_else_help(true))]
pub struct ValidateArgs {
    #[clap(required = true)]
    #[clap(short = 'e')]
    #[clap(long = "ensemble")]
    #[clap(help = "JSON file with the sampled trees (optionally gzipped)")]
    #[clap(value_name = "ENSEMBLE")]
    #[arg(value_parser = check_file_exists)]
    pub ensemble_path: PathBuf,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "burn-in")]
    #[clap(value_name = "FRAC")]
    #[clap(help = "Fraction of leading samples to discard")]
    #[clap(default_value = "0.0")]
    #[arg(value_parser = ensure_unit_float)]
    pub burn_in: f64,
}

pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

fn check_prefix_path(s: &str) -> Result<String> {
    let path = Path::new(s);
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            return Err(format!("Path does not exist: {}", parent_dir.display()));
        }
    }
    Ok(s.to_string())
}

fn check_file_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.exists() {
        Err(format!("File does not exist: {}", path.display()))
    } else {
        Ok(path.to_path_buf())
    }
}

fn check_mutation_name(s: &str) -> Result<String> {
    crate::ensemble::MutationKey::from_name(s)?;
    Ok(s.trim().to_string())
}

fn ensure_unit_float(s: &str) -> Result<f64> {
    let value = s
        .parse::<f64>()
        .map_err(|e| format!("Could not parse float: {}", e))?;
    if !(0.0..=1.0).contains(&value) {
        Err(format!(
            "The value must be between 0.0 and 1.0, got: {}",
            value
        ))
    } else {
        Ok(value)
    }
}
