use clap::Parser;
use mutinterest::{
    cli::{init_verbose, Cli, Command, FULL_VERSION},
    commands::{interest, prevalence, validate},
    utils::{handle_error_and_exit, Result},
};

fn runner() -> Result<()> {
    let cli = Cli::parse();
    init_verbose(&cli);
    let subcommand_name = match cli.command {
        Command::Interest(_) => "interest",
        Command::Prevalence(_) => "prevalence",
        Command::Validate(_) => "validate",
    };

    log::info!(
        "Running {}-{} [{}]",
        env!("CARGO_PKG_NAME"),
        *FULL_VERSION,
        subcommand_name
    );
    match cli.command {
        Command::Interest(args) => interest::interest(args)?,
        Command::Prevalence(args) => prevalence::prevalence(args)?,
        Command::Validate(args) => validate::validate(args)?,
    }
    log::info!("{} end", env!("CARGO_PKG_NAME"));
    Ok(())
}

fn main() {
    if let Err(e) = runner() {
        handle_error_and_exit(e);
    }
}
