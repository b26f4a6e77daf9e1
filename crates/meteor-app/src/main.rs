use std::process::ExitCode;

use clap::Parser;
use log::error;

use meteor_app::cli::Cli;
use meteor_app::runner::Runner;
use meteor_core::config::MeteorConfig;
use meteor_core::error::MeteorError;

fn run(cli: Cli) -> Result<(), MeteorError> {
    let mut config = match &cli.config {
        Some(path) => MeteorConfig::load(path)?,
        None => MeteorConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.scenario.seed = seed;
    }

    let mut runner = Runner::new(&config, cli.scope.into())?;
    let summary = runner.run(cli.ticks, cli.realtime)?;
    println!("{summary}");

    if cli.snapshot {
        println!("{}", serde_json::to_string_pretty(&runner.snapshot())?);
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
