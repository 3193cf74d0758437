mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "songconv=debug,songconv_core=debug"
    } else {
        "songconv=info,songconv_core=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match args.command {
        Command::Detect { input, json } => commands::detect::run(&input, json),
        Command::Convert {
            inputs,
            output,
            config,
            seed,
            sample_rate,
            pretty,
        } => {
            let settings = commands::convert::load_settings(
                config.as_deref(),
                commands::convert::Overrides {
                    seed,
                    sample_rate,
                    pretty,
                },
            )?;
            commands::convert::run(&inputs, &output, &settings)
        }
        Command::Parse { file, pretty } => commands::parse::run(&file, pretty),
        Command::Bpm { track, sample_rate } => commands::bpm::run(&track, sample_rate),
    }
}
