use std::io;

use clap::{CommandFactory, Parser};
use flowmetrics::commands::base_commands::{CliArgs, Commands};
use flowmetrics::commands::forecast_cmd::forecast_command;
use flowmetrics::commands::metrics_cmd::metrics_command;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("flowmetrics=warn")),
        )
        .init();

    let args = CliArgs::parse();
    let result = match args.command {
        Commands::Metrics { query } => metrics_command(&query),
        Commands::Forecast {
            query,
            horizon,
            sprint_length,
        } => forecast_command(&query, horizon, sprint_length),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut CliArgs::command(),
                "flowmetrics",
                &mut io::stdout(),
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
