use clap::Parser;
use log::{LevelFilter, error, info};
use mondrain::cli::Args;
use std::{process, str::FromStr};

fn main() {
    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using 'warn' instead.", args.log_level);
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    if let Err(err) = mondrain::run(&args) {
        error!("Run failed: {err}");
        eprintln!("error: {err}");
        process::exit(1);
    }

    info!("Completed successfully");
}
