//! `lineage` binary.

use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, debug, info};

use lineage_cli::{Args, error_adapter::render};

fn main() -> ExitCode {
    miette::set_panic_hook();

    let args = Args::parse();
    init_logger(&args.log_level);
    debug!(args:?; "Parsed arguments");

    match lineage_cli::run(&args) {
        Ok(()) => {
            info!(output = args.output; "Layout written");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprint!("{}", render(&err));
            ExitCode::FAILURE
        }
    }
}

fn init_logger(level: &str) {
    let filter = level.parse::<LevelFilter>().unwrap_or_else(|_| {
        eprintln!("lineage: unknown log level `{level}`, using `warn`");
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(filter)
        .format_timestamp(None)
        .init();
}
