//! `areadesk` command-line front end.
//!
//! # Responsibility
//! - Resolve configuration, start logging, and pick the gateway.
//! - Drive the core controllers the way an interactive UI would.

use areadesk_core::{init_from_config, ClientConfig, HttpGateway, InMemoryGateway};
use clap::ArgMatches;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

mod app;
mod commands;
mod render;

fn main() -> ExitCode {
    let matches = app::build_cli().get_matches();

    let config = match resolve_config(&matches) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = init_from_config(&config.logging) {
        eprintln!("warning: file logging disabled: {err}");
    }

    let result = if matches.get_flag("offline") {
        commands::run_command(InMemoryGateway::new(), &matches)
    } else {
        commands::run_command(HttpGateway::from_config(&config.server), &matches)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn resolve_config(matches: &ArgMatches) -> Result<ClientConfig, Box<dyn std::error::Error>> {
    let path = matches.get_one::<String>("config").map(Path::new);
    let mut config = ClientConfig::load(path)?;

    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config.server.base_url = base_url.trim().to_string();
    }
    if let Some(log_dir) = matches.get_one::<String>("log-dir") {
        config.logging.dir = Some(PathBuf::from(log_dir));
    }
    config.validate()?;
    Ok(config)
}
