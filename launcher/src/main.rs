//! Server launcher.
//!
//! Resolves launch options from the command line, `PORT`/`HOST`/`APP_ENV`/
//! `RACK_ENV`, and `config/launcher.toml`, then prints them as JSON.

use std::path::Path;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use launcher::config::{CONFIG_PATH, load_config};
use launcher::env::EnvVars;
use launcher::exit_codes;
use launcher::options::{matches_from, resolve_matches};
use tracing::info;

fn main() {
    launcher::logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(exit_codes::INVALID);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let matches = match matches_from(&args) {
        Ok(matches) => matches,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => return Err(err).context("parse server arguments"),
    };
    let config = load_config(Path::new(CONFIG_PATH)).context("load launcher config")?;
    let env = EnvVars::from_process();

    let options = resolve_matches(&matches, &args, &env, &config)?;
    info!(options = %options, "resolved server options");

    let mut payload = serde_json::to_string_pretty(&options).context("serialize options")?;
    payload.push('\n');
    print!("{payload}");
    Ok(())
}
