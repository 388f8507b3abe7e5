#![deny(clippy::all)]
#![forbid(unsafe_code)]

mod config;

use clap::{Arg, ArgMatches, Command, command, value_parser};
use config::{Config, ConfigError};
use life_grid::{GridError, Random, Simulation};
use life_pixels_support::{AnimateError, animate, log_error};
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "./config.json";

#[derive(Debug, Error)]
enum Error {
    #[error("invalid configuration")]
    Config(#[from] ConfigError),
    #[error("could not build the grid")]
    Grid(#[from] GridError),
    #[error("animation stopped")]
    Animate(#[from] AnimateError),
}

fn main() -> ExitCode {
    env_logger::init();
    match run(&cli().get_matches()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log_error("run", &err);
            ExitCode::FAILURE
        }
    }
}

fn cli() -> Command {
    command!()
        .about("Conway's Game of Life on a bounded grid")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("JSON configuration file")
                .default_value(DEFAULT_CONFIG_PATH)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("N")
                .help("Seed for a reproducible random fill")
                .value_parser(value_parser!(u64)),
        )
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let config_path = matches
        .get_one::<PathBuf>("config")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = Config::load(&config_path)?;

    let mut rand = match matches.get_one::<u64>("seed") {
        Some(&seed) => Random::from_seed(seed),
        None => Random::new(),
    };
    let grid = config.build_grid(&mut rand)?;
    info!(
        "Loaded {}: {} x {} grid, {} initialization",
        config_path.display(),
        grid.rows(),
        grid.cols(),
        config.init_policy()
    );

    animate(Simulation::new(grid), config.window_settings())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn cli_defaults_and_overrides() {
        let matches = cli().try_get_matches_from(["conway-life-pixels"]).unwrap();
        assert_eq!(
            matches.get_one::<PathBuf>("config"),
            Some(&PathBuf::from(DEFAULT_CONFIG_PATH))
        );
        assert_eq!(matches.get_one::<u64>("seed"), None);

        let matches = cli()
            .try_get_matches_from(["conway-life-pixels", "-c", "life.json", "--seed", "42"])
            .unwrap();
        assert_eq!(
            matches.get_one::<PathBuf>("config"),
            Some(&PathBuf::from("life.json"))
        );
        assert_eq!(matches.get_one::<u64>("seed"), Some(&42));
    }

    #[test]
    fn missing_config_fails_before_any_window_opens() {
        let matches = cli()
            .try_get_matches_from(["conway-life-pixels", "--config", "no/such/config.json"])
            .unwrap();
        assert!(matches!(run(&matches), Err(Error::Config(ConfigError::Io { .. }))));
    }
}
