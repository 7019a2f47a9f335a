//! Command-line front end: `spendsmart_stats user=<uuid> type=<report> [key=value...]`.

pub mod args;
pub mod output;

use std::io::{self, BufRead};

use shell_words::split;
use tracing::debug;

pub use crate::errors::CliError;

use crate::config::{Config, ConfigManager};
use crate::core::services::StatisticsService;
use crate::core::time::{Clock, FixedClock, SystemClock};
use crate::storage::JsonRecordStore;
use crate::utils::build_info;

use args::CliArgs;
use output::Rendering;

/// Environment variable switching the binary to line-oriented script mode.
pub const SCRIPT_ENV: &str = "SPENDSMART_STATS_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let tokens: Vec<String> = std::env::args().skip(1).collect();
    if tokens.iter().any(|token| token == "--version" || token == "-V") {
        println!("{}", build_info::current().summary());
        return Ok(());
    }

    let config = ConfigManager::new()?.load()?;
    if std::env::var_os(SCRIPT_ENV).is_some() {
        let stdin = io::stdin();
        return run_script(&config, &tokens, stdin.lock());
    }

    let json = execute(&config, &tokens, Rendering::Pretty)?;
    println!("{json}");
    Ok(())
}

/// Runs one request per input line. Command-line tokens act as defaults for every line.
///
/// Failures are reported per line on stderr; the run fails if any line did.
pub fn run_script(config: &Config, defaults: &[String], input: impl BufRead) -> Result<(), CliError> {
    let mut failures = 0;
    let mut requests = 0;
    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        requests += 1;

        let outcome = split(trimmed)
            .map_err(|err| CliError::Input(err.to_string()))
            .and_then(|tokens| {
                let mut merged = defaults.to_vec();
                merged.extend(tokens);
                execute(config, &merged, Rendering::Compact)
            });
        match outcome {
            Ok(json) => println!("{json}"),
            Err(err) => {
                failures += 1;
                output::line_error(index + 1, err);
            }
        }
    }

    if requests == 0 {
        output::warning("no requests read from input");
    }
    if failures > 0 {
        return Err(CliError::Failed(failures));
    }
    Ok(())
}

/// Parses one invocation, runs the report and renders the response.
pub fn execute(config: &Config, tokens: &[String], rendering: Rendering) -> Result<String, CliError> {
    let args = CliArgs::parse(tokens)?;
    let request = args.to_request(config.default_user)?;
    let store = JsonRecordStore::new(args.data_dir.clone().or_else(|| config.data_dir.clone()))?;
    debug!(root = %store.base_dir().display(), "opened record store");

    let clock: Box<dyn Clock> = match args.today {
        Some(today) => Box::new(FixedClock::new(today)),
        None => Box::new(SystemClock),
    };
    let response = StatisticsService::report(&store, clock.as_ref(), &request)?;
    output::render(&response, rendering)
}
