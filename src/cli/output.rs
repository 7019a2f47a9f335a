use colored::Colorize;
use std::fmt;

use crate::errors::CliError;
use crate::stats::StatisticsResponse;

/// Layout of JSON written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rendering {
    Pretty,
    Compact,
}

pub fn render(response: &StatisticsResponse, rendering: Rendering) -> Result<String, CliError> {
    let json = match rendering {
        Rendering::Pretty => serde_json::to_string_pretty(response)?,
        Rendering::Compact => serde_json::to_string(response)?,
    };
    Ok(json)
}

fn label(text: &str, kind: Label) -> String {
    match kind {
        Label::Error => text.bright_red().bold().to_string(),
        Label::Warning => text.bright_yellow().to_string(),
    }
}

#[derive(Clone, Copy)]
enum Label {
    Error,
    Warning,
}

pub fn error(message: impl fmt::Display) {
    eprintln!("{} {}", label("ERROR:", Label::Error), message);
}

pub fn warning(message: impl fmt::Display) {
    eprintln!("{} {}", label("WARNING:", Label::Warning), message);
}

/// Prefix of a script line failure, e.g. `line 3: Invalid report type: weekly`.
pub fn line_error(line: usize, message: impl fmt::Display) {
    error(format!("line {line}: {message}"));
}
