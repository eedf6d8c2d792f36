use std::fmt;

use chrono::NaiveDate;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Select};

use crate::cli::CliError;
use crate::cli::output;

/// Print an informational message via the standard CLI output helpers.
pub fn print_info(message: impl fmt::Display) {
    output::info(message);
}

/// Print a warning message via the standard CLI output helpers.
pub fn print_warning(message: impl fmt::Display) {
    output::warning(message);
}

/// Print an error message via the standard CLI output helpers.
pub fn print_error(message: impl fmt::Display) {
    output::error(message);
}

/// Print a success message via the standard CLI output helpers.
pub fn print_success(message: impl fmt::Display) {
    output::success(message);
}

/// Prompt the user for confirmation with a yes/no question.
pub fn confirm(theme: &ColorfulTheme, prompt: &str) -> Result<bool, CliError> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .interact()
        .map_err(CliError::from)
}

/// Prompt the user for free-form text input. Empty input is accepted; the
/// form model decides whether blank is valid.
pub fn prompt_text(theme: &ColorfulTheme, prompt: &str) -> Result<String, CliError> {
    Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(CliError::from)
}

/// Prompt for a number, re-asking until the input parses.
pub fn prompt_number(theme: &ColorfulTheme, prompt: &str) -> Result<f64, CliError> {
    Input::<f64>::with_theme(theme)
        .with_prompt(prompt)
        .interact_text()
        .map_err(CliError::from)
}

/// Prompt for an ISO date (YYYY-MM-DD), re-asking until the input parses.
pub fn prompt_date(theme: &ColorfulTheme, prompt: &str) -> Result<NaiveDate, CliError> {
    loop {
        let raw = Input::<String>::with_theme(theme)
            .with_prompt(format!("{prompt} (YYYY-MM-DD)"))
            .interact_text()?;
        match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
            Ok(date) => return Ok(date),
            Err(_) => print_warning("Not a valid date, expected YYYY-MM-DD."),
        }
    }
}

/// Prompt for one of a fixed list of values.
pub fn prompt_choice(
    theme: &ColorfulTheme,
    prompt: &str,
    values: &[&str],
) -> Result<String, CliError> {
    let index = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(values)
        .default(0)
        .interact()?;
    Ok(values[index].to_string())
}

/// Prompt for one entry of an owned item list, returning its index.
pub fn prompt_index(
    theme: &ColorfulTheme,
    prompt: &str,
    items: &[String],
) -> Result<usize, CliError> {
    Select::with_theme(theme)
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
        .map_err(CliError::from)
}

/// Prompt for any subset of a fixed list of values.
pub fn prompt_multi(
    theme: &ColorfulTheme,
    prompt: &str,
    values: &[&str],
) -> Result<Vec<String>, CliError> {
    let indices = MultiSelect::with_theme(theme)
        .with_prompt(prompt)
        .items(values)
        .interact()?;
    Ok(indices.into_iter().map(|i| values[i].to_string()).collect())
}
