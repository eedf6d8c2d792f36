pub mod io;
pub mod output;
mod runner;

pub use runner::run_cli;

use thiserror::Error;

use crate::errors::FormError;

/// Errors surfaced by the interactive questionnaire shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Prompt error: {0}")]
    Dialoguer(#[from] dialoguer::Error),
    #[error(transparent)]
    Form(#[from] FormError),
}
