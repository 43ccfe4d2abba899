//! Conversion from CLI errors to miette reports.

use super::CliError;
use miette::Report;

/// Convert a [`CliError`] into a report for the terminal.
///
/// Build errors keep their own diagnostic codes and help. A stage failure
/// is reported as its failure message wrapping the collaborator error, so
/// the tool output shows up as help underneath.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Build(e) => Report::new(e),
        CliError::Pipeline(failure) => Report::new(failure.error).wrap_err(failure.message),
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        _ => miette::miette!("{}", err),
    }
}
