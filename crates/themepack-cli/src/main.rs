//! Themepack CLI - builds distributable theme packages.
//!
//! Parses arguments, initializes logging and colors, then dispatches to the
//! selected command.

use clap::Parser;
use miette::Result;
use themepack_cli::{cli, commands, error, logger, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Build(build_args) => commands::build_execute(build_args, args.quiet).await,
        cli::Command::Eject(eject_args) => commands::eject_execute(eject_args, args.quiet).await,
    };

    result.map_err(error::cli_error_to_miette)
}
