//! CWE lookup CLI.

use clap::{ColorChoice, Parser};
use cwe_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{open_database, run_get, run_list, run_member, run_subsets};

/// Exit status for any failed command.
const EXIT_FAILURE: i32 = 2;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(EXIT_FAILURE);
    }

    let result = open_database(&cli).and_then(|db| match &cli.command {
        Command::Get(args) => run_get(&db, args).map(|()| 0),
        Command::Member(args) => run_member(&db, args).map(|member| if member { 0 } else { 1 }),
        Command::List(args) => run_list(&db, args).map(|()| 0),
        Command::Subsets(args) => run_subsets(&db, args).map(|()| 0),
    });
    let exit_code = match result {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            EXIT_FAILURE
        }
    };
    std::process::exit(exit_code);
}

/// Logging configuration from the command line.
///
/// `--log-level` wins over `-v`/`-q`; either one disables `RUST_LOG`.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };

    LogConfig {
        level_filter,
        use_env_filter: !(cli.verbosity.is_present() || cli.log_level.is_some()),
        with_timestamps: cli.log_timestamps,
        with_target: cli.log_target,
        with_ansi,
        format,
        log_file: cli.log_file.clone(),
    }
}
