//! CLI argument definitions for the `cwe` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use cwe_standards::SubsetKind;

#[derive(Parser)]
#[command(
    name = "cwe",
    version,
    about = "Look up CWE weaknesses, categories and views",
    long_about = "Look up entries of the Common Weakness Enumeration.\n\n\
                  Identifiers are resolved against the per-view CSV files of the\n\
                  dataset first, then against the categories and views of the\n\
                  XML catalog."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Dataset directory (overrides CWE_DATA_DIR).
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Catalog configuration file (TOML) replacing the built-in catalog.
    #[arg(
        long = "catalog",
        value_name = "TOML",
        global = true,
        conflicts_with = "data_dir"
    )]
    pub catalog: Option<PathBuf>,

    /// Adjust log verbosity (-v info, -vv debug, -vvv trace, -q errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Prefix log events with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Include the module path of each log event.
    #[arg(long = "log-target", global = true)]
    pub log_target: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the record for an identifier.
    Get(GetArgs),

    /// Test whether an identifier belongs to a subset (exit 0 if it does,
    /// 1 if not).
    Member(MemberArgs),

    /// List every record of a subset.
    List(ListArgs),

    /// List the registered subsets.
    Subsets(SubsetsArgs),
}

#[derive(Parser)]
pub struct GetArgs {
    /// CWE identifier, without the "CWE-" prefix.
    #[arg(value_name = "ID")]
    pub id: String,

    /// Print the record as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct MemberArgs {
    /// Subset name, as listed by `cwe subsets`.
    #[arg(value_name = "SUBSET")]
    pub subset: String,

    #[arg(value_name = "ID")]
    pub id: String,
}

#[derive(Parser)]
pub struct ListArgs {
    #[arg(value_name = "SUBSET")]
    pub subset: String,

    /// Print the records as a JSON array.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct SubsetsArgs {
    /// Only subsets of this kind (navigation, external-mapping, helpful-view,
    /// obsolete-view; directory names are accepted too).
    #[arg(long = "kind", value_name = "KIND")]
    pub kind: Option<SubsetKind>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn get_takes_an_identifier() {
        let cli = Cli::try_parse_from(["cwe", "get", "79", "--json"]).unwrap();
        let Command::Get(args) = cli.command else {
            panic!("expected get");
        };
        assert_eq!(args.id, "79");
        assert!(args.json);
    }

    #[test]
    fn global_options_follow_the_subcommand() {
        let cli = Cli::try_parse_from([
            "cwe",
            "member",
            "cwe_top_25_2023",
            "20",
            "--data-dir",
            "/data",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/data")));
        assert!(matches!(cli.log_format, LogFormatArg::Json));
        let Command::Member(args) = cli.command else {
            panic!("expected member");
        };
        assert_eq!(args.subset, "cwe_top_25_2023");
        assert_eq!(args.id, "20");
    }

    #[test]
    fn catalog_conflicts_with_data_dir() {
        let result = Cli::try_parse_from([
            "cwe",
            "subsets",
            "--catalog",
            "catalog.toml",
            "--data-dir",
            "/data",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn subsets_kind_accepts_directory_and_dashed_names() {
        for (text, kind) in [
            ("external-mapping", SubsetKind::ExternalMapping),
            ("navigate_cwe", SubsetKind::Navigation),
            ("Obsolete_Views", SubsetKind::ObsoleteView),
        ] {
            let cli = Cli::try_parse_from(["cwe", "subsets", "--kind", text]).unwrap();
            let Command::Subsets(args) = cli.command else {
                panic!("expected subsets");
            };
            assert_eq!(args.kind, Some(kind));
        }
        assert!(Cli::try_parse_from(["cwe", "subsets", "--kind", "views"]).is_err());
    }

    #[test]
    fn list_requires_a_subset() {
        assert!(Cli::try_parse_from(["cwe", "list"]).is_err());
    }
}
