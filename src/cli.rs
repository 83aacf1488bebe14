// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::types::SolveMethod;

/// Command-line arguments for `critpath`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "critpath",
    version,
    about = "Minimum project time under precedence constraints, with a Gantt chart.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the project file (TOML).
    ///
    /// Default: `Project.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Project.toml")]
    pub config: String,

    /// Use the embedded reference project instead of `--config`.
    #[arg(long, conflicts_with = "config")]
    pub reference: bool,

    /// Duration scenario to solve.
    #[arg(long, value_name = "NAME", default_value = "expected")]
    pub scenario: String,

    /// Override the project's `[solver] method`.
    #[arg(long, value_enum, value_name = "METHOD")]
    pub method: Option<SolveMethod>,

    /// Abort the solve after this many milliseconds.
    #[arg(long, value_name = "MS")]
    pub time_limit_ms: Option<u64>,

    /// Write an SVG Gantt chart to this path.
    #[arg(long, value_name = "PATH")]
    pub svg: Option<String>,

    /// Skip the terminal Gantt chart.
    #[arg(long)]
    pub no_chart: bool,

    /// Colour the terminal chart.
    #[arg(long)]
    pub color: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CRITPATH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the project, but don't solve.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = CliArgs::try_parse_from(["critpath"]).unwrap();
        assert_eq!(args.config, "Project.toml");
        assert_eq!(args.scenario, "expected");
        assert!(args.method.is_none());
        assert!(!args.reference);
    }

    #[test]
    fn method_and_budget_flags() {
        let args = CliArgs::try_parse_from([
            "critpath",
            "--reference",
            "--scenario",
            "worst",
            "--method",
            "critical-path",
            "--time-limit-ms",
            "250",
            "--svg",
            "out/chart.svg",
        ])
        .unwrap();
        assert_eq!(args.method, Some(SolveMethod::CriticalPath));
        assert_eq!(args.time_limit_ms, Some(250));
        assert_eq!(args.svg.as_deref(), Some("out/chart.svg"));
        assert_eq!(args.scenario, "worst");
    }

    #[test]
    fn reference_conflicts_with_explicit_config() {
        let res = CliArgs::try_parse_from(["critpath", "--reference", "--config", "x.toml"]);
        assert!(res.is_err());
    }
}
