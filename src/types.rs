// src/types.rs

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Deserialize;

/// Task identifier as written in the project file.
pub type TaskName = String;

/// Strategy used to compute the earliest-start schedule.
///
/// - `Lp`: formulate the schedule as a linear program and solve it with the
///   in-crate simplex engine (default).
/// - `CriticalPath`: longest-path traversal in topological order. Produces
///   the same start and completion values without an LP.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SolveMethod {
    #[default]
    Lp,
    #[value(alias = "cpm")]
    CriticalPath,
}

impl FromStr for SolveMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lp" => Ok(SolveMethod::Lp),
            "critical-path" | "critical_path" | "cpm" => Ok(SolveMethod::CriticalPath),
            other => Err(format!(
                "invalid solver method: {other} (expected \"lp\" or \"critical-path\")"
            )),
        }
    }
}

impl fmt::Display for SolveMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveMethod::Lp => f.write_str("lp"),
            SolveMethod::CriticalPath => f.write_str("critical-path"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_parses_aliases() {
        assert_eq!("LP".parse::<SolveMethod>(), Ok(SolveMethod::Lp));
        assert_eq!("cpm".parse::<SolveMethod>(), Ok(SolveMethod::CriticalPath));
        assert!("simplex".parse::<SolveMethod>().is_err());
    }

    #[test]
    fn lp_is_the_default_method() {
        assert_eq!(SolveMethod::default(), SolveMethod::Lp);
    }
}
