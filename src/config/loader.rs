// src/config/loader.rs

use std::path::Path;

use tracing::info;

use crate::config::model::{Project, RawProjectFile};
use crate::errors::Result;
use crate::fs::{FileSystem, RealFileSystem};

/// Reference project shipped with the crate (15 tasks, three scenarios).
const REFERENCE_PROJECT: &str = include_str!("../../demos/reference.toml");

/// Parse TOML text into a `RawProjectFile`.
///
/// Only deserialization happens here; see [`parse_and_validate`] for the
/// semantic checks.
pub fn parse_str(contents: &str) -> Result<RawProjectFile> {
    let raw: RawProjectFile = toml::from_str(contents)?;
    Ok(raw)
}

/// Parse TOML text and validate it into a [`Project`].
pub fn parse_and_validate(contents: &str) -> Result<Project> {
    let raw = parse_str(contents)?;
    Project::try_from(raw)
}

/// Load a project file through the given filesystem and return the raw,
/// unvalidated model.
pub fn load_from_path_with(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<RawProjectFile> {
    let contents = fs.read_to_string(path.as_ref())?;
    parse_str(&contents)
}

/// Load and validate through the given filesystem.
///
/// Checks for:
/// - unknown `after`, `terminal` and aggregate references,
/// - precedence cycles (reported as infeasible),
/// - missing, unknown or negative durations in any scenario,
/// - aggregates whose duration differs from the sum of their parts.
pub fn load_and_validate_with(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<Project> {
    let path = path.as_ref();
    let raw = load_from_path_with(fs, path)?;
    let project = Project::try_from(raw)?;
    info!(
        path = %path.display(),
        project = project.name(),
        tasks = project.task_order().len(),
        "loaded project"
    );
    Ok(project)
}

/// Load and validate a project file from disk.
///
/// This is the recommended entry point for the rest of the application.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Project> {
    load_and_validate_with(&RealFileSystem, path)
}

/// The embedded reference project, validated.
pub fn reference_project() -> Result<Project> {
    parse_and_validate(REFERENCE_PROJECT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CritpathError;
    use crate::fs::mock::MockFileSystem;

    #[test]
    fn reference_project_is_valid() {
        let project = reference_project().unwrap();
        assert_eq!(project.task_order().len(), 15);
        let scenarios: Vec<&str> = project.scenario_names().collect();
        assert_eq!(scenarios, vec!["best", "expected", "worst"]);
        assert_eq!(project.terminal_tasks(), vec!["H".to_string()]);
    }

    #[test]
    fn loads_through_mock_filesystem() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "plans/tiny.toml",
            r#"
[project]
tasks = ["A", "B"]

[task.B]
after = ["A"]

[scenario.expected]
A = 2
B = 3
"#,
        );

        let project = load_and_validate_with(&fs, "plans/tiny.toml").unwrap();
        assert_eq!(project.name(), "project");
        assert_eq!(project.predecessors_of("B"), ["A".to_string()]);
        assert_eq!(project.terminal_tasks(), vec!["B".to_string()]);
    }

    #[test]
    fn missing_file_is_reported() {
        let fs = MockFileSystem::new();
        let err = load_and_validate_with(&fs, "nope.toml").unwrap_err();
        assert!(matches!(err, CritpathError::Other(_)), "{err:?}");
    }

    #[test]
    fn malformed_toml_is_a_toml_error() {
        let err = parse_and_validate("[project\ntasks = 1").unwrap_err();
        assert!(matches!(err, CritpathError::Toml(_)), "{err:?}");
    }
}
