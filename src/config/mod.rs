// src/config/mod.rs

//! Project file loading and validation.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a project file from disk or an in-memory filesystem (`loader.rs`).
//! - Validate references, durations and acyclicity (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{
    load_and_validate, load_and_validate_with, parse_and_validate,
    reference_project,
};
pub use model::{
    AggregateConfig, Durations, Project, ProjectSection, RawProjectFile, SolverSection,
    TaskConfig,
};
