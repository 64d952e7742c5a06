/// Handles argument parsing and run orchestration.
pub mod cli;

/// Defines custom error types.
pub mod error;

/// Constants used throughout the application.
pub mod constants;

/// The immutable run configuration and database engine selection.
pub mod options;

/// Template parsing and rendering functionality.
pub mod renderer;

/// Engine-dependent assembly of the generated artifacts.
pub mod artifacts;

/// Mutation primitives for the target project tree.
pub mod project;

/// Regex-based patching of database.yml sections.
pub mod patcher;

/// Staging and committing through git2.
pub mod git;

/// The ordered step pipeline.
pub mod recipe;
