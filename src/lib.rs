//! pbxlint - Structural defect analysis for Xcode projects
//!
//! This library reads a project bundle (`*.xcodeproj`), resolves every file
//! and group to a location on disk, and reports defects in the project
//! structure.
//!
//! # Architecture
//!
//! The analysis pipeline consists of:
//! 1. **Discovery** - Locate the project bundle named on the command line
//! 2. **Decoding** - Parse `project.pbxproj` (OpenStep, XML or binary plist)
//! 3. **Loading** - Build the typed object graph and resolve paths
//! 4. **Detection** - Run one detector per defect kind
//! 5. **Reporting** - Output diagnoses in various formats

pub mod analysis;
pub mod config;
pub mod discovery;
pub mod pbx;
pub mod project;
pub mod report;

pub use analysis::{DefectKind, Examiner, Findings, NoProgress, Progress};
pub use config::Config;
pub use discovery::ProjectFinder;
pub use project::{FileKind, Project, ProjectError};
pub use report::{Diagnosis, ReportFormat, Reporter};
