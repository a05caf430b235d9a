use std::path::PathBuf;
use thiserror::Error;

/// Failure to open or load a project
#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("incompatible project: {0}")]
    Incompatible(String),
    #[error("several projects found, specify one of: {}", display_candidates(.0))]
    NotSpecified(Vec<PathBuf>),
    #[error("{}", not_found_message(.searched_directory))]
    NotFound { searched_directory: bool },
    #[error("failed to read project: {0}")]
    Io(#[from] std::io::Error),
}

fn not_found_message(searched_directory: &bool) -> &'static str {
    if *searched_directory {
        "no project found in directory"
    } else {
        "project not found"
    }
}

fn display_candidates(candidates: &[PathBuf]) -> String {
    candidates
        .iter()
        .map(|c| c.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
