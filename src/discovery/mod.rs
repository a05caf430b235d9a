mod project_finder;

pub use project_finder::{ProjectFinder, BUNDLE_EXTENSION};
