//! Defect detection
//!
//! Every defect kind has one detector. Detectors borrow the project model
//! read-only and are independent of each other, so they can run in any order,
//! alone, or concurrently.

pub mod assets;
pub mod detectors;
mod examiner;
pub mod fonts;
pub mod resources;
pub mod source_scan;

pub use examiner::Examiner;

use serde::{Serialize, Serializer};
use std::str::FromStr;

/// Kinds of structural defect
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DefectKind {
    NonExistentFiles,
    NonExistentPaths,
    EmptyGroups,
    EmptyTargets,
    DanglingFiles,
    CorruptPropertyLists,
    EmptyAssets,
    UnusedResources,
}

impl DefectKind {
    pub const ALL: [DefectKind; 8] = [
        DefectKind::NonExistentFiles,
        DefectKind::NonExistentPaths,
        DefectKind::EmptyGroups,
        DefectKind::EmptyTargets,
        DefectKind::DanglingFiles,
        DefectKind::CorruptPropertyLists,
        DefectKind::EmptyAssets,
        DefectKind::UnusedResources,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DefectKind::NonExistentFiles => "nonexistent-files",
            DefectKind::NonExistentPaths => "nonexistent-paths",
            DefectKind::EmptyGroups => "empty-groups",
            DefectKind::EmptyTargets => "empty-targets",
            DefectKind::DanglingFiles => "dangling-files",
            DefectKind::CorruptPropertyLists => "corrupt-plists",
            DefectKind::EmptyAssets => "empty-assets",
            DefectKind::UnusedResources => "unused-resources",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            DefectKind::NonExistentFiles => "PX001",
            DefectKind::NonExistentPaths => "PX002",
            DefectKind::EmptyGroups => "PX003",
            DefectKind::EmptyTargets => "PX004",
            DefectKind::DanglingFiles => "PX005",
            DefectKind::CorruptPropertyLists => "PX006",
            DefectKind::EmptyAssets => "PX007",
            DefectKind::UnusedResources => "PX008",
        }
    }

    /// (singular, plural) noun for conclusions
    fn noun(&self) -> (&'static str, &'static str) {
        match self {
            DefectKind::NonExistentFiles => ("non-existent file", "non-existent files"),
            DefectKind::NonExistentPaths => ("non-existent group path", "non-existent group paths"),
            DefectKind::EmptyGroups => ("empty group", "empty groups"),
            DefectKind::EmptyTargets => ("empty target", "empty targets"),
            DefectKind::DanglingFiles => ("dangling file", "dangling files"),
            DefectKind::CorruptPropertyLists => ("corrupt property list", "corrupt property lists"),
            DefectKind::EmptyAssets => ("empty asset", "empty assets"),
            DefectKind::UnusedResources => ("potentially unused resource", "potentially unused resources"),
        }
    }

    /// Conclusion line for `count` cases
    pub fn conclusion(&self, count: usize) -> String {
        let (singular, plural) = self.noun();
        format!("Found {} {}", count, if count == 1 { singular } else { plural })
    }

    pub fn help(&self) -> Option<&'static str> {
        let text = match self {
            DefectKind::NonExistentFiles => {
                "These files are referenced by the project but missing on disk. Remove the references or restore the files."
            }
            DefectKind::NonExistentPaths => {
                "These groups point to directories that do not exist. Fix the group location in the file inspector."
            }
            DefectKind::EmptyGroups => "These groups have no children and can be deleted.",
            DefectKind::EmptyTargets => "These targets do not compile any source file.",
            DefectKind::DanglingFiles => {
                "These source files are not a member of any target. Add them to a target or remove them from the project."
            }
            DefectKind::CorruptPropertyLists => "These property lists cannot be parsed.",
            DefectKind::EmptyAssets => {
                "These asset catalog entries contain no content besides their Contents.json."
            }
            DefectKind::UnusedResources => {
                "Usage is inferred by searching source files for resource names. Names built at runtime are not detected, \
                 so review every entry before deleting it."
            }
        };
        Some(text)
    }
}

impl std::fmt::Display for DefectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for DefectKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl FromStr for DefectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DefectKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s.trim())
            .ok_or_else(|| {
                let known: Vec<_> = DefectKind::ALL.iter().map(|k| k.as_str()).collect();
                format!("unknown defect kind '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

/// Raw output of one detector
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Findings {
    pub cases: Vec<String>,
    /// Cases are already in the detector's own order and must not be re-sorted
    pub presorted: bool,
    /// Extra detail appended to the conclusion
    pub note: Option<String>,
}

impl Findings {
    pub fn new(cases: Vec<String>) -> Self {
        Self {
            cases,
            presorted: false,
            note: None,
        }
    }

    pub fn presorted(mut self) -> Self {
        self.presorted = true;
        self
    }

    pub fn with_note(mut self, note: String) -> Self {
        self.note = Some(note);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

/// Observer for per-item progress of slow detectors.
///
/// Called on the detector's own thread, once per item and once more with
/// `processed == total` when done. Purely advisory.
pub trait Progress {
    fn start(&self, _kind: DefectKind) {}

    fn tick(&self, processed: usize, total: usize, label: Option<&str>);

    fn finish(&self, _kind: DefectKind) {}
}

/// Progress observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn tick(&self, _processed: usize, _total: usize, _label: Option<&str>) {}
}

impl<F> Progress for F
where
    F: Fn(usize, usize, Option<&str>),
{
    fn tick(&self, processed: usize, total: usize, label: Option<&str>) {
        self(processed, total, label)
    }
}
