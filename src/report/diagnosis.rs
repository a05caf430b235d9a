use crate::analysis::{DefectKind, Findings};
use serde::Serialize;

/// The outcome of one detector, ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnosis {
    pub kind: DefectKind,
    pub conclusion: String,
    pub help: Option<String>,
    pub cases: Vec<String>,
}

impl Diagnosis {
    /// Package findings; `None` when there is nothing to report.
    ///
    /// Cases are sorted lexicographically unless the detector already put
    /// them in its own order.
    pub fn from_findings(kind: DefectKind, findings: Findings) -> Option<Self> {
        if findings.is_empty() {
            return None;
        }

        let Findings {
            mut cases,
            presorted,
            note,
        } = findings;
        if !presorted {
            cases.sort();
        }

        let mut conclusion = kind.conclusion(cases.len());
        if let Some(note) = note {
            conclusion = format!("{} ({})", conclusion, note);
        }

        Some(Self {
            kind,
            conclusion,
            help: kind.help().map(str::to_string),
            cases,
        })
    }
}
