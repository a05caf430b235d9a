mod diagnosis;
mod json;
mod terminal;

pub use diagnosis::Diagnosis;
pub use json::JsonReporter;
pub use terminal::TerminalReporter;

use miette::Result;
use std::path::PathBuf;
use std::str::FromStr;

/// Output format for reports
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Terminal,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "terminal" => Ok(ReportFormat::Terminal),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("unknown report format '{}'", other)),
        }
    }
}

/// Reporter for outputting diagnoses
pub struct Reporter {
    format: ReportFormat,
    output_path: Option<PathBuf>,
}

impl Reporter {
    pub fn new(format: ReportFormat, output_path: Option<PathBuf>) -> Self {
        Self { format, output_path }
    }

    pub fn report(&self, diagnoses: &[Diagnosis]) -> Result<()> {
        match &self.format {
            ReportFormat::Terminal => TerminalReporter::new().report(diagnoses),
            ReportFormat::Json => JsonReporter::new(self.output_path.clone()).report(diagnoses),
        }
    }
}
