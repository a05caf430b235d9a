use super::Diagnosis;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;

/// JSON reporter for programmatic output
pub struct JsonReporter {
    output_path: Option<PathBuf>,
}

impl JsonReporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    pub fn report(&self, diagnoses: &[Diagnosis]) -> Result<()> {
        let json = Self::render(diagnoses)?;

        if let Some(path) = &self.output_path {
            std::fs::write(path, &json).into_diagnostic()?;
            println!("Report written to: {}", path.display());
        } else {
            println!("{}", json);
        }

        Ok(())
    }

    pub fn render(diagnoses: &[Diagnosis]) -> Result<String> {
        let report = JsonReport {
            version: "1.0",
            total_cases: diagnoses.iter().map(|d| d.cases.len()).sum(),
            diagnoses: diagnoses.iter().map(JsonDiagnosis::from).collect(),
        };
        serde_json::to_string_pretty(&report).into_diagnostic()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    version: &'static str,
    total_cases: usize,
    diagnoses: Vec<JsonDiagnosis<'a>>,
}

#[derive(Serialize)]
struct JsonDiagnosis<'a> {
    code: &'static str,
    #[serde(flatten)]
    diagnosis: &'a Diagnosis,
}

impl<'a> From<&'a Diagnosis> for JsonDiagnosis<'a> {
    fn from(diagnosis: &'a Diagnosis) -> Self {
        Self {
            code: diagnosis.kind.code(),
            diagnosis,
        }
    }
}
