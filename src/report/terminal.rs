use super::Diagnosis;
use colored::Colorize;
use miette::Result;

/// Terminal reporter with colored output
pub struct TerminalReporter;

impl TerminalReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn report(&self, diagnoses: &[Diagnosis]) -> Result<()> {
        if diagnoses.is_empty() {
            println!("{}", "No defects found!".green().bold());
            return Ok(());
        }

        println!();
        for diagnosis in diagnoses {
            self.print_diagnosis(diagnosis);
            println!();
        }

        let total: usize = diagnoses.iter().map(|d| d.cases.len()).sum();
        println!("{}", "─".repeat(60).dimmed());
        println!(
            "Summary: {}",
            format!("{} issues in {} categories", total, diagnoses.len()).yellow()
        );

        Ok(())
    }

    fn print_diagnosis(&self, diagnosis: &Diagnosis) {
        println!(
            "{} {}",
            format!("[{}]", diagnosis.kind.code()).dimmed(),
            diagnosis.conclusion.yellow().bold()
        );
        if let Some(help) = &diagnosis.help {
            println!("  {}", help.dimmed());
        }
        for case in &diagnosis.cases {
            println!("  {} {}", "→".dimmed(), case);
        }
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}
