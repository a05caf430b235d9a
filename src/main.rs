use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use miette::{IntoDiagnostic, Result, WrapErr};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;
use tracing::{debug, info};

use pbxlint::{Config, DefectKind, Examiner, Progress, Project, ProjectFinder, ReportFormat, Reporter};

/// pbxlint - Find structural defects in Xcode projects
#[derive(Parser, Debug)]
#[command(name = "pbxlint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Project bundle (.xcodeproj) or a directory containing exactly one
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Count resource names that only appear inside comments as used
    #[arg(long)]
    keep_comments: bool,

    /// Defect kinds to check, comma-separated (default: all)
    #[arg(long, value_delimiter = ',', value_parser = DefectKind::from_str)]
    only: Vec<DefectKind>,

    /// Defect kinds to skip, comma-separated
    #[arg(long, value_delimiter = ',', value_parser = DefectKind::from_str)]
    skip: Vec<DefectKind>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Output file (for json format)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Run detectors in parallel
    #[arg(long)]
    parallel: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum OutputFormat {
    Terminal,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => ReportFormat::Terminal,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

/// Progress bar per detector, driven by detector ticks
struct BarProgress {
    bar: RefCell<Option<ProgressBar>>,
}

impl BarProgress {
    fn new() -> Self {
        Self {
            bar: RefCell::new(None),
        }
    }
}

impl Progress for BarProgress {
    fn start(&self, kind: DefectKind) {
        let bar = ProgressBar::new(0);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix} [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}")
        {
            bar.set_style(style.progress_chars("#>-"));
        }
        bar.set_prefix(kind.to_string());
        *self.bar.borrow_mut() = Some(bar);
    }

    fn tick(&self, processed: usize, total: usize, label: Option<&str>) {
        if let Some(bar) = self.bar.borrow().as_ref() {
            bar.set_length(total as u64);
            bar.set_position(processed as u64);
            bar.set_message(label.unwrap_or_default().to_string());
        }
    }

    fn finish(&self, _kind: DefectKind) {
        if let Some(bar) = self.bar.borrow_mut().take() {
            bar.finish_and_clear();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.quiet);

    info!("pbxlint v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;
    let found_defects = run_analysis(&config, &cli)?;

    if found_defects {
        std::process::exit(1);
    }
    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Reports own stdout
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Directory searched for a configuration file
fn config_directory(path: &Path) -> PathBuf {
    if path.extension().map(|e| e == pbxlint::discovery::BUNDLE_EXTENSION).unwrap_or(false) {
        path.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."))
    } else {
        path.to_path_buf()
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        Config::from_default_locations(&config_directory(&cli.path))?
    };

    // Override with CLI arguments
    if cli.keep_comments {
        config.resources.strip_comments = false;
    }
    if !cli.only.is_empty() {
        config.detection.only(&cli.only);
    }
    for &kind in &cli.skip {
        config.detection.set(kind, false);
    }
    if let Some(format) = &cli.format {
        config.report.format = match format {
            OutputFormat::Terminal => "terminal".to_string(),
            OutputFormat::Json => "json".to_string(),
        };
    }

    debug!("Configuration: {:?}", config);
    Ok(config)
}

/// Returns whether any defect was found
fn run_analysis(config: &Config, cli: &Cli) -> Result<bool> {
    let start_time = Instant::now();

    let bundle = ProjectFinder::new().locate(&cli.path).into_diagnostic()?;
    info!("Opening {}", bundle.display());

    let project = Project::open(&bundle)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to load {}", bundle.display()))?;
    info!(
        "Loaded {} files, {} groups and {} targets",
        project.files().len(),
        project.groups().len(),
        project.products().len()
    );

    let examiner = Examiner::from_config(config);
    let diagnoses = if cli.parallel {
        examiner.examine_parallel(&project)
    } else if cli.verbose && !cli.quiet {
        examiner.examine(&project, &BarProgress::new())
    } else {
        examiner.examine(&project, &pbxlint::NoProgress)
    };

    let format = match &cli.format {
        Some(format) => format.clone().into(),
        None => ReportFormat::from_str(&config.report.format)
            .map_err(|e| miette::miette!("{}", e))?,
    };
    Reporter::new(format.clone(), cli.output.clone()).report(&diagnoses)?;

    if !cli.quiet && format == ReportFormat::Terminal {
        println!(
            "{}",
            format!(
                "Checked {} defect kinds in {:.2}s",
                examiner.kinds().len(),
                start_time.elapsed().as_secs_f64()
            )
            .dimmed()
        );
    }

    Ok(!diagnoses.is_empty())
}
