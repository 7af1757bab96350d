//! Run orchestration: discovery, analysis, aggregation, rendering, output.

use std::fs;
use std::path::{Path, PathBuf};

use colored::*;
use thiserror::Error;
use tracing::info;

use crate::analysis::{AnalysisContext, AnalysisError};
use crate::config::ScanConfig;
use crate::discover::{self, DiscoveryError};
use crate::report;
use crate::summary::{ProjectAnalysis, ProjectSummary};

/// Errors that end a run.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("no code files discovered in {}", root.display())]
    NoFilesDiscovered { root: PathBuf },
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    #[error("analyzer failure on {path}: {source}")]
    Analysis { path: String, source: AnalysisError },
    #[error("failed to serialize analysis: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Prints labelled progress lines to stdout.
pub struct Narrator {
    label: String,
    quiet: bool,
}

impl Narrator {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            quiet: false,
        }
    }

    /// A narrator that prints nothing.
    pub fn quiet() -> Self {
        Self {
            label: String::new(),
            quiet: true,
        }
    }

    pub fn say(&self, message: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        println!("{} {}", format!("{}:", self.label).cyan().bold(), message.as_ref());
    }
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub summary: ProjectSummary,
    pub generated_files: Vec<PathBuf>,
}

/// Executes one analysis run for a configuration.
pub struct Runner {
    config: ScanConfig,
    context: AnalysisContext,
    narrator: Narrator,
}

impl Runner {
    /// Create a runner that narrates with the configured label.
    pub fn new(config: ScanConfig) -> Self {
        let narrator = Narrator::new(config.label.clone());
        Self {
            config,
            context: AnalysisContext::new(),
            narrator,
        }
    }

    /// Replace the narrator (e.g. with [`Narrator::quiet`]).
    pub fn narrator(mut self, narrator: Narrator) -> Self {
        self.narrator = narrator;
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Discover and analyze files without writing anything.
    pub fn analyze(&self) -> Result<ProjectAnalysis, RunError> {
        let config = &self.config;
        let root_display = config
            .root
            .canonicalize()
            .unwrap_or_else(|_| config.root.clone());

        self.narrator.say("Initializing code analysis...");
        self.narrator
            .say(format!("Target directory: {}", root_display.display()));

        self.narrator.say("Starting file discovery...");
        let files = discover::discover_files(&config.root, &config.extensions, config.recursive)?;
        self.narrator
            .say(format!("Discovered {} code files", files.len()));

        if files.is_empty() {
            self.narrator.say(format!("{}", "No code files found!".red()));
            return Err(RunError::NoFilesDiscovered {
                root: config.root.clone(),
            });
        }

        let mut outcomes = Vec::with_capacity(files.len());
        for path in &files {
            self.narrator.say(format!("Analyzing: {}", display_name(path)));
            let outcome = self
                .context
                .analyze_file(path)
                .map_err(|source| RunError::Analysis {
                    path: path.to_string_lossy().to_string(),
                    source,
                })?;
            outcomes.push(outcome);
        }

        Ok(ProjectAnalysis::new(outcomes))
    }

    /// Run the full pipeline and write the report and JSON dump.
    pub fn run(&self) -> Result<RunReport, RunError> {
        let analysis = self.analyze()?;

        let markdown = report::render_markdown(&analysis);
        let json = report::render_json(&analysis)?;

        let report_path = self.config.report_path();
        let json_path = self.config.json_path();
        write_artifact(&report_path, &markdown)?;
        write_artifact(&json_path, &json)?;

        info!(
            analyzed = analysis.summary.total_files_analyzed,
            failed = analysis.summary.total_files_failed,
            "analysis complete"
        );
        self.narrator
            .say(format!("{}", "Analysis completed successfully!".green()));
        self.narrator.say(format!(
            "Generated files: {}, {}",
            report_path.display(),
            json_path.display()
        ));

        Ok(RunReport {
            summary: analysis.summary,
            generated_files: vec![report_path, json_path],
        })
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn write_artifact(path: &Path, content: &str) -> Result<(), RunError> {
    fs::write(path, content).map_err(|source| RunError::Write {
        path: path.to_path_buf(),
        source,
    })
}
