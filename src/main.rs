// src/main.rs

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;
use std::process::ExitCode;

use notion_tree::constants::LOG_FILE_NAME;
use notion_tree::output::plural;
use notion_tree::{
    render_tree, summarize, AppError, CommandLineInput, DeliveryTarget, NotionHttpClient,
    OutputPlan, OutputReport, ProgressReporter, QuietReporter, RenderStyle, SpinnerReporter,
    TraversalOutcome, TreeBuilder, TreeConfig, TreeDelivery, TreeRenderer, TreeSource,
};

/// Exit status after a user interrupt (128 + SIGINT).
const INTERRUPTED_EXIT_CODE: u8 = 130;

/// Sets up logging: console on stderr, everything at debug level in a file.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join(LOG_FILE_NAME);
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)
        .with_context(|| format!("opening log file {}", log_file_path.display()))?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(log_level)))
                .build("stderr", Box::new(stderr_appender)),
        )
        .appender(Appender::builder().build("file", Box::new(file_appender)))
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(LevelFilter::Debug),
        )
        .context("building logging configuration")?;

    log4rs::init_config(config).context("installing logger")?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Runs the three stages: collect, render, deliver.
async fn execute_pipeline(config: &TreeConfig) -> Result<(), AppError> {
    let client = NotionHttpClient::new(&config.api_key)?;
    let builder = TreeBuilder::new(&client, config.traversal_options());

    let mut reporter: Box<dyn ProgressReporter> = if config.quiet {
        Box::new(QuietReporter)
    } else {
        Box::new(SpinnerReporter::new())
    };
    let outcome = builder.collect(reporter.as_mut()).await?;
    drop(reporter);

    let pipeline = NotionToTree::new(config);
    let rendered = pipeline.render(&outcome.roots)?;
    let report = pipeline.deliver(rendered)?;
    pipeline.report_completion(&outcome, &report);

    Ok(())
}

/// Renders and delivers the assembled tree according to the configuration.
struct NotionToTree<'a> {
    config: &'a TreeConfig,
    style: RenderStyle,
}

impl<'a> NotionToTree<'a> {
    fn new(config: &'a TreeConfig) -> Self {
        Self {
            config,
            style: RenderStyle::new(config.color),
        }
    }

    /// Prints run statistics to stderr.
    fn report_completion(&self, outcome: &TraversalOutcome, report: &OutputReport) {
        if self.config.quiet || self.config.writes_document_to_stdout() {
            return;
        }

        let summary = summarize(&outcome.roots);
        eprintln!(
            "Found {} ({}, {}), deepest level {}.",
            plural(summary.total_nodes, "item", "items"),
            plural(summary.pages, "page", "pages"),
            plural(summary.databases, "database", "databases"),
            summary.deepest_level
        );

        if !outcome.warnings.is_empty() {
            eprintln!(
                "{} could not be listed completely:",
                plural(outcome.warnings.len(), "branch", "branches")
            );
            for warning in &outcome.warnings {
                eprintln!("  - {}", warning);
            }
        }

        if outcome.depth_limit_reached {
            if let Some(depth) = self.config.max_depth {
                eprintln!(
                    "Maximum depth ({}) reached; deeper content was not fetched.",
                    depth
                );
            }
        }

        for completed in &report.completed {
            if let DeliveryTarget::WriteFile { path, .. } = &completed.target {
                eprintln!("Tree saved to {}", path.display());
            }
        }
    }
}

impl TreeRenderer for NotionToTree<'_> {
    fn render(&self, roots: &[notion_tree::TreeNode]) -> Result<String, AppError> {
        render_tree(self.config.format, roots, &self.style)
    }
}

impl TreeDelivery for NotionToTree<'_> {
    fn deliver(&self, rendered: String) -> Result<OutputReport, AppError> {
        let plan = OutputPlan::for_destination(self.config.output_file.clone(), rendered);
        notion_tree::deliver(plan)
    }
}

fn report_error(error: &AppError) {
    log::debug!("Fatal error: {:?}", error);
    if error.is_unauthorized() {
        eprintln!(
            "Error: Notion rejected the integration token. Check NOTION_API_KEY and that \
             the integration has been shared with your pages."
        );
    } else {
        eprintln!("Error: {}", error);
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = CommandLineInput::parse();

    if let Err(e) = setup_logging(cli.verbose) {
        eprintln!("Warning: logging unavailable: {:#}", e);
    }

    let config = match TreeConfig::resolve(cli) {
        Ok(config) => config,
        Err(e) => {
            report_error(&e);
            return ExitCode::FAILURE;
        }
    };

    tokio::select! {
        result = execute_pipeline(&config) => match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                report_error(&e);
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\nInterrupted; stopping without further requests.");
            ExitCode::from(INTERRUPTED_EXIT_CODE)
        }
    }
}
