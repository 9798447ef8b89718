// src/main.rs

use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion2context::output::{self, deliver, DeliveryTarget, OutputReport};
use notion2context::{
    measure_aggregate, render_aggregate, Aggregate, AggregateComposer, AggregateSource, AppError,
    CommandLineInput, Delivery, NotionHttpClient, NotionId, NotionRepository, PipelineConfig,
    RetryPolicy, TreeWalker,
};
use std::fs;
use std::sync::Arc;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}";

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("notion2context.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Console output goes to stderr so pipe mode keeps stdout clean.
    let console_appender = ConsoleAppender::builder()
        .target(log4rs::append::console::Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("console", Box::new(console_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("console")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Walks the tree, renders the aggregate and delivers it.
async fn execute_pipeline(config: &PipelineConfig) -> Result<(), AppError> {
    let pipeline = NotionToContext::new(config);

    let aggregate = pipeline.fetch(&config.notion_id).await?;
    let rendered = pipeline.compose(&aggregate)?;
    let report = pipeline.deliver(rendered)?;
    pipeline.report_completion(&aggregate, &report);

    Ok(())
}

struct NotionToContext<'a> {
    config: &'a PipelineConfig,
}

impl<'a> NotionToContext<'a> {
    fn new(config: &'a PipelineConfig) -> Self {
        Self { config }
    }

    fn plan_delivery(&self, rendered: String) -> output::OutputPlan {
        let mut plan = output::OutputPlan::new();

        if self.config.pipe {
            return plan.with_operation(DeliveryTarget::PrintToStdout { content: rendered });
        }

        if let Some(path) = &self.config.output_file {
            plan = plan.with_operation(DeliveryTarget::WriteFile {
                path: path.clone(),
                content: rendered.clone(),
            });
        }

        if self.config.clipboard {
            plan = plan.with_operation(DeliveryTarget::CopyToClipboard {
                content: rendered.clone(),
            });
        }

        if plan.is_empty() {
            plan = plan.with_operation(DeliveryTarget::PrintToStdout { content: rendered });
        }

        plan
    }

    fn report_completion(&self, aggregate: &Aggregate, report: &OutputReport) {
        if self.config.pipe {
            return;
        }

        let summary = measure_aggregate(aggregate);
        log::debug!("Aggregate summary: {:?}", summary);

        eprintln!(
            "📄 Collected {} context page(s) and {} prompt(s), about {} tokens.",
            summary.context_pages, summary.prompt_pages, summary.estimated_tokens
        );
        if summary.prompt_pages == 0 {
            eprintln!("⚠️  No prompt pages found; nothing to run yet.");
        }

        for completed in &report.completed {
            match &completed.operation {
                DeliveryTarget::WriteFile { path, .. } => {
                    eprintln!("✓ Saved to {}", path.display());
                }
                DeliveryTarget::CopyToClipboard { .. } => {
                    eprintln!("✓ Copied to clipboard");
                }
                DeliveryTarget::PrintToStdout { .. } => {}
            }
        }
    }
}

#[async_trait::async_trait]
impl AggregateSource for NotionToContext<'_> {
    async fn fetch(&self, root: &NotionId) -> Result<Aggregate, AppError> {
        log::info!("Walking page tree from {}", root);

        let client = NotionHttpClient::new(&self.config.api_key)?
            .with_retry_policy(RetryPolicy::with_attempts(self.config.request_attempts));
        let repository: Arc<dyn NotionRepository> = Arc::new(client);

        TreeWalker::new(repository, self.config.walk.clone())
            .fetch_aggregate(root)
            .await
    }
}

impl AggregateComposer for NotionToContext<'_> {
    fn compose(&self, aggregate: &Aggregate) -> Result<String, AppError> {
        render_aggregate(aggregate, self.config.format, self.config.max_tokens)
    }
}

impl Delivery for NotionToContext<'_> {
    fn deliver(&self, rendered: String) -> Result<OutputReport, AppError> {
        let report = deliver(self.plan_delivery(rendered));

        if !report.is_success() {
            return Err(AppError::DeliveryFailed {
                failures: report.failure_messages(),
            });
        }

        Ok(report)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = PipelineConfig::resolve(cli)?;

    execute_pipeline(&config).await?;

    Ok(())
}
