// src/config.rs
use crate::constants::{DEFAULT_MAX_TOKENS, DEFAULT_PROFILE, DEFAULT_TAG_PROPERTY, NOTION_REQUEST_ATTEMPTS};
use crate::error::AppError;
use crate::types::{ApiKey, NotionId, ValidationError};
use crate::walker::{MentionPolicy, WalkOptions};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

const MAX_REQUEST_ATTEMPTS: u32 = 10;

/// How the aggregate is rendered for delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One Markdown document with a section per bucket
    #[default]
    Markdown,
    /// The aggregate's three buckets as JSON
    Json,
    /// The conversation-opening chat messages as JSON
    Messages,
}

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Root Notion page URL or ID (e.g., "https://www.notion.so/...")
    pub notion_input: String,

    /// Output file for the rendered aggregate (optional)
    #[arg(short, long)]
    pub output_file: Option<String>,

    /// Copy the rendered aggregate to the clipboard
    #[arg(short = 'b', long, default_value_t = false)]
    pub clipboard: bool,

    /// Pipe mode - print the rendered aggregate to stdout only
    #[arg(short = 'p', long, default_value_t = false)]
    pub pipe: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Page property whose value (context, prompt, profile) classifies a page
    #[arg(long, default_value = DEFAULT_TAG_PROPERTY)]
    pub tag_property: String,

    /// Profile text used when no profile page is found
    #[arg(long)]
    pub default_profile: Option<String>,

    /// Which mention targets are followed
    #[arg(long, value_enum, default_value_t = MentionPolicy::NotionPages)]
    pub mentions: MentionPolicy,

    /// Attempts per Notion request before a transient failure is fatal (1-10)
    #[arg(long, default_value_t = NOTION_REQUEST_ATTEMPTS)]
    pub retries: u32,

    /// Token budget for the conversation seed
    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: usize,
}

/// Resolved, validated configuration for one run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub notion_id: NotionId,
    pub api_key: ApiKey,
    pub output_file: Option<PathBuf>,
    pub clipboard: bool,
    pub pipe: bool,
    pub verbose: bool,
    pub format: OutputFormat,
    pub walk: WalkOptions,
    pub request_attempts: u32,
    pub max_tokens: usize,
}

impl PipelineConfig {
    /// Resolves a complete configuration from CLI input and the
    /// `NOTION_API_KEY` environment variable.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        Self::resolve_with_api_key(cli, std::env::var("NOTION_API_KEY").ok())
    }

    pub fn resolve_with_api_key(
        cli: CommandLineInput,
        api_key: Option<String>,
    ) -> Result<Self, AppError> {
        let api_key_str = api_key.ok_or_else(|| {
            AppError::MissingConfiguration(
                "NOTION_API_KEY environment variable not set".to_string(),
            )
        })?;

        let api_key = ApiKey::new(api_key_str)?;
        let notion_id = NotionId::parse(&cli.notion_input)?;

        let tag_property = cli.tag_property.trim();
        if tag_property.is_empty() {
            return Err(ValidationError::EmptyField("tag property").into());
        }

        if !(1..=MAX_REQUEST_ATTEMPTS).contains(&cli.retries) {
            return Err(ValidationError::OutOfBounds {
                value: cli.retries as u64,
                min: 1,
                max: MAX_REQUEST_ATTEMPTS as u64,
            }
            .into());
        }

        if cli.max_tokens == 0 {
            return Err(ValidationError::OutOfBounds {
                value: 0,
                min: 1,
                max: u64::MAX,
            }
            .into());
        }

        let walk = WalkOptions {
            tag_property: tag_property.to_string(),
            default_profile: cli
                .default_profile
                .unwrap_or_else(|| DEFAULT_PROFILE.to_string()),
            mention_policy: cli.mentions,
        };

        Ok(PipelineConfig {
            notion_id,
            api_key,
            output_file: cli.output_file.map(PathBuf::from),
            clipboard: cli.clipboard,
            pipe: cli.pipe,
            verbose: cli.verbose,
            format: cli.format,
            walk,
            request_attempts: cli.retries,
            max_tokens: cli.max_tokens,
        })
    }
}
