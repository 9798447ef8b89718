// src/formatting/document.rs
//! Lays out a whole aggregate for delivery.

use crate::aggregate::Aggregate;
use crate::config::OutputFormat;
use crate::conversation::{AggregateConsumer, ConversationSeed, SeedBuilder};
use crate::error::AppError;

/// Renders `aggregate` in `format`.
///
/// The `messages` format refuses seeds over `max_tokens`; the other formats
/// only log a warning.
pub fn render_aggregate(
    aggregate: &Aggregate,
    format: OutputFormat,
    max_tokens: usize,
) -> Result<String, AppError> {
    match format {
        OutputFormat::Messages => {
            let seed = SeedBuilder { max_tokens }.consume(aggregate)?;
            Ok(serde_json::to_string_pretty(&seed.messages)?)
        }
        OutputFormat::Json => {
            warn_over_budget(aggregate, max_tokens);
            Ok(serde_json::to_string_pretty(aggregate)?)
        }
        OutputFormat::Markdown => {
            warn_over_budget(aggregate, max_tokens);
            Ok(compose_aggregate_markdown(aggregate))
        }
    }
}

fn warn_over_budget(aggregate: &Aggregate, max_tokens: usize) {
    if let Err(e) = ConversationSeed::from_aggregate(aggregate).check_budget(max_tokens) {
        log::warn!("{}", e);
    }
}

/// Renders the profile, each context page and each prompt under its own
/// top-level heading, in that order.
pub fn compose_aggregate_markdown(aggregate: &Aggregate) -> String {
    let mut sections = vec![format!("# Profile\n\n{}", aggregate.profile)];

    sections.extend(
        aggregate
            .context
            .iter()
            .map(|(title, text)| format!("# Context: {}\n\n{}", title, text)),
    );

    sections.extend(
        aggregate
            .prompt
            .iter()
            .enumerate()
            .map(|(i, text)| format!("# Prompt {}\n\n{}", i + 1, text)),
    );

    let mut output = sections.join("\n\n");
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::merge_page;
    use crate::model::PageTag;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sections_in_bucket_order() {
        let agg = Aggregate::with_profile("Be brief.");
        let agg = merge_page(agg, PageTag::Prompt, "p", "Summarize.".into());
        let agg = merge_page(agg, PageTag::Context, "Root Page", "Notes".into());

        assert_eq!(
            compose_aggregate_markdown(&agg),
            "# Profile\n\nBe brief.\n\n# Context: Root Page\n\nNotes\n\n# Prompt 1\n\nSummarize.\n"
        );
    }

    #[test]
    fn test_json_format_keeps_buckets() {
        let agg = merge_page(Aggregate::default(), PageTag::Context, "A", "text".into());
        let rendered = render_aggregate(&agg, OutputFormat::Json, 1_000).unwrap();
        let back: Aggregate = serde_json::from_str(&rendered).unwrap();
        assert_eq!(back, agg);
    }

    #[test]
    fn test_messages_format_enforces_budget() {
        let agg = merge_page(Aggregate::default(), PageTag::Prompt, "p", "x".repeat(400));
        assert!(matches!(
            render_aggregate(&agg, OutputFormat::Messages, 10),
            Err(AppError::TokenBudgetExceeded { .. })
        ));

        let rendered = render_aggregate(&agg, OutputFormat::Messages, 10_000).unwrap();
        let messages: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[1]["role"], "user");
    }

    #[test]
    fn test_markdown_ignores_budget() {
        let agg = Aggregate::with_profile("x".repeat(400));
        assert!(render_aggregate(&agg, OutputFormat::Markdown, 1).is_ok());
    }
}
