// src/analytics/mod.rs
//! Size measurements of a finished aggregate.

use crate::aggregate::Aggregate;
use crate::conversation::estimate_tokens;

/// Counts shown in the completion report and verbose logs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateSummary {
    pub context_pages: usize,
    pub prompt_pages: usize,
    pub profile_chars: usize,
    /// Characters across profile, context texts and prompts.
    pub total_chars: usize,
    pub estimated_tokens: usize,
}

pub fn measure_aggregate(aggregate: &Aggregate) -> AggregateSummary {
    let profile_chars = aggregate.profile.chars().count();
    let context_chars: usize = aggregate.context.values().map(|t| t.chars().count()).sum();
    let prompt_chars: usize = aggregate.prompt.iter().map(|t| t.chars().count()).sum();
    let total_chars = profile_chars + context_chars + prompt_chars;

    AggregateSummary {
        context_pages: aggregate.context.len(),
        prompt_pages: aggregate.prompt.len(),
        profile_chars,
        total_chars,
        estimated_tokens: estimate_tokens(total_chars),
    }
}
