// src/aggregate.rs
//! The three-bucket result of a walk and the policy for merging pages into it.

use crate::constants::DEFAULT_PROFILE;
use crate::model::PageTag;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Flattened page texts sorted by role.
///
/// `context` keeps first-insertion order of titles; a repeated title
/// overwrites the text in place. `prompt` keeps visit order. `profile` holds
/// whichever profile page was merged last, or the default profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregate {
    pub context: IndexMap<String, String>,
    pub profile: String,
    pub prompt: Vec<String>,
}

impl Aggregate {
    /// An empty aggregate whose profile starts as `profile`.
    pub fn with_profile(profile: impl Into<String>) -> Self {
        Self {
            context: IndexMap::new(),
            profile: profile.into(),
            prompt: Vec::new(),
        }
    }

    /// Number of context and prompt pages.
    pub fn page_count(&self) -> usize {
        self.context.len() + self.prompt.len()
    }
}

impl Default for Aggregate {
    fn default() -> Self {
        Self::with_profile(DEFAULT_PROFILE)
    }
}

/// Merges one visited page into the aggregate according to its tag.
pub fn merge_page(mut aggregate: Aggregate, tag: PageTag, title: &str, text: String) -> Aggregate {
    match tag {
        PageTag::Context => {
            aggregate.context.insert(title.to_string(), text);
        }
        PageTag::Prompt => aggregate.prompt.push(text),
        PageTag::Profile => aggregate.profile = text,
    }
    aggregate
}
