// src/conversation.rs
//! Reading an aggregate as the opening of a chat conversation.
//!
//! The chat client itself lives elsewhere; this module fixes how the three
//! buckets become messages.

use crate::aggregate::Aggregate;
use crate::constants::CHARS_PER_TOKEN;
use crate::error::AppError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Anything that turns a finished aggregate into something usable.
pub trait AggregateConsumer {
    type Output;

    fn consume(&self, aggregate: &Aggregate) -> Result<Self::Output, AppError>;
}

/// The messages a conversation starts with.
///
/// The profile becomes the system message, each context page a user
/// message headed by its title, and each prompt a numbered user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationSeed {
    pub messages: Vec<ChatMessage>,
    prompt_count: usize,
}

impl ConversationSeed {
    pub fn from_aggregate(aggregate: &Aggregate) -> Self {
        let mut messages = Vec::with_capacity(1 + aggregate.page_count());
        messages.push(ChatMessage::new(ChatRole::System, aggregate.profile.as_str()));

        messages.extend(
            aggregate
                .context
                .iter()
                .map(|(title, text)| ChatMessage::new(ChatRole::User, format!("{} \n{}", title, text))),
        );

        messages.extend(aggregate.prompt.iter().enumerate().map(|(i, text)| {
            ChatMessage::new(ChatRole::User, format!("Prompt {} \n{}", i + 1, text))
        }));

        Self {
            messages,
            prompt_count: aggregate.prompt.len(),
        }
    }

    /// Whether the tree held at least one prompt page to run.
    pub fn has_runnable_prompt(&self) -> bool {
        self.prompt_count > 0
    }

    /// Token estimate for the user-facing messages, joined by single
    /// spaces. The system message is not counted.
    pub fn estimated_tokens(&self) -> usize {
        let counted: Vec<&str> = self
            .messages
            .iter()
            .filter(|message| message.role != ChatRole::System)
            .map(|message| message.content.as_str())
            .collect();
        estimate_tokens(counted.join(" ").chars().count())
    }

    pub fn check_budget(&self, max_tokens: usize) -> Result<(), AppError> {
        let estimated = self.estimated_tokens();
        if estimated > max_tokens {
            return Err(AppError::TokenBudgetExceeded {
                estimated,
                max: max_tokens,
            });
        }
        Ok(())
    }
}

/// Rough token count for `chars` characters of text.
pub fn estimate_tokens(chars: usize) -> usize {
    chars.div_ceil(CHARS_PER_TOKEN)
}

/// Seeds a conversation, refusing ones over the token budget.
pub struct SeedBuilder {
    pub max_tokens: usize,
}

impl AggregateConsumer for SeedBuilder {
    type Output = ConversationSeed;

    fn consume(&self, aggregate: &Aggregate) -> Result<ConversationSeed, AppError> {
        let seed = ConversationSeed::from_aggregate(aggregate);
        seed.check_budget(self.max_tokens)?;
        Ok(seed)
    }
}
