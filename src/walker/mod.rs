// src/walker/mod.rs
//! Depth-first walk over a Notion page tree.
//!
//! Starting from a root page, the walker flattens every block into text,
//! follows child pages and mentions as new page roots, and merges each
//! visited page into an [`Aggregate`] according to its [`PageTag`].
//!
//! The walk is sequential. Every page root is visited at most once; the
//! visited set is updated before a page's children are fetched, so a
//! back-edge to an ancestor is a no-op. A failure to list children ends
//! the whole walk; metadata and table-row failures are logged and
//! recovered from.

mod mentions;

pub use mentions::{mention_target, MentionPolicy};

use crate::aggregate::{merge_page, Aggregate};
use crate::api::NotionRepository;
use crate::constants::{
    CHILD_PAGE_TITLE_PREFIX, DEFAULT_PROFILE, DEFAULT_TAG_PROPERTY, DIVIDER_MARKER,
    MENTIONED_PAGE_TITLE_PREFIX, ROOT_PAGE_TITLE,
};
use crate::error::AppError;
use crate::formatting::{format_table_rows, render_block, ListCounters};
use crate::model::{Block, PageTag, TableBlock};
use crate::types::{NotionId, RichTextItem};
use futures::future::BoxFuture;
use std::collections::HashSet;
use std::sync::Arc;

/// Knobs for a walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkOptions {
    /// Page property whose value selects the aggregate bucket.
    pub tag_property: String,
    /// Profile text used until a profile page is merged.
    pub default_profile: String,
    pub mention_policy: MentionPolicy,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            tag_property: DEFAULT_TAG_PROPERTY.to_string(),
            default_profile: DEFAULT_PROFILE.to_string(),
            mention_policy: MentionPolicy::default(),
        }
    }
}

/// Page roots already visited during one walk.
#[derive(Debug, Default)]
pub struct TraversalState {
    visited: HashSet<NotionId>,
}

impl TraversalState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `id` as visited. Returns `false` when it already was.
    pub fn mark_visited(&mut self, id: NotionId) -> bool {
        self.visited.insert(id)
    }

    pub fn is_visited(&self, id: &NotionId) -> bool {
        self.visited.contains(id)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}

pub struct TreeWalker {
    repository: Arc<dyn NotionRepository>,
    options: WalkOptions,
}

impl TreeWalker {
    pub fn new(repository: Arc<dyn NotionRepository>, options: WalkOptions) -> Self {
        Self {
            repository,
            options,
        }
    }

    /// Walks the tree rooted at `root` and returns the merged aggregate.
    ///
    /// No partial aggregate is returned on failure.
    pub async fn fetch_aggregate(&self, root: &NotionId) -> Result<Aggregate, AppError> {
        let mut state = TraversalState::new();
        let mut aggregate = Aggregate::with_profile(self.options.default_profile.clone());

        self.visit_page(
            root.clone(),
            ROOT_PAGE_TITLE.to_string(),
            &mut state,
            &mut aggregate,
        )
        .await?;

        log::info!(
            "Walk from {} finished: {} page(s) visited, {} context, {} prompt",
            root,
            state.visited_count(),
            aggregate.context.len(),
            aggregate.prompt.len()
        );
        Ok(aggregate)
    }

    /// Visits `id` as a page root and merges it under `title`.
    pub fn visit_page<'a>(
        &'a self,
        id: NotionId,
        title: String,
        state: &'a mut TraversalState,
        aggregate: &'a mut Aggregate,
    ) -> BoxFuture<'a, Result<(), AppError>> {
        Box::pin(async move {
            if !state.mark_visited(id.clone()) {
                log::debug!("Page {} already visited, skipping '{}'", id, title);
                return Ok(());
            }
            log::info!("Visiting page '{}' ({})", title, id);

            let tag = self.classify(&id).await;

            let mut counters = ListCounters::new();
            let text = self
                .flatten_children(&id, 1, &mut counters, state, aggregate)
                .await?;

            *aggregate = merge_page(std::mem::take(aggregate), tag, &title, text);
            Ok(())
        })
    }

    /// Flattens the children of `parent` at `depth`, visiting any pages they
    /// lead to along the way.
    pub fn flatten_children<'a>(
        &'a self,
        parent: &'a NotionId,
        depth: usize,
        counters: &'a mut ListCounters,
        state: &'a mut TraversalState,
        aggregate: &'a mut Aggregate,
    ) -> BoxFuture<'a, Result<String, AppError>> {
        Box::pin(async move {
            let children = self.repository.list_all_children(parent).await?;
            let mut parts = Vec::with_capacity(children.len());

            for block in &children {
                let line = render_block(block, depth, counters);
                let block_id = NotionId::from(block.id());

                match block {
                    Block::Table(table) => parts.push(self.render_table(table).await),

                    Block::ChildPage(child) => {
                        let title = format!("{}{}", CHILD_PAGE_TITLE_PREFIX, child.title);
                        self.visit_page(block_id, title, state, aggregate).await?;
                    }

                    Block::ColumnList(_) | Block::Column(_) => {
                        if block.has_children() {
                            let inner = self
                                .flatten_children(&block_id, depth, counters, state, aggregate)
                                .await?;
                            parts.push(inner);
                            // Lists inside a container do not continue past it.
                            counters.reset(depth);
                        }
                    }

                    Block::Divider(_) => parts.push(DIVIDER_MARKER.to_string()),

                    Block::Image(_)
                    | Block::Video(_)
                    | Block::File(_)
                    | Block::Pdf(_)
                    | Block::Bookmark(_)
                    | Block::Embed(_)
                    | Block::LinkPreview(_) => parts.push(line),

                    Block::ChildDatabase(_) | Block::TableRow(_) | Block::Unsupported(_) => {
                        log::warn!(
                            "Skipping {} block {} under {}",
                            block.block_type(),
                            block_id,
                            parent
                        );
                    }

                    _ => {
                        let Some(spans) = block.rich_text() else {
                            log::warn!("Skipping {} block {}", block.block_type(), block_id);
                            continue;
                        };
                        parts.push(line);
                        self.follow_mentions(spans, state, aggregate).await?;

                        if block.has_children() {
                            let nested = self
                                .flatten_children(&block_id, depth + 1, counters, state, aggregate)
                                .await?;
                            parts.push(nested);
                        }
                    }
                }
            }

            Ok(parts.join("\n"))
        })
    }

    async fn classify(&self, id: &NotionId) -> PageTag {
        match self.repository.retrieve_page_metadata(id).await {
            Ok(metadata) => PageTag::from_metadata(&metadata, &self.options.tag_property),
            Err(e) => {
                log::warn!(
                    "Could not read properties of page {} ({}), treating it as context",
                    id,
                    e
                );
                PageTag::Context
            }
        }
    }

    async fn follow_mentions(
        &self,
        spans: &[RichTextItem],
        state: &mut TraversalState,
        aggregate: &mut Aggregate,
    ) -> Result<(), AppError> {
        for span in spans {
            match mention_target(span, self.options.mention_policy) {
                Some(target) => {
                    let title = format!("{}{}", MENTIONED_PAGE_TITLE_PREFIX, span.plain_text);
                    self.visit_page(target, title, state, aggregate).await?;
                }
                None if span.is_mention() => {
                    log::debug!("Mention '{}' has no page to follow", span.plain_text);
                }
                None => {}
            }
        }
        Ok(())
    }

    async fn render_table(&self, table: &TableBlock) -> String {
        let id = NotionId::from(&table.common.id);
        let rows = match self.repository.retrieve_table_rows(&id).await {
            Ok(rows) => rows,
            Err(e) => {
                log::error!("Failed to fetch rows of table {}: {}", id, e);
                Vec::new()
            }
        };
        format_table_rows(&rows, table.has_column_header)
    }
}
