// src/walker/mentions.rs
//! Decides which mention spans point at pages worth visiting.

use crate::types::{NotionId, RichTextItem, RichTextType};
use serde::{Deserialize, Serialize};
use url::Url;

/// Which mention targets the walker follows.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum MentionPolicy {
    /// Page and database mentions, plus hrefs on Notion hosts.
    #[default]
    NotionPages,
    /// Any href whose last path segment carries a Notion ID.
    AnyHref,
}

/// The page a span should lead to, if any.
///
/// A page or database mention's own target wins; otherwise the span's
/// `href` is inspected under `policy`. Plain text spans never have targets.
pub fn mention_target(span: &RichTextItem, policy: MentionPolicy) -> Option<NotionId> {
    let RichTextType::Mention(data) = &span.text_type else {
        return None;
    };

    if let Some(id) = data.mention_type.target_id() {
        return Some(id.clone());
    }

    href_target(span.href.as_deref()?, policy)
}

fn href_target(href: &str, policy: MentionPolicy) -> Option<NotionId> {
    let url = Url::parse(href).ok()?;

    if policy == MentionPolicy::NotionPages && !url.host_str().is_some_and(is_notion_host) {
        return None;
    }

    let segment = url.path_segments()?.filter(|s| !s.is_empty()).last()?;
    NotionId::from_path_segment(segment).ok()
}

fn is_notion_host(host: &str) -> bool {
    ["notion.so", "notion.site"]
        .iter()
        .any(|domain| host == *domain || host.ends_with(&format!(".{}", domain)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MentionData, MentionType};

    const TARGET: &str = "3c612f56fdd04a30a4d6bda7d7426309";

    fn mention(mention_type: MentionType, href: Option<&str>) -> RichTextItem {
        RichTextItem {
            text_type: RichTextType::Mention(MentionData { mention_type }),
            annotations: Default::default(),
            plain_text: "Somewhere".to_string(),
            href: href.map(str::to_string),
        }
    }

    #[test]
    fn test_page_mention_uses_its_own_target() {
        let id = NotionId::parse(TARGET).unwrap();
        let span = RichTextItem::page_mention(id.clone(), "Roadmap");
        assert_eq!(mention_target(&span, MentionPolicy::NotionPages), Some(id));
    }

    #[test]
    fn test_notion_href_is_followed() {
        let href = format!("https://www.notion.so/acme/Roadmap-{}", TARGET);
        let span = mention(MentionType::Other, Some(&href));
        let target = mention_target(&span, MentionPolicy::NotionPages).unwrap();
        assert_eq!(target.as_str(), TARGET);
    }

    #[test]
    fn test_foreign_host_needs_any_href() {
        let href = format!("https://example.com/docs/{}", TARGET);
        let span = mention(MentionType::LinkPreview { url: href.clone() }, Some(&href));

        assert_eq!(mention_target(&span, MentionPolicy::NotionPages), None);
        assert_eq!(
            mention_target(&span, MentionPolicy::AnyHref).map(|id| id.as_str().to_string()),
            Some(TARGET.to_string())
        );
    }

    #[test]
    fn test_unfollowable_spans() {
        let user = mention(
            MentionType::User {
                id: "u1".to_string(),
                name: Some("Ada".to_string()),
            },
            None,
        );
        assert_eq!(mention_target(&user, MentionPolicy::AnyHref), None);

        let no_id = mention(MentionType::Other, Some("https://www.notion.so/acme/Home"));
        assert_eq!(mention_target(&no_id, MentionPolicy::AnyHref), None);

        let plain = RichTextItem::plain_text(TARGET);
        assert_eq!(mention_target(&plain, MentionPolicy::AnyHref), None);
    }

    #[test]
    fn test_notion_site_subdomain() {
        assert!(is_notion_host("acme.notion.site"));
        assert!(is_notion_host("notion.so"));
        assert!(!is_notion_host("notnotion.so"));
    }
}
