use chrono::{DateTime, Utc};
use feed_rs::model::Entry;
use feed_rs::parser;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::FeedError;

/// At most this many items are rendered per request, in feed order.
pub const MAX_ARTICLES: usize = 100;

const DESCRIPTION_LIMIT: usize = 200;
const DEFAULT_TITLE: &str = "No title available";
const DEFAULT_AUTHOR: &str = "Mashable";

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
// First src wins, same as the single-scan it replaces. Not necessarily the
// lead image; callers rely on the first-match behavior.
static IMG_SRC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<img[^>]+src="([^">]+)""#).expect("valid img regex"));

#[derive(Debug, Clone)]
pub struct FeedMetadata {
    pub title: String,
    pub description: String,
}

#[derive(Debug)]
pub struct ParsedFeed {
    pub metadata: FeedMetadata,
    pub articles: Vec<Article>,
}

/// Normalized per-item record. Every field is already display-ready; missing
/// source data degrades to the documented fallback instead of an error.
#[derive(Debug, Clone)]
pub struct Article {
    pub title: String,
    pub link: String,
    pub description: String,
    pub published: String,
    pub author: String,
    pub image_url: Option<String>,
}

impl Article {
    fn from_entry(entry: Entry) -> Self {
        let image_url = extract_image(&entry);

        let title = entry
            .title
            .map(|t| t.content)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());

        let link = entry
            .links
            .into_iter()
            .next()
            .map(|l| l.href)
            .filter(|href| !href.is_empty())
            .unwrap_or_else(|| "#".to_string());

        let description = summarize(&entry.summary.map(|t| t.content).unwrap_or_default());

        let published = entry.published.map(format_published).unwrap_or_default();

        let author = entry
            .authors
            .into_iter()
            .next()
            .map(|person| person.name)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_AUTHOR.to_string());

        Self {
            title,
            link,
            description,
            published,
            author,
            image_url,
        }
    }

    // Lowercase copies embedded as quoted data attributes; the client search
    // index is built from these, never from the display text.
    pub fn search_title(&self) -> String {
        self.title.to_lowercase()
    }

    pub fn search_description(&self) -> String {
        self.description.to_lowercase()
    }

    pub fn search_author(&self) -> String {
        self.author.to_lowercase()
    }
}

/// Parse raw feed XML into metadata plus at most [`MAX_ARTICLES`] records,
/// preserving source order. Structural problems (no recognizable feed, no
/// channel) surface as [`FeedError::Malformed`].
pub fn parse_feed(xml: &str) -> Result<ParsedFeed, FeedError> {
    let feed = parser::parse(xml.as_bytes()).map_err(|e| FeedError::Malformed(e.to_string()))?;

    let metadata = FeedMetadata {
        title: feed
            .title
            .map(|t| t.content)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "RSS Feed".to_string()),
        description: feed.description.map(|t| t.content).unwrap_or_default(),
    };

    let total = feed.entries.len();
    let articles: Vec<Article> = feed
        .entries
        .into_iter()
        .take(MAX_ARTICLES)
        .map(Article::from_entry)
        .collect();

    if total > articles.len() {
        debug!("Feed has {} items, rendering first {}", total, articles.len());
    }

    Ok(ParsedFeed { metadata, articles })
}

/// Strip markup tags and hard-truncate to the first 200 characters with a
/// trailing "...". Empty input stays empty; everything else gets the
/// ellipsis even when it was already short.
pub fn summarize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let stripped = TAG_RE.replace_all(raw, "");
    let mut text: String = stripped.chars().take(DESCRIPTION_LIMIT).collect();
    text.push_str("...");
    text
}

/// Long-form display date. Total: the parser already reduced unparsable
/// dates to `None`, which renders as an empty string.
pub fn format_published(date: DateTime<Utc>) -> String {
    date.format("%b %-d, %Y, %I:%M %p").to_string()
}

fn extract_image(entry: &Entry) -> Option<String> {
    // Structured media:content URL attribute takes priority.
    if let Some(url) = entry
        .media
        .iter()
        .flat_map(|media| media.content.iter())
        .find_map(|content| content.url.as_ref().map(|u| u.to_string()))
    {
        return Some(url);
    }

    // Fall back to sniffing the embedded content:encoded fragment.
    let body = entry.content.as_ref()?.body.as_deref()?;
    IMG_SRC_RE
        .captures(body)
        .map(|captures| captures[1].to_string())
}
