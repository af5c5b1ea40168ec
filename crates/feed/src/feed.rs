// ABOUTME: Feed configuration, FeedBuilder, and the Feed that owns the ordered item list.
// ABOUTME: Validates base url and link, normalizes the trailing slash, and gates item insertion.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};
use url::Url;

use crate::error::FeedError;
use crate::item::ItemRecord;
use crate::rss;

/// Feed title used when none is configured.
pub const DEFAULT_FEED_TITLE: &str = "MP3 Feed";

/// Feed-level configuration.
///
/// Deserializes with every field optional so it can be loaded from a config
/// file; `base_url` and `link` are checked when the feed is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedOptions {
    pub title: String,
    /// Web location the audio files are served from.
    pub base_url: Option<String>,
    /// Address the feed document itself is published at.
    pub link: Option<String>,
    pub description: Option<String>,
    pub summary: Option<String>,
    pub author: Option<String>,
    pub image_url: Option<String>,
    pub owner_name: Option<String>,
    pub owner_email: Option<String>,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_FEED_TITLE.to_string(),
            base_url: None,
            link: None,
            description: None,
            summary: None,
            author: None,
            image_url: None,
            owner_name: None,
            owner_email: None,
        }
    }
}

/// Builder for constructing a Feed with validated configuration.
#[derive(Debug, Clone, Default)]
pub struct FeedBuilder {
    opts: FeedOptions,
}

impl FeedBuilder {
    /// Create a new FeedBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: FeedOptions::default(),
        }
    }

    /// Start from previously loaded options.
    pub fn from_options(opts: FeedOptions) -> Self {
        Self { opts }
    }

    /// Set the feed title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.opts.title = title.into();
        self
    }

    /// Set the URL prefix items are served under.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.opts.base_url = Some(base_url.into());
        self
    }

    /// Set the address the feed is published at.
    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.opts.link = Some(link.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.opts.description = Some(description.into());
        self
    }

    /// Set the summary. Defaults to the description when unset.
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.opts.summary = Some(summary.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.opts.author = Some(author.into());
        self
    }

    pub fn image_url(mut self, image_url: impl Into<String>) -> Self {
        self.opts.image_url = Some(image_url.into());
        self
    }

    /// Set the owner name. Only rendered when an owner email is also set.
    pub fn owner_name(mut self, owner_name: impl Into<String>) -> Self {
        self.opts.owner_name = Some(owner_name.into());
        self
    }

    pub fn owner_email(mut self, owner_email: impl Into<String>) -> Self {
        self.opts.owner_email = Some(owner_email.into());
        self
    }

    /// Build the Feed.
    ///
    /// # Errors
    /// * `FeedError::Configuration` - `base_url` or `link` is missing or empty
    pub fn build(self) -> Result<Feed, FeedError> {
        Feed::from_options(self.opts)
    }
}

/// A podcast feed: channel metadata plus items in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feed {
    title: String,
    base_url: String,
    link: String,
    description: Option<String>,
    summary: Option<String>,
    author: Option<String>,
    image_url: Option<String>,
    owner_name: Option<String>,
    owner_email: Option<String>,
    items: Vec<ItemRecord>,
}

impl Feed {
    /// Start building a feed.
    pub fn builder() -> FeedBuilder {
        FeedBuilder::new()
    }

    /// Create an empty feed from options.
    pub fn from_options(opts: FeedOptions) -> Result<Self, FeedError> {
        let base_url = required(opts.base_url, "a base url is required")?;
        let link = required(opts.link, "a feed link is required")?;

        if Url::parse(&base_url).is_err() {
            warn!(base_url = %base_url, "base url is not an absolute url");
        }

        let title = non_empty(Some(opts.title)).unwrap_or_else(|| DEFAULT_FEED_TITLE.to_string());
        let description = non_empty(opts.description);
        let summary = non_empty(opts.summary).or_else(|| description.clone());

        Ok(Self {
            title,
            base_url: normalize_base_url(&base_url),
            link,
            description,
            summary,
            author: non_empty(opts.author),
            image_url: non_empty(opts.image_url),
            owner_name: non_empty(opts.owner_name),
            owner_email: non_empty(opts.owner_email),
            items: Vec::new(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Base URL, always ending in exactly one `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn owner_name(&self) -> Option<&str> {
        self.owner_name.as_deref()
    }

    pub fn owner_email(&self) -> Option<&str> {
        self.owner_email.as_deref()
    }

    /// Items in feed order.
    pub fn items(&self) -> &[ItemRecord] {
        &self.items
    }

    /// Number of items in the feed.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// URL an item is published at in this feed.
    pub fn item_url(&self, item: &ItemRecord) -> String {
        item.url(&self.base_url)
    }

    /// Adds an item to the end of the feed.
    ///
    /// The same item may be appended more than once; no deduplication is done.
    ///
    /// # Errors
    /// * `FeedError::InvalidItem` - the item breaks the item invariants; the
    ///   feed is left unchanged
    pub fn append(&mut self, item: ItemRecord) -> Result<(), FeedError> {
        item.validate()?;
        debug!(file = %item.short_filename, position = self.items.len(), "appending item");
        self.items.push(item);
        Ok(())
    }

    /// Removes and returns the item at `index`, or None if out of range.
    pub fn remove(&mut self, index: usize) -> Option<ItemRecord> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Removes every item resolved from `path`. Returns how many were removed.
    pub fn remove_path(&mut self, path: impl AsRef<Path>) -> usize {
        let path = path.as_ref();
        let before = self.items.len();
        self.items.retain(|item| item.full_path.as_path() != path);
        before - self.items.len()
    }

    /// Renders the feed as an RSS 2.0 document with iTunes extensions.
    pub fn serialize(&self) -> Result<Vec<u8>, FeedError> {
        let mut out = Vec::new();
        self.write_to(&mut out)?;
        Ok(out)
    }

    /// Streams the rendered document into `writer`.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), FeedError> {
        rss::write_feed(self, writer)
    }
}

/// Ensures the base URL ends with exactly one `/`.
pub fn normalize_base_url(base_url: &str) -> String {
    format!("{}/", base_url.trim_end_matches('/'))
}

fn required(value: Option<String>, msg: &str) -> Result<String, FeedError> {
    non_empty(value).ok_or_else(|| FeedError::configuration(msg))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
