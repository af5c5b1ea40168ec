// ABOUTME: Item models: one resolved audio file ready to be placed in a feed.
// ABOUTME: Holds ItemRecord with its invariant check and the ItemOverrides builder.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::FeedError;

/// One audio file's feed entry.
///
/// Items carry no URL; the feed derives it from its base URL and
/// `short_filename` when serializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub short_filename: String,
    pub full_path: PathBuf,
    pub file_size_bytes: u64,
    pub duration_seconds: u64,
    /// `H:MM:SS` rendering of `duration_seconds`.
    pub duration_display: String,
    /// RFC 2822 timestamp.
    pub publish_date: String,
    pub title: String,
    pub author: Option<String>,
    pub subtitle: String,
    pub summary: String,
    pub image_url: Option<String>,
}

impl ItemRecord {
    /// File size as the decimal text used for `enclosure length`.
    pub fn file_size(&self) -> String {
        self.file_size_bytes.to_string()
    }

    /// URL of the item under the given base URL.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url, self.short_filename)
    }

    /// Checks the invariants every item in a feed must hold.
    pub fn validate(&self) -> Result<(), FeedError> {
        if self.duration_seconds == 0 {
            return Err(FeedError::invalid_item(format!(
                "{} has zero duration",
                self.full_path.display()
            )));
        }
        if self.short_filename.is_empty() {
            return Err(FeedError::invalid_item(format!(
                "{} has no file name",
                self.full_path.display()
            )));
        }
        if self.title.is_empty() {
            return Err(FeedError::invalid_item(format!(
                "{} has an empty title",
                self.full_path.display()
            )));
        }
        Ok(())
    }
}

/// Caller-supplied values that win over anything read from the file.
/// Empty strings are treated as not supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemOverrides {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subtitle: Option<String>,
    pub summary: Option<String>,
    pub image_url: Option<String>,
}

impl ItemOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}
