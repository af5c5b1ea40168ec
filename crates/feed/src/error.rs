// ABOUTME: Error types for item resolution and feed generation.
// ABOUTME: FeedError covers corrupt media, bad configuration, invalid items, io, and xml failures.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while resolving items or building a feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The audio file has no usable MPEG stream (zero duration or undecodable).
    #[error("file {} appears to be corrupt: {reason}", .path.display())]
    CorruptMedia { path: PathBuf, reason: String },

    /// Required feed configuration is missing or empty.
    #[error("invalid feed configuration: {0}")]
    Configuration(String),

    /// An item handed to the feed breaks the item invariants.
    #[error("invalid item: {0}")]
    InvalidItem(String),

    /// The file or its metadata could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The XML writer failed.
    #[error("failed to write feed xml: {0}")]
    Xml(String),
}

impl FeedError {
    /// Creates a CorruptMedia error for the given file.
    pub fn corrupt(path: impl AsRef<Path>, reason: impl fmt::Display) -> Self {
        FeedError::CorruptMedia {
            path: path.as_ref().to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Creates a Configuration error with a custom message.
    pub fn configuration(msg: impl Into<String>) -> Self {
        FeedError::Configuration(msg.into())
    }

    /// Creates an InvalidItem error with a custom message.
    pub fn invalid_item(msg: impl Into<String>) -> Self {
        FeedError::InvalidItem(msg.into())
    }

    /// Creates an Io error tied to the file that failed.
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        FeedError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates an Xml error from an underlying quick-xml failure.
    pub fn xml(err: impl fmt::Display) -> Self {
        FeedError::Xml(err.to_string())
    }

    /// True when the error marks a file that should be skipped as corrupt.
    pub fn is_corrupt_media(&self) -> bool {
        matches!(self, FeedError::CorruptMedia { .. })
    }
}
