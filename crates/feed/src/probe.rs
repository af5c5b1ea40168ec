// ABOUTME: Audio probing seam: duration, size, and tiered ID3 tag fields for one file.
// ABOUTME: Defines the MediaProbe trait and the lofty-backed LoftyProbe used by default.

use lofty::config::ParseOptions;
use lofty::file::AudioFile;
use lofty::mpeg::MpegFile;
use lofty::tag::Accessor;
use std::fs::File;
use std::path::Path;
use tracing::debug;

use crate::error::FeedError;

/// Tag format a tier was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagFormat {
    Id3v2,
    Id3v1,
}

/// Tag field looked up through the tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagField {
    Title,
    Artist,
}

/// Text fields read from a single tag format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFields {
    pub format: TagFormat,
    pub title: Option<String>,
    pub artist: Option<String>,
}

impl TagFields {
    /// Returns the field if the tier carries it with non-blank text.
    /// The text is returned as stored; whitespace only decides blankness.
    pub fn get(&self, field: TagField) -> Option<&str> {
        let value = match field {
            TagField::Title => self.title.as_deref(),
            TagField::Artist => self.artist.as_deref(),
        };
        value.filter(|v| !v.trim().is_empty())
    }
}

/// Everything the resolver needs to know about an audio file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbedMedia {
    pub duration_seconds: u64,
    pub size_bytes: u64,
    /// Tag tiers in lookup order, richest format first.
    pub tags: Vec<TagFields>,
}

impl ProbedMedia {
    /// Walks the tiers in order and returns the first one that has the field.
    pub fn lookup(&self, field: TagField) -> Option<&str> {
        self.find(field).map(|(_, value)| value)
    }

    /// Like `lookup`, also reporting which tag format answered.
    pub fn find(&self, field: TagField) -> Option<(TagFormat, &str)> {
        self.tags
            .iter()
            .find_map(|tier| tier.get(field).map(|value| (tier.format, value)))
    }
}

/// Reads duration, size, and tag tiers from an audio file.
pub trait MediaProbe {
    fn probe(&self, path: &Path) -> Result<ProbedMedia, FeedError>;
}

/// MPEG probe backed by the `lofty` crate.
///
/// Tiers are ID3v2 followed by ID3v1. A tier is only present when the file
/// actually carries that tag. Decoding failures are reported as corrupt media.
#[derive(Debug, Clone, Copy)]
pub struct LoftyProbe {
    parse_options: ParseOptions,
}

impl LoftyProbe {
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::new(),
        }
    }
}

impl Default for LoftyProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaProbe for LoftyProbe {
    fn probe(&self, path: &Path) -> Result<ProbedMedia, FeedError> {
        let mut file = File::open(path).map_err(|e| FeedError::io(path, e))?;
        let size_bytes = file
            .metadata()
            .map_err(|e| FeedError::io(path, e))?
            .len();

        let mpeg = MpegFile::read_from(&mut file, self.parse_options)
            .map_err(|e| FeedError::corrupt(path, e))?;
        let duration_seconds = mpeg.properties().duration().as_secs();

        let mut tags = Vec::with_capacity(2);
        if let Some(tag) = mpeg.id3v2() {
            tags.push(TagFields {
                format: TagFormat::Id3v2,
                title: tag.title().map(|s| s.into_owned()),
                artist: tag.artist().map(|s| s.into_owned()),
            });
        }
        if let Some(tag) = mpeg.id3v1() {
            tags.push(TagFields {
                format: TagFormat::Id3v1,
                title: tag.title().map(|s| s.into_owned()),
                artist: tag.artist().map(|s| s.into_owned()),
            });
        }

        debug!(
            path = %path.display(),
            duration_seconds,
            size_bytes,
            tiers = tags.len(),
            "probed mpeg file"
        );

        Ok(ProbedMedia {
            duration_seconds,
            size_bytes,
            tags,
        })
    }
}
