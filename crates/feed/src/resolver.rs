// ABOUTME: Resolves an audio file plus optional overrides into an ItemRecord.
// ABOUTME: Applies the corrupt-duration check, tiered tag fallback, and default rules.

use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::duration::format_hmmss;
use crate::error::FeedError;
use crate::item::{ItemOverrides, ItemRecord};
use crate::probe::{LoftyProbe, MediaProbe, TagField};
use crate::pub_date::{file_timestamp, format_pub_date};

/// Builds feed items from audio files.
#[derive(Debug, Clone, Default)]
pub struct MetadataResolver<P = LoftyProbe> {
    probe: P,
}

impl MetadataResolver<LoftyProbe> {
    /// Create a resolver that reads MPEG files with lofty.
    pub fn new() -> Self {
        Self {
            probe: LoftyProbe::new(),
        }
    }
}

impl<P: MediaProbe> MetadataResolver<P> {
    /// Create a resolver backed by a custom probe.
    pub fn with_probe(probe: P) -> Self {
        Self { probe }
    }

    /// Resolves a file with no overrides.
    pub fn resolve_file(&self, path: impl AsRef<Path>) -> Result<ItemRecord, FeedError> {
        self.resolve(path, &ItemOverrides::default())
    }

    /// Resolves a file into an item.
    ///
    /// # Errors
    /// * `FeedError::CorruptMedia` - the file reports zero duration or is not MPEG
    /// * `FeedError::Io` - the file or its metadata cannot be read
    pub fn resolve(
        &self,
        path: impl AsRef<Path>,
        overrides: &ItemOverrides,
    ) -> Result<ItemRecord, FeedError> {
        let path = path.as_ref();
        let media = self.probe.probe(path)?;

        // Zero duration is the primary corruption signal; tags are not consulted.
        if media.duration_seconds == 0 {
            return Err(FeedError::corrupt(path, "detected duration is zero"));
        }

        let short_filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                FeedError::invalid_item(format!("{} has no file name", path.display()))
            })?;

        let meta = fs::metadata(path).map_err(|e| FeedError::io(path, e))?;
        let timestamp = file_timestamp(&meta).map_err(|e| FeedError::io(path, e))?;
        let publish_date = format_pub_date(timestamp);

        let title = match explicit(&overrides.title) {
            Some(title) => title,
            None => match media.find(TagField::Title) {
                Some((format, title)) => {
                    debug!(path = %path.display(), ?format, "title read from tag");
                    title.to_string()
                }
                None => {
                    warn!(path = %path.display(), "no tag title found, using file name");
                    short_filename.clone()
                }
            },
        };

        let author = explicit(&overrides.author).or_else(|| {
            media.find(TagField::Artist).map(|(format, artist)| {
                debug!(path = %path.display(), ?format, "author read from tag");
                artist.to_string()
            })
        });

        let subtitle = explicit(&overrides.subtitle).unwrap_or_default();
        let summary = explicit(&overrides.summary)
            .unwrap_or_else(|| format!("{} - {}", short_filename, title));
        let image_url = explicit(&overrides.image_url);

        debug!(
            path = %path.display(),
            title = %title,
            duration_seconds = media.duration_seconds,
            "resolved item"
        );

        Ok(ItemRecord {
            short_filename,
            full_path: path.to_path_buf(),
            file_size_bytes: media.size_bytes,
            duration_seconds: media.duration_seconds,
            duration_display: format_hmmss(media.duration_seconds),
            publish_date,
            title,
            author,
            subtitle,
            summary,
            image_url,
        })
    }
}

fn explicit(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(str::to_string)
}
