// ABOUTME: Shared fixtures for integration tests.
// ABOUTME: A canned MediaProbe and helpers that put real files on disk for metadata reads.

#![allow(dead_code)]

use mp3cast_feed::{FeedError, MediaProbe, ProbedMedia, TagFields, TagFormat};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Probe that returns the same canned answer for any path.
pub struct StaticProbe(pub ProbedMedia);

impl MediaProbe for StaticProbe {
    fn probe(&self, _path: &Path) -> Result<ProbedMedia, FeedError> {
        Ok(self.0.clone())
    }
}

pub fn tier(format: TagFormat, title: Option<&str>, artist: Option<&str>) -> TagFields {
    TagFields {
        format,
        title: title.map(str::to_string),
        artist: artist.map(str::to_string),
    }
}

pub fn media(duration_seconds: u64, size_bytes: u64, tags: Vec<TagFields>) -> ProbedMedia {
    ProbedMedia {
        duration_seconds,
        size_bytes,
        tags,
    }
}

/// Creates `name` inside a fresh temp dir so filesystem metadata is readable.
pub fn audio_file(name: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, b"ID3").unwrap();
    (dir, path)
}
