// ABOUTME: Publish date derivation for feed items from filesystem metadata.
// ABOUTME: Reads the status-change time (creation/modification off Unix) and renders RFC 2822.

use chrono::{DateTime, Utc};
use std::fs::Metadata;
use std::io;

/// Returns the timestamp used as an item's publish date.
///
/// On Unix this is the inode status-change time (`st_ctime`). Elsewhere the
/// creation time is used, falling back to the modification time when the
/// platform does not record creation.
pub fn file_timestamp(meta: &Metadata) -> io::Result<DateTime<Utc>> {
    platform_timestamp(meta)
}

#[cfg(unix)]
fn platform_timestamp(meta: &Metadata) -> io::Result<DateTime<Utc>> {
    use std::os::unix::fs::MetadataExt;

    let nanos = u32::try_from(meta.ctime_nsec()).unwrap_or(0);
    DateTime::from_timestamp(meta.ctime(), nanos).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("status-change time {} is out of range", meta.ctime()),
        )
    })
}

#[cfg(not(unix))]
fn platform_timestamp(meta: &Metadata) -> io::Result<DateTime<Utc>> {
    let time = meta.created().or_else(|_| meta.modified())?;
    Ok(DateTime::<Utc>::from(time))
}

/// Formats a timestamp as an RFC 2822 date for `pubDate`.
/// Sub-second precision is dropped.
pub fn format_pub_date(dt: DateTime<Utc>) -> String {
    dt.to_rfc2822()
}
