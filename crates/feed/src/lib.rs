// ABOUTME: Core library for turning MP3 files into a podcast RSS feed.
// ABOUTME: Provides item resolution from ID3 tags, feed configuration, and RSS/iTunes serialization.

pub mod duration;
pub mod error;
pub mod feed;
pub mod item;
pub mod probe;
pub mod pub_date;
pub mod resolver;
pub mod rss;

pub use duration::{format_hmmss, parse_hmmss};
pub use error::FeedError;
pub use feed::{normalize_base_url, Feed, FeedBuilder, FeedOptions, DEFAULT_FEED_TITLE};
pub use item::{ItemOverrides, ItemRecord};
pub use probe::{LoftyProbe, MediaProbe, ProbedMedia, TagField, TagFields, TagFormat};
pub use resolver::MetadataResolver;
pub use rss::{ENCLOSURE_MIME_TYPE, ITUNES_NAMESPACE};
