// ABOUTME: RSS 2.0 serialization with iTunes podcast extensions using quick-xml.
// ABOUTME: Writes channel metadata and items in the fixed element order podcast readers expect.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::writer::Writer;
use std::io::Write;

use crate::error::FeedError;
use crate::feed::Feed;
use crate::item::ItemRecord;

/// Namespace URI bound to the `itunes` prefix.
pub const ITUNES_NAMESPACE: &str = "http://www.itunes.com/dtds/podcast-1.0.dtd";

/// MIME type of every enclosure in the feed.
pub const ENCLOSURE_MIME_TYPE: &str = "audio/mpeg";

const INDENT_SIZE: usize = 2;

/// Writes the whole feed document, including the XML declaration and a
/// trailing newline.
pub fn write_feed<W: Write>(feed: &Feed, out: W) -> Result<(), FeedError> {
    let mut writer = Writer::new_with_indent(out, b' ', INDENT_SIZE);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(FeedError::xml)?;

    let rss = BytesStart::new("rss")
        .with_attributes([("version", "2.0"), ("xmlns:itunes", ITUNES_NAMESPACE)]);
    writer.write_event(Event::Start(rss)).map_err(FeedError::xml)?;
    start(&mut writer, "channel")?;

    write_channel_metadata(&mut writer, feed)?;
    for item in feed.items() {
        write_item(&mut writer, feed, item)?;
    }

    end(&mut writer, "channel")?;
    end(&mut writer, "rss")?;

    writer.get_mut().write_all(b"\n").map_err(FeedError::xml)?;
    Ok(())
}

fn write_channel_metadata<W: Write>(
    writer: &mut Writer<W>,
    feed: &Feed,
) -> Result<(), FeedError> {
    text_element(writer, "title", feed.title())?;
    text_element(writer, "link", feed.link())?;
    if let Some(description) = feed.description() {
        text_element(writer, "description", description)?;
    }
    if let Some(author) = feed.author() {
        text_element(writer, "itunes:author", author)?;
    }
    // Owner name alone is not enough; readers key the owner on the email.
    if let Some(email) = feed.owner_email() {
        start(writer, "itunes:owner")?;
        text_element(writer, "itunes:email", email)?;
        if let Some(name) = feed.owner_name() {
            text_element(writer, "itunes:name", name)?;
        }
        end(writer, "itunes:owner")?;
    }
    if let Some(image_url) = feed.image_url() {
        image_element(writer, image_url)?;
    }
    Ok(())
}

fn write_item<W: Write>(
    writer: &mut Writer<W>,
    feed: &Feed,
    item: &ItemRecord,
) -> Result<(), FeedError> {
    let url = feed.item_url(item);
    let length = item.file_size();

    start(writer, "item")?;
    text_element(writer, "title", &item.title)?;
    text_element(writer, "link", &url)?;
    text_element(writer, "pubDate", &item.publish_date)?;
    writer
        .create_element("enclosure")
        .with_attribute(("url", url.as_str()))
        .with_attribute(("length", length.as_str()))
        .with_attribute(("type", ENCLOSURE_MIME_TYPE))
        .write_empty()
        .map_err(FeedError::xml)?;
    text_element(writer, "itunes:subtitle", &item.subtitle)?;
    text_element(writer, "itunes:summary", &item.summary)?;
    text_element(writer, "itunes:duration", &item.duration_display)?;
    if let Some(author) = &item.author {
        text_element(writer, "itunes:author", author)?;
    }
    if let Some(image_url) = &item.image_url {
        image_element(writer, image_url)?;
    }
    end(writer, "item")
}

fn text_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), FeedError> {
    writer
        .create_element(name)
        .write_text_content(BytesText::new(text))
        .map_err(FeedError::xml)?;
    Ok(())
}

fn image_element<W: Write>(writer: &mut Writer<W>, href: &str) -> Result<(), FeedError> {
    writer
        .create_element("itunes:image")
        .with_attribute(("href", href))
        .write_empty()
        .map_err(FeedError::xml)?;
    Ok(())
}

fn start<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<(), FeedError> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(FeedError::xml)
}

fn end<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<(), FeedError> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(FeedError::xml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::FeedBuilder;
    use pretty_assertions::assert_eq;
    use quick_xml::reader::Reader;
    use std::path::PathBuf;

    fn item(name: &str, title: &str) -> ItemRecord {
        ItemRecord {
            short_filename: name.to_string(),
            full_path: PathBuf::from(format!("shows/{}", name)),
            file_size_bytes: 33563,
            duration_seconds: 3723,
            duration_display: "1:02:03".to_string(),
            publish_date: "Mon, 15 Jan 2024 10:00:00 +0000".to_string(),
            title: title.to_string(),
            author: None,
            subtitle: String::new(),
            summary: format!("{} - {}", name, title),
            image_url: None,
        }
    }

    /// Collects element names in document order.
    fn element_names(xml: &[u8]) -> Vec<String> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);
        let mut buf = Vec::new();
        let mut names = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                    names.push(String::from_utf8_lossy(e.name().as_ref()).to_string());
                }
                Ok(Event::Eof) => break,
                Err(e) => panic!("invalid xml: {}", e),
                _ => {}
            }
            buf.clear();
        }
        names
    }

    #[test]
    fn test_minimal_channel_order() {
        let feed = FeedBuilder::new()
            .base_url("http://example.com")
            .link("http://example.com/rss.xml")
            .build()
            .unwrap();
        let xml = feed.serialize().unwrap();
        assert_eq!(element_names(&xml), vec!["rss", "channel", "title", "link"]);
    }

    #[test]
    fn test_full_channel_and_item_order() {
        let mut feed = FeedBuilder::new()
            .title("Show")
            .base_url("http://example.com")
            .link("http://example.com/rss.xml")
            .description("About the show")
            .author("Host")
            .owner_email("host@example.com")
            .owner_name("Host Name")
            .image_url("http://example.com/cover.jpg")
            .build()
            .unwrap();
        let mut episode = item("a.mp3", "Episode A");
        episode.author = Some("Guest".to_string());
        episode.image_url = Some("http://example.com/a.jpg".to_string());
        feed.append(episode).unwrap();

        let xml = feed.serialize().unwrap();
        assert_eq!(
            element_names(&xml),
            vec![
                "rss",
                "channel",
                "title",
                "link",
                "description",
                "itunes:author",
                "itunes:owner",
                "itunes:email",
                "itunes:name",
                "itunes:image",
                "item",
                "title",
                "link",
                "pubDate",
                "enclosure",
                "itunes:subtitle",
                "itunes:summary",
                "itunes:duration",
                "itunes:author",
                "itunes:image",
            ]
        );
    }

    #[test]
    fn test_owner_name_without_email_is_dropped() {
        let feed = FeedBuilder::new()
            .base_url("http://example.com")
            .link("http://example.com/rss.xml")
            .owner_name("Nobody")
            .build()
            .unwrap();
        let xml = String::from_utf8(feed.serialize().unwrap()).unwrap();
        assert!(!xml.contains("itunes:owner"));
        assert!(!xml.contains("Nobody"));
    }

    #[test]
    fn test_header_and_namespace() {
        let feed = FeedBuilder::new()
            .base_url("http://example.com")
            .link("http://example.com/rss.xml")
            .build()
            .unwrap();
        let xml = String::from_utf8(feed.serialize().unwrap()).unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(
            r#"<rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd">"#
        ));
        assert!(xml.ends_with("</rss>\n"));
    }

    #[test]
    fn test_text_and_attributes_are_escaped() {
        let mut feed = FeedBuilder::new()
            .title("Tom & Jerry <live>")
            .base_url("http://example.com")
            .link("http://example.com/rss.xml")
            .build()
            .unwrap();
        feed.append(item("a&b.mp3", "Cats & Mice")).unwrap();

        let xml = String::from_utf8(feed.serialize().unwrap()).unwrap();
        assert!(xml.contains("<title>Tom &amp; Jerry &lt;live&gt;</title>"));
        assert!(xml.contains("<title>Cats &amp; Mice</title>"));
        assert!(xml.contains(r#"url="http://example.com/a&amp;b.mp3""#));
    }

    #[test]
    fn test_enclosure_attributes() {
        let mut feed = FeedBuilder::new()
            .base_url("http://example.com/")
            .link("http://example.com/rss.xml")
            .build()
            .unwrap();
        feed.append(item("a.mp3", "A")).unwrap();

        let xml = String::from_utf8(feed.serialize().unwrap()).unwrap();
        assert!(xml.contains(
            r#"<enclosure url="http://example.com/a.mp3" length="33563" type="audio/mpeg"/>"#
        ));
        assert!(xml.contains("<itunes:duration>1:02:03</itunes:duration>"));
        assert!(xml.contains("<pubDate>Mon, 15 Jan 2024 10:00:00 +0000</pubDate>"));
    }

    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "sink closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failing_writer_reports_xml_error() {
        let mut feed = FeedBuilder::new()
            .base_url("http://example.com/")
            .link("http://example.com/rss.xml")
            .build()
            .unwrap();
        feed.append(item("a.mp3", "A")).unwrap();

        let err = feed.write_to(BrokenSink).unwrap_err();
        assert!(matches!(err, FeedError::Xml(_)), "got {:?}", err);
        assert!(err.to_string().contains("sink closed"), "{}", err);
    }
}
