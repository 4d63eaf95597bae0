// src/render/rss.rs
//! RSS 2.0 serializer.
//!
//! The document is assembled element by element, matching the channel/item
//! layout feed readers expect. Text outside CDATA is escaped for all five XML
//! specials; `content:encoded` is CDATA-wrapped with everything outside the
//! printable ASCII range (plus tab/newline/CR) stripped, since downstream
//! consumers of that element choke on raw control and astral characters.

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use regex::Regex;

use crate::merge::MergedFeed;

pub const GENERATOR: &str = "rss-merger";

fn escape_xml(unsafe_text: &str) -> String {
    let mut out = String::with_capacity(unsafe_text.len());
    for ch in unsafe_text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

fn wrap_cdata(content: &str) -> String {
    format!("<![CDATA[{content}]]>")
}

fn strip_non_printable(content: &str) -> String {
    static RE: OnceCell<Regex> = OnceCell::new();
    let re = RE.get_or_init(|| Regex::new(r"[^\x20-\x7E\n\r\t]").unwrap());
    re.replace_all(content, "").into_owned()
}

/// Render the merged feed as an RSS 2.0 document.
///
/// `now` becomes the channel's `lastBuildDate`; callers pass `Utc::now()`.
pub fn render_rss(feed: &MergedFeed, now: DateTime<Utc>) -> String {
    let mut items = String::new();
    for item in &feed.items {
        items.push_str("    <item>\n");

        items.push_str(&format!(
            "      <title>{}</title>\n",
            escape_xml(item.title.as_deref().unwrap_or("Untitled"))
        ));

        if let Some(link) = &item.link {
            items.push_str(&format!("      <link>{}</link>\n", escape_xml(link)));
        }

        // Always emitted, even when the fallback chain bottoms out empty.
        let guid = item
            .guid
            .as_deref()
            .or(item.link.as_deref())
            .unwrap_or("");
        items.push_str(&format!("      <guid>{}</guid>\n", escape_xml(guid)));

        if let Some(pub_date) = &item.pub_date {
            items.push_str(&format!(
                "      <pubDate>{}</pubDate>\n",
                escape_xml(pub_date)
            ));
        } else if let Some(published_at) = &item.published_at {
            items.push_str(&format!(
                "      <pubDate>{}</pubDate>\n",
                escape_xml(&published_at.to_rfc3339())
            ));
        }

        if let Some(creator) = &item.creator {
            items.push_str(&format!(
                "      <dc:creator>{}</dc:creator>\n",
                wrap_cdata(creator)
            ));
        }

        if let Some(content_html) = &item.content_html {
            items.push_str(&format!(
                "      <content:encoded>{}</content:encoded>\n",
                wrap_cdata(&strip_non_printable(content_html))
            ));
        } else if let Some(content_text) = &item.content_text {
            items.push_str(&format!(
                "      <description>{}</description>\n",
                escape_xml(content_text)
            ));
        }

        for category in &item.categories {
            items.push_str(&format!(
                "      <category>{}</category>\n",
                escape_xml(category)
            ));
        }

        if let Some(source_title) = &item.source_title {
            items.push_str(&format!(
                "      <source url=\"{}\">{}</source>\n",
                escape_xml(&item.source_url),
                escape_xml(source_title)
            ));
        }

        items.push_str("    </item>\n");
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<rss version=\"2.0\" xmlns:content=\"http://purl.org/rss/1.0/modules/content/\" xmlns:dc=\"http://purl.org/dc/elements/1.1/\">\n\
  <channel>\n\
    <title>{title}</title>\n\
    <description>{description}</description>\n\
    <link>{link}</link>\n\
    <lastBuildDate>{last_build_date}</lastBuildDate>\n\
    <generator>{GENERATOR}</generator>\n\
{items}  </channel>\n\
</rss>",
        title = escape_xml(&feed.title),
        description = escape_xml(&feed.description),
        link = escape_xml(&feed.link),
        last_build_date = escape_xml(&now.to_rfc2822()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_all_five_specials() {
        assert_eq!(
            escape_xml(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&apos;s&lt;/a&gt;"
        );
    }

    #[test]
    fn strips_characters_outside_printable_ascii() {
        assert_eq!(
            strip_non_printable("keep this 🎉 and\tthat\nline\u{0007}"),
            "keep this  and\tthat\nline"
        );
    }

    #[test]
    fn cdata_wrapping_is_verbatim() {
        assert_eq!(wrap_cdata("<p>hi</p>"), "<![CDATA[<p>hi</p>]]>");
    }
}
