// src/source/extract.rs
//! Markup to plain text.

use once_cell::sync::Lazy;
use regex::Regex;

/// Turns raw fetched content into the plain text that gets counted.
pub trait TextExtractor: Send + Sync {
    fn extract_plain_text(&self, raw: &str) -> String;
}

static SCRIPT_OR_STYLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>")
        .expect("script/style pattern is valid")
});

static COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern is valid"));

static TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("tag pattern is valid"));

/// Strips HTML markup, keeping the text nodes as they appear in the source.
///
/// Whitespace is left untouched, so the text between tags keeps its
/// original spacing and line breaks.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkupTextExtractor;

impl TextExtractor for MarkupTextExtractor {
    fn extract_plain_text(&self, raw: &str) -> String {
        let text = SCRIPT_OR_STYLE.replace_all(raw, "");
        let text = COMMENT.replace_all(&text, "");
        let text = TAG.replace_all(&text, "");
        decode_entities(&text)
    }
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    // &amp; last so "&amp;lt;" decodes to "&lt;" and not "<"
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
