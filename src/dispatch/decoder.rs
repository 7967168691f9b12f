//! Response body decoding for display.
//!
//! The body is classified by its `Content-Type` into one of a closed set of
//! categories, checked in a fixed order, and decoded accordingly.

use super::json_format::to_js_pretty_string;
use base64::Engine;
use serde::Serialize;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Content type assumed when the response carries none.
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// Display category of a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Json,
    Image,
    Text,
    Binary,
}

impl ContentKind {
    /// Classifies a `Content-Type` value by case-insensitive substring match.
    ///
    /// JSON wins over image, image over text; anything unmatched is binary.
    pub fn classify(content_type: &str) -> Self {
        let ct = content_type.to_ascii_lowercase();

        if ct.contains("application/json") {
            ContentKind::Json
        } else if ct.contains("image/") {
            ContentKind::Image
        } else if ["text/", "application/xml", "application/javascript"]
            .iter()
            .any(|t| ct.contains(t))
        {
            ContentKind::Text
        } else {
            ContentKind::Binary
        }
    }

    /// Whether the body bytes are needed to produce the displayed body.
    pub fn reads_body(&self) -> bool {
        !matches!(self, ContentKind::Binary)
    }
}

/// Drops a leading UTF-8 byte order mark.
pub fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

/// Decodes text as UTF-8, replacing invalid sequences.
pub fn decode_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(strip_bom(bytes)).into_owned()
}

/// Re-serializes a JSON document with two-space indentation and
/// JavaScript number formatting.
///
/// Returns `None` when the bytes are not valid JSON, including documents
/// nested deeper than `serde_json`'s recursion limit of 128.
pub fn pretty_json(bytes: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(strip_bom(bytes)).ok()?;
    to_js_pretty_string(&value).ok()
}

/// Builds a `data:` URL usable directly as an image source.
pub fn image_data_url(content_type: &str, bytes: &[u8]) -> String {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim();
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{};base64,{}", mime, encoded)
}

/// Placeholder shown for bodies that cannot be displayed.
pub fn binary_placeholder(content_type: &str) -> String {
    format!("[Binary content: {}]", content_type)
}

/// Produces the displayed body for `kind`.
///
/// `bytes` is ignored for [`ContentKind::Binary`].
pub fn decode_body(kind: ContentKind, content_type: &str, bytes: &[u8]) -> String {
    match kind {
        ContentKind::Json => pretty_json(bytes).unwrap_or_else(|| decode_text(bytes)),
        ContentKind::Image => image_data_url(content_type, bytes),
        ContentKind::Text => decode_text(bytes),
        ContentKind::Binary => binary_placeholder(content_type),
    }
}
