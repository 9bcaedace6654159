//! Text-likeness classification
//!
//! Decides whether a fetched resource should be searched for further
//! references. A declared media type containing `text` always wins; without
//! one, the last path segment's file extension is checked against a fixed
//! allow-list.

use url::Url;

/// Extensions treated as text when no text-like media type was declared
pub const DEFAULT_TEXT_EXTENSIONS: &[&str] = &[
    "txt", "html", "css", "js", "php", "aspx", "asp", "htm", "xml", "jsp",
];

/// Returns whether the resource at `location` should be treated as text
///
/// Policy, in order:
/// 1. A declared media type containing the substring `text`
///    (case-insensitive) classifies as text.
/// 2. Otherwise the substring after the final `.` of the last path segment
///    is compared case-insensitively against `known_extensions`.
/// 3. Otherwise the resource is not text-like.
pub fn is_text_like(media_type: Option<&str>, location: &Url, known_extensions: &[String]) -> bool {
    if let Some(media) = media_type {
        if media.to_ascii_lowercase().contains("text") {
            return true;
        }
    }

    let segment = location.path().rsplit('/').next().unwrap_or("");
    let ext = segment.rsplit('.').next().unwrap_or("");
    known_extensions
        .iter()
        .any(|known| ext.eq_ignore_ascii_case(known))
}
