//! Local path derivation for retrieved resources

use std::path::{Path, PathBuf};
use url::Url;

/// Derives the local filesystem path a resource is persisted at
///
/// The layout is `<root>/<host>-<port>/<uri path>`, with `index` appended
/// when the URI path ends in `/`. When the resulting path has no extension
/// and a media type is known, the media type's subtype is appended as one
/// (`text/html` adds `.html`).
pub fn local_path(root: &Path, location: &Url, media_type: Option<&str>) -> PathBuf {
    let mut remote_path = location.path().to_string();
    if remote_path.ends_with('/') {
        remote_path.push_str("index");
    }

    let host = location.host_str().unwrap_or("unknown-host");
    let port = location.port_or_known_default().unwrap_or(0);
    let mut path = root.join(format!("{}-{}", host, port));
    // URI paths always lead with '/', which PathBuf::join would treat as
    // absolute; push segments instead
    for segment in remote_path.split('/').filter(|s| !s.is_empty()) {
        path.push(segment);
    }

    if path.extension().is_none() {
        if let Some(media) = media_type {
            let subtype = media.rsplit('/').next().unwrap_or(media);
            path.set_extension(subtype);
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_host_and_port_directory() {
        let path = local_path(
            Path::new("out"),
            &location("http://example.com:8080/a/b.html"),
            None,
        );
        assert_eq!(path, Path::new("out/example.com-8080/a/b.html"));
    }

    #[test]
    fn test_default_port_is_explicit() {
        let path = local_path(Path::new("out"), &location("http://example.com/x.txt"), None);
        assert_eq!(path, Path::new("out/example.com-80/x.txt"));

        let path = local_path(
            Path::new("out"),
            &location("https://example.com/x.txt"),
            None,
        );
        assert_eq!(path, Path::new("out/example.com-443/x.txt"));
    }

    #[test]
    fn test_root_path_gets_index() {
        let path = local_path(Path::new("out"), &location("http://example.com/"), None);
        assert_eq!(path, Path::new("out/example.com-80/index"));
    }

    #[test]
    fn test_trailing_slash_gets_index() {
        let path = local_path(Path::new("out"), &location("http://example.com/docs/"), None);
        assert_eq!(path, Path::new("out/example.com-80/docs/index"));
    }

    #[test]
    fn test_media_type_supplies_missing_extension() {
        let path = local_path(
            Path::new("out"),
            &location("http://example.com/"),
            Some("text/html"),
        );
        assert_eq!(path, Path::new("out/example.com-80/index.html"));
    }

    #[test]
    fn test_existing_extension_is_kept() {
        let path = local_path(
            Path::new("out"),
            &location("http://example.com/logo.png"),
            Some("image/webp"),
        );
        assert_eq!(path, Path::new("out/example.com-80/logo.png"));
    }

    #[test]
    fn test_no_extension_and_no_media_type() {
        let path = local_path(Path::new("out"), &location("http://example.com/blob"), None);
        assert_eq!(path, Path::new("out/example.com-80/blob"));
    }
}
