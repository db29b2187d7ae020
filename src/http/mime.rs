//! Content-type sniffing by file suffix.

use std::path::Path;

pub const DEFAULT_MIME: &str = "application/octet-stream";

/// Maps a file name to its content type. Suffix matching ignores case.
///
/// ```
/// # use paramserve::http::mime::content_type_for;
/// assert_eq!(content_type_for("index.HTML"), "text/html");
/// assert_eq!(content_type_for("archive.tar"), "application/octet-stream");
/// ```
pub fn content_type_for(file_name: impl AsRef<Path>) -> &'static str {
    let ext = file_name
        .as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("html") => "text/html",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("ico") => "image/x-icon",
        Some("bmp") => "image/bmp",
        _ => DEFAULT_MIME,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_suffixes() {
        assert_eq!(content_type_for("a/b/photo.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("photo.JPG"), "image/jpeg");
        assert_eq!(content_type_for("favicon.ico"), "image/x-icon");
        assert_eq!(content_type_for("x.bmp"), "image/bmp");
    }

    #[test]
    fn no_suffix_is_octet_stream() {
        assert_eq!(content_type_for("README"), DEFAULT_MIME);
    }
}
