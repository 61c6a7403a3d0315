/// Content type for objects whose extension is unknown or missing.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Extension to content type table. Extensions are lowercase.
static CONTENT_TYPES: &[(&str, &str)] = &[
    ("html", "text/html; charset=utf-8"),
    ("css", "text/css; charset=utf-8"),
    ("js", "application/javascript; charset=utf-8"),
    ("json", "application/json; charset=utf-8"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("svg", "image/svg+xml"),
    ("webp", "image/webp"),
    ("ico", "image/x-icon"),
    ("txt", "text/plain; charset=utf-8"),
    ("xml", "application/xml; charset=utf-8"),
    ("pdf", "application/pdf"),
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
    ("ttf", "font/ttf"),
    ("otf", "font/otf"),
];

/// Guess the content type of an object from the extension of its key.
///
/// The extension is whatever follows the last `.` in the key, compared case-insensitively. A key
/// without a dot is treated as an extension in its own right, so `html` maps like `x.html`.
pub fn content_type_for_key(key: &str) -> &'static str {
    let extension = match key.rfind('.') {
        Some(pos) => &key[pos + 1..],
        None => key,
    };
    CONTENT_TYPES
        .iter()
        .find(|(ext, _)| ext.eq_ignore_ascii_case(extension))
        .map_or(OCTET_STREAM, |(_, content_type)| content_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_extensions() {
        assert_eq!(content_type_for_key("index.html"), "text/html; charset=utf-8");
        assert_eq!(content_type_for_key("styles.css"), "text/css; charset=utf-8");
        assert_eq!(content_type_for_key("img/photo.png"), "image/png");
        assert_eq!(content_type_for_key("a.jpg"), "image/jpeg");
        assert_eq!(content_type_for_key("a.jpeg"), "image/jpeg");
        assert_eq!(content_type_for_key("fonts/inter.woff2"), "font/woff2");
        assert_eq!(content_type_for_key("feed.xml"), "application/xml; charset=utf-8");
    }

    #[test]
    fn last_segment_wins_case_insensitively() {
        assert_eq!(content_type_for_key("a.b.TXT"), "text/plain; charset=utf-8");
        assert_eq!(content_type_for_key("archive.pdf.png"), "image/png");
        assert_eq!(content_type_for_key("LOGO.SVG"), "image/svg+xml");
    }

    #[test]
    fn falls_back_to_octet_stream() {
        assert_eq!(content_type_for_key("noext"), OCTET_STREAM);
        assert_eq!(content_type_for_key(""), OCTET_STREAM);
        assert_eq!(content_type_for_key("trailing."), OCTET_STREAM);
        assert_eq!(content_type_for_key("data.bin"), OCTET_STREAM);
        assert_eq!(content_type_for_key("dir.d/file"), OCTET_STREAM);
    }

    #[test]
    fn bare_extension_key_is_looked_up() {
        assert_eq!(content_type_for_key("css"), "text/css; charset=utf-8");
    }

    #[test]
    fn never_returns_empty() {
        for key in ["", ".", "..", "a.", ".html", "x.y.z", "ünïcode.ПНГ"] {
            assert!(!content_type_for_key(key).is_empty());
        }
    }
}
