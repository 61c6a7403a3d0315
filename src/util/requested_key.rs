use std::fmt;

/// The request path that is answered with the robots exclusion document.
pub const ROBOTS_PATH: &str = "/robots.txt";

/// Default document served for directory requests (paths ending in a slash).
pub const DEFAULT_INDEX_DOCUMENT: &str = "index.html";

/// Key of an object in the object store.
///
/// Keys derived from absolute request paths never start with a slash.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Borrow the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the key, returning the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for ObjectKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a request path maps to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestedKey {
    /// The robots exclusion path, answered without touching the store.
    Robots,
    /// An object lookup for the given key.
    Object(ObjectKey),
}

impl RequestedKey {
    /// Map a request path onto an object key.
    ///
    /// Paths ending in a slash get `index` appended, then a single leading slash is stripped.
    /// Keys are opaque to the store, so no percent-decoding or dot-segment folding happens here.
    /// A path without a leading slash is passed through as-is.
    pub fn resolve(request_path: &str, index: &str) -> Self {
        if request_path == ROBOTS_PATH {
            return RequestedKey::Robots;
        }

        let mut key = String::with_capacity(request_path.len() + index.len());
        key.push_str(request_path.strip_prefix('/').unwrap_or(request_path));
        if request_path.ends_with('/') {
            key.push_str(index);
        }

        RequestedKey::Object(ObjectKey(key))
    }
}
