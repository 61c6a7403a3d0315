use http::response::Builder as HttpResponseBuilder;
use http::{header, HeaderValue, Response, Result, StatusCode};
use hyper::body::Bytes;

use crate::resolve::{ResolveResult, ResolvedObject};
use crate::util::{Body, ObjectBytesStream};

/// Body of the robots exclusion document.
pub const ROBOTS_TXT: &str = "Disallow: /\n";

/// Content type of the robots exclusion document.
pub const ROBOTS_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Content type of the not-found document.
pub const NOT_FOUND_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// The default not-found document.
pub const NOT_FOUND_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
	<meta charset="UTF-8">
	<meta name="viewport" content="width=device-width, initial-scale=1.0">
	<title>404 - Not Found</title>
	<link rel="stylesheet" href="/styles.css" />
</head>
<body>
	<main class="flex-1 container mx-auto px-4 py-8 max-w-7xl">
		<div class="hero min-h-[50vh] bg-base-200 rounded-box mb-8">
		<div class="hero-content text-center">
			<div class="max-w-md">
				<h1 class="text-5xl font-bold">404</h1>
				<p class="text-xl mt-4 mb-4">Page not found</p>
				<a href="/" class="btn btn-primary">Go home</a>
			</div>
		</div>
		</div>
	</main>
</body>
</html>"#;

/// Utility to build the default response for a resolved request.
///
/// This is typically a short-lived, per-request instance.
#[derive(Clone, Debug)]
pub struct ResponseBuilder {
    /// Document sent with every 404 response.
    pub not_found_document: Bytes,
}

impl Default for ResponseBuilder {
    fn default() -> Self {
        Self {
            not_found_document: Bytes::from_static(NOT_FOUND_HTML.as_bytes()),
        }
    }
}

impl ResponseBuilder {
    /// Create a new response builder with a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different document for 404 responses. It is always sent as HTML.
    pub fn not_found_document(&mut self, value: impl Into<Bytes>) -> &mut Self {
        self.not_found_document = value.into();
        self
    }

    /// Build a response for the given `resolve` result.
    pub fn build<B>(&self, result: ResolveResult<B>) -> Result<Response<Body<B>>> {
        match result {
            ResolveResult::Robots => HttpResponseBuilder::new()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, ROBOTS_CONTENT_TYPE)
                .body(Body::fixed(ROBOTS_TXT)),
            ResolveResult::NotFound => HttpResponseBuilder::new()
                .status(StatusCode::NOT_FOUND)
                .header(header::CONTENT_TYPE, NOT_FOUND_CONTENT_TYPE)
                .body(Body::Fixed(Some(self.not_found_document.clone()))),
            ResolveResult::Found(resolved) => build_object_response(resolved),
        }
    }
}

/// Parse a stored metadata value as a header value.
///
/// Empty values count as unset. Values that are not valid in a header are logged and dropped.
fn stored_header_value(key: &str, name: &str, value: Option<&str>) -> Option<HeaderValue> {
    let value = value.filter(|v| !v.is_empty())?;
    match HeaderValue::from_str(value) {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(
                target: crate::TRACING_TARGET,
                key = %key,
                metadata = %name,
                value = ?value,
                "Ignoring stored metadata that is not a valid header value"
            );
            None
        }
    }
}

/// Build the 200 response for an object found in the store.
fn build_object_response<B>(resolved: ResolvedObject<B>) -> Result<Response<Body<B>>> {
    let ResolvedObject {
        key,
        object,
        content_type,
    } = resolved;
    let metadata = object.http_metadata.unwrap_or_default();

    let content_type = stored_header_value(
        key.as_str(),
        "content-type",
        metadata.content_type.as_deref(),
    )
    .unwrap_or_else(|| HeaderValue::from_static(content_type));

    let mut res = HttpResponseBuilder::new()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type);

    if let Some(cache_control) = stored_header_value(
        key.as_str(),
        "cache-control",
        metadata.cache_control.as_deref(),
    ) {
        res = res.header(header::CACHE_CONTROL, cache_control);
    }

    if let Some(size) = object.size {
        res = res.header(header::CONTENT_LENGTH, size);
    }

    res.body(Body::Object(ObjectBytesStream::new(object.body)))
}
