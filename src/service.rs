use std::{future::Future, pin::Pin, sync::Arc};

use http::{Request, Response};
use hyper::body::Bytes;

use crate::resolve::resolve_path;
use crate::response_builder::ResponseBuilder;
use crate::store::ObjectStore;
use crate::util::{Body, DEFAULT_INDEX_DOCUMENT};

/// High-level interface for serving static content from an object store.
///
/// Each request path is mapped onto an object key: a single leading slash is stripped, and paths
/// ending in a slash get the index document name appended. The object under that key is
/// returned with a content type guessed from its extension, unless the store holds metadata
/// overriding it. Missing objects and failed lookups are both answered with a 404 document.
/// `/robots.txt` is answered with a fixed document that disallows all crawling.
///
/// This struct allows direct access to its fields, but these fields are typically initialized by
/// the accessors, using the builder pattern. The fields are basically a bunch of settings that
/// determine the response details.
///
/// This struct also implements the `hyper::Service` trait, which simply wraps
/// `StaticObjects::serve`. Cloning is cheap; clones share the store.
pub struct StaticObjects<S> {
    /// The store objects are looked up in.
    pub store: Arc<S>,
    /// Object name appended to directory requests.
    pub index_document: String,
    /// Document sent with every 404 response.
    pub not_found_document: Option<Bytes>,
}

impl<S> StaticObjects<S> {
    /// Create a new instance of `StaticObjects` serving from the given store.
    pub fn new(store: S) -> Self {
        Self::with_store(Arc::new(store))
    }

    /// Create a new instance of `StaticObjects` serving from a shared store.
    pub fn with_store(store: Arc<S>) -> Self {
        Self {
            store,
            index_document: DEFAULT_INDEX_DOCUMENT.to_owned(),
            not_found_document: None,
        }
    }

    /// Set the object name appended to paths ending in a slash. Defaults to `index.html`.
    pub fn index_document(&mut self, value: impl Into<String>) -> &mut Self {
        self.index_document = value.into();
        self
    }

    /// Set the document sent with 404 responses. Defaults to a built-in page.
    pub fn not_found_document(&mut self, value: impl Into<Bytes>) -> &mut Self {
        self.not_found_document = Some(value.into());
        self
    }

    fn response_builder(&self) -> ResponseBuilder {
        let mut builder = ResponseBuilder::new();
        if let Some(ref document) = self.not_found_document {
            builder.not_found_document(document.clone());
        }
        builder
    }
}

impl<S: ObjectStore> StaticObjects<S> {
    /// Serve a request.
    ///
    /// Only the request path is consulted. The only error is a failure to assemble the response.
    pub async fn serve<B>(&self, request: Request<B>) -> http::Result<Response<Body<S::Body>>> {
        let (parts, _) = request.into_parts();
        let result =
            resolve_path(self.store.as_ref(), parts.uri.path(), &self.index_document).await;
        self.response_builder().build(result)
    }
}

impl<S> Clone for StaticObjects<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            index_document: self.index_document.clone(),
            not_found_document: self.not_found_document.clone(),
        }
    }
}

impl<S, B> hyper::service::Service<Request<B>> for StaticObjects<S>
where
    S: ObjectStore + Send + Sync + 'static,
    S::Future: Send,
    S::Body: Send,
    B: Send + 'static,
{
    type Response = Response<Body<S::Body>>;
    type Error = http::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, request: Request<B>) -> Self::Future {
        let cloned = self.clone();
        Box::pin(async move { cloned.serve(request).await })
    }
}
