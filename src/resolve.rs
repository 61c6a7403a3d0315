use http::Request;

use crate::store::{ObjectStore, StoredObject};
use crate::util::{content_type_for_key, ObjectKey, RequestedKey, DEFAULT_INDEX_DOCUMENT};

/// An object found in the store, ready to be served.
#[derive(Debug)]
pub struct ResolvedObject<B> {
    /// The key the object was found under.
    pub key: ObjectKey,
    /// The stored object.
    pub object: StoredObject<B>,
    /// Content type derived from the key's extension.
    ///
    /// Stored metadata, if any, overrides this when the response is built.
    pub content_type: &'static str,
}

/// The result of `resolve`.
///
/// A lookup has two outcomes, found or not found, plus the robots route which never reaches the
/// store. Store failures are folded into `NotFound`.
#[derive(Debug)]
pub enum ResolveResult<B> {
    /// The robots exclusion path was requested.
    Robots,
    /// No object exists for the request, or the lookup failed.
    NotFound,
    /// The requested object was found.
    Found(ResolvedObject<B>),
}

/// Resolve the request by looking up its path in the given store.
///
/// Only the URI path is consulted; the method, headers and body are ignored. Directory requests
/// (paths ending in a slash) resolve to `index.html` within that directory.
pub async fn resolve<S, B>(store: &S, req: &Request<B>) -> ResolveResult<S::Body>
where
    S: ObjectStore + ?Sized,
{
    resolve_path(store, req.uri().path(), DEFAULT_INDEX_DOCUMENT).await
}

/// Resolve the request path by looking it up in the given store.
///
/// Paths ending in a slash have `index` appended. A failed lookup is logged and reported as
/// `NotFound`; it is never retried.
pub async fn resolve_path<S>(store: &S, request_path: &str, index: &str) -> ResolveResult<S::Body>
where
    S: ObjectStore + ?Sized,
{
    let key = match RequestedKey::resolve(request_path, index) {
        RequestedKey::Robots => return ResolveResult::Robots,
        RequestedKey::Object(key) => key,
    };

    match store.get(key.as_str()).await {
        Ok(Some(object)) => {
            tracing::debug!(target: crate::TRACING_TARGET, key = %key, "Object found");
            let content_type = content_type_for_key(key.as_str());
            ResolveResult::Found(ResolvedObject {
                key,
                object,
                content_type,
            })
        }
        Ok(None) => {
            tracing::debug!(target: crate::TRACING_TARGET, key = %key, "Object not found");
            ResolveResult::NotFound
        }
        Err(err) => {
            tracing::error!(
                target: crate::TRACING_TARGET,
                key = %key,
                error = %err,
                "Error fetching object from store"
            );
            ResolveResult::NotFound
        }
    }
}
