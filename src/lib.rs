#![crate_name = "hyper_staticobject"]
#![deny(missing_docs)]

//! Static content serving from an object store, for [Hyper 1.0](https://github.com/hyperium/hyper).
//!
//! This library exports a high-level interface `StaticObjects` for simple serving, and
//! lower-level interfaces for more control over responses.
//!
//! ## Basic usage
//!
//! The `StaticObjects` type is essentially a struct holding an object store and some settings,
//! and a `serve` method to handle the request. It follows the builder pattern, and also
//! implements the `hyper::Service` trait. It can be used as:
//!
//! ```rust
//! use hyper_staticobject::{MemoryStore, StaticObjects};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut store = MemoryStore::new();
//!     store.insert("index.html", "<h1>hello</h1>");
//!
//!     // Instance of `StaticObjects` containing the store and configuration.
//!     let static_ = StaticObjects::new(store);
//!
//!     // A dummy request, but normally obtained from Hyper.
//!     let request = http::Request::get("/").body(()).unwrap();
//!
//!     // Serve the request.
//!     let response = static_.serve(request).await.unwrap();
//!     assert_eq!(response.status(), http::StatusCode::OK);
//! }
//! ```
//!
//! Typically, you'd store the `StaticObjects` instance somewhere, such as in your own
//! `hyper::Service` implementation.
//!
//! ## Advanced usage
//!
//! The `StaticObjects` type is a simple wrapper for `resolve` and `ResponseBuilder`. You can
//! achieve the same by doing something similar to the following:
//!
//! ```rust
//! use hyper_staticobject::{resolve, DirStore, ResponseBuilder};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = DirStore::new("my/site/root/");
//!
//!     // A dummy request, but normally obtained from Hyper.
//!     let request = http::Request::get("/posts/").body(()).unwrap();
//!
//!     // First, resolve the request against the store.
//!     let result = resolve(&store, &request).await;
//!
//!     // Then, build a response based on the result.
//!     let response = ResponseBuilder::new().build(result).unwrap();
//!     assert_eq!(response.status(), http::StatusCode::NOT_FOUND);
//! }
//! ```
//!
//! The `resolve` function maps the request path onto an object key, looks it up, and returns a
//! `ResolveResult` describing what kind of response should be sent. Lookup failures are logged
//! through `tracing` and reported as `NotFound`, so clients never see store errors. It's useful
//! to sit between these two steps to handle extra routes, for example.
//!
//! Stores implement the `ObjectStore` trait. This crate ships `MemoryStore`, `DirStore`, and,
//! with the `opendal` feature, `OpendalStore` for any OpenDAL backend such as S3 or R2.

mod error;
mod resolve;
mod response_builder;
mod service;
mod store;
mod util;

pub use crate::error::*;
pub use crate::resolve::*;
pub use crate::response_builder::*;
pub use crate::service::*;
pub use crate::store::*;
pub use crate::util::{
    content_type_for_key, Body, ObjectBytesStream, ObjectKey, RequestedKey,
    DEFAULT_INDEX_DOCUMENT, OCTET_STREAM, ROBOTS_PATH,
};

/// Tracing target used for all log events emitted by this crate.
pub const TRACING_TARGET: &str = "hyper_staticobject";
