use std::{
    collections::{HashMap, HashSet},
    fs::File as StdFile,
    future::Future,
    io::{Cursor, Error as IoError, ErrorKind},
    path::{Component, Path, PathBuf},
    pin::Pin,
    task::{Context, Poll},
};

use futures_util::future::{ready, Ready};
use hyper::body::Bytes;
use tokio::{
    fs::{self, File},
    task::{spawn_blocking, JoinHandle},
};

use crate::error::{StoreError, StoreResult};

/// HTTP metadata stored alongside an object.
///
/// Values set here take precedence over what the responder would derive itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpMetadata {
    /// Stored `Content-Type`, overriding the type guessed from the key's extension.
    pub content_type: Option<String>,
    /// Stored `Cache-Control`, passed through verbatim.
    pub cache_control: Option<String>,
}

impl HttpMetadata {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stored content type.
    pub fn content_type(mut self, value: impl Into<String>) -> Self {
        self.content_type = Some(value.into());
        self
    }

    /// Set the stored cache control directive.
    pub fn cache_control(mut self, value: impl Into<String>) -> Self {
        self.cache_control = Some(value.into());
        self
    }
}

/// An object returned by an `ObjectStore` lookup.
#[derive(Debug)]
pub struct StoredObject<B = Cursor<Bytes>> {
    /// Readable object payload.
    pub body: B,
    /// Size of the payload in bytes, if the store knows it.
    pub size: Option<u64>,
    /// Optional HTTP metadata stored with the object.
    pub http_metadata: Option<HttpMetadata>,
}

/// Trait for a read-only key-value object store.
///
/// There is only the `get` operation. A missing object is `Ok(None)`; `Err` is reserved for
/// failures of the lookup itself.
///
/// In order to use an implementation with `StaticObjects`, it must be marked `Send` and `Sync`,
/// and must have `'static` lifetime.
pub trait ObjectStore {
    /// Object payload type.
    ///
    /// In order to stream payloads in responses, this must implement `AsyncRead`, must be marked
    /// `Send` and `Unpin`, and have `'static` lifetime.
    type Body;

    /// Future type that `get` returns.
    ///
    /// This future must be marked `Send` in order to be used with `StaticObjects`.
    type Future: Future<Output = StoreResult<Option<StoredObject<Self::Body>>>>;

    /// Look up the object stored under `key`.
    fn get(&self, key: &str) -> Self::Future;
}

#[derive(Debug)]
struct MemoryObject {
    data: Bytes,
    http_metadata: Option<HttpMetadata>,
}

/// An in-memory object store.
///
/// Useful for tests, and for serving a small site that is loaded once at startup.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: HashMap<String, MemoryObject>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize a `MemoryStore` from a directory.
    ///
    /// This loads all files and their contents into memory, keyed by their `/`-separated path
    /// relative to `path`. Symlinks are followed, but each directory is scanned only once, so a
    /// symlink cycle ends at its first repetition. Dangling symlinks are skipped.
    pub async fn from_dir(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let mut store = Self::default();
        let mut scanned = HashSet::new();

        // Pending directories to scan, as: `(real path, key prefix)`
        let mut dirs = vec![(path.as_ref().to_path_buf(), String::new())];
        while let Some((dir, prefix)) = dirs.pop() {
            if !scanned.insert(fs::canonicalize(&dir).await?) {
                continue;
            }

            let mut iter = fs::read_dir(dir).await?;
            while let Some(entry) = iter.next_entry().await? {
                let metadata = match fs::metadata(entry.path()).await {
                    Ok(metadata) => metadata,
                    Err(err) if err.kind() == ErrorKind::NotFound => continue,
                    Err(err) => return Err(err),
                };
                let key = format!("{}{}", prefix, entry.file_name().to_string_lossy());

                if metadata.is_dir() {
                    dirs.push((entry.path(), format!("{key}/")));
                } else if metadata.is_file() {
                    let data = fs::read(entry.path()).await?;
                    store.insert(key, data);
                }
            }
        }

        tracing::debug!(
            target: crate::TRACING_TARGET,
            root = %path.as_ref().display(),
            objects = store.len(),
            "Loaded objects from directory"
        );

        Ok(store)
    }

    /// Add an object without metadata. An existing object under the same key is replaced.
    pub fn insert(&mut self, key: impl Into<String>, data: impl Into<Bytes>) -> &mut Self {
        self.objects.insert(
            key.into(),
            MemoryObject {
                data: data.into(),
                http_metadata: None,
            },
        );
        self
    }

    /// Add an object with HTTP metadata. An existing object under the same key is replaced.
    pub fn insert_with_metadata(
        &mut self,
        key: impl Into<String>,
        data: impl Into<Bytes>,
        http_metadata: HttpMetadata,
    ) -> &mut Self {
        self.objects.insert(
            key.into(),
            MemoryObject {
                data: data.into(),
                http_metadata: Some(http_metadata),
            },
        );
        self
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the store holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl ObjectStore for MemoryStore {
    type Body = Cursor<Bytes>;
    type Future = Ready<StoreResult<Option<StoredObject<Self::Body>>>>;

    fn get(&self, key: &str) -> Self::Future {
        ready(Ok(self.objects.get(key).map(|object| StoredObject {
            body: Cursor::new(object.data.clone()),
            size: Some(object.data.len() as u64),
            http_metadata: object.http_metadata.clone(),
        })))
    }
}

/// Object store backed by a local directory, using `tokio::fs`.
///
/// Keys are mapped onto the filesystem by splitting them on `/` below `root`. Keys that would
/// leave the root, or that name a directory or a missing file, are reported as missing. Objects
/// carry no HTTP metadata.
#[derive(Clone, Debug)]
pub struct DirStore {
    /// The root directory to serve objects from.
    ///
    /// The path may be absolute or relative.
    pub root: PathBuf,
}

impl DirStore {
    /// Create a new `DirStore` for the given root path.
    ///
    /// The path may be absolute or relative.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

/// Whether a key stays below the root when treated as a relative path.
///
/// Also rejects components that parse as something else on their own, such as a Windows drive
/// letter in `/anypath/c:/windows/win.ini`.
fn is_contained(key: &str) -> bool {
    Path::new(key)
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
}

/// Lookup errors that just mean the object isn't there.
fn is_missing(err: &IoError) -> bool {
    matches!(err.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory)
}

impl ObjectStore for DirStore {
    type Body = File;
    type Future = DirStoreFuture;

    fn get(&self, key: &str) -> Self::Future {
        if !is_contained(key) {
            return DirStoreFuture { inner: None };
        }

        let mut full_path = self.root.clone();
        full_path.extend(key.split('/').filter(|segment| !segment.is_empty()));

        // Open + metadata in one blocking task, instead of two round trips through tokio.
        let inner = spawn_blocking(move || {
            let handle = match StdFile::open(&full_path) {
                Ok(handle) => handle,
                Err(err) if is_missing(&err) => return Ok(None),
                Err(err) => return Err(err),
            };
            let metadata = handle.metadata()?;
            if metadata.is_dir() {
                return Ok(None);
            }
            Ok(Some(StoredObject {
                body: File::from_std(handle),
                size: Some(metadata.len()),
                http_metadata: None,
            }))
        });

        DirStoreFuture { inner: Some(inner) }
    }
}

/// Future type produced by `DirStore`.
///
/// This type mostly exists just to prevent a `Box<dyn Future>`.
pub struct DirStoreFuture {
    inner: Option<JoinHandle<Result<Option<StoredObject<File>>, IoError>>>,
}

impl Future for DirStoreFuture {
    type Output = StoreResult<Option<StoredObject<File>>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let Some(inner) = self.inner.as_mut() else {
            return Poll::Ready(Ok(None));
        };
        // The `JoinHandle` error is mapped to an IO error, so that the results flatten.
        match Pin::new(inner).poll(cx) {
            Poll::Ready(Ok(res)) => Poll::Ready(res.map_err(StoreError::from)),
            Poll::Ready(Err(_)) => Poll::Ready(Err(StoreError::from(IoError::new(
                ErrorKind::Other,
                "background task failed",
            )))),
            Poll::Pending => Poll::Pending,
        }
    }
}

#[cfg(feature = "opendal")]
pub use self::opendal_store::{OpendalBody, OpendalStore};

#[cfg(feature = "opendal")]
mod opendal_store {
    use std::{future::Future, pin::Pin};

    use opendal::{ErrorKind, Operator};
    use tokio::io::AsyncRead;
    use tokio_util::compat::FuturesAsyncReadCompatExt;

    use super::{HttpMetadata, ObjectStore, StoredObject};
    use crate::error::StoreResult;

    /// Payload of an object read through OpenDAL.
    pub type OpendalBody = Pin<Box<dyn AsyncRead + Send>>;

    /// Object store backed by an OpenDAL `Operator`.
    ///
    /// This reaches any service OpenDAL supports, such as S3, R2 or GCS. Payloads are streamed
    /// from the backend as the response body is polled. The stored `content_type` and
    /// `cache_control` of each object become its `HttpMetadata`.
    #[derive(Clone, Debug)]
    pub struct OpendalStore {
        operator: Operator,
    }

    impl OpendalStore {
        /// Create a store reading through the given operator.
        pub fn new(operator: Operator) -> Self {
            Self { operator }
        }
    }

    impl ObjectStore for OpendalStore {
        type Body = OpendalBody;
        type Future =
            Pin<Box<dyn Future<Output = StoreResult<Option<StoredObject<Self::Body>>>> + Send>>;

        fn get(&self, key: &str) -> Self::Future {
            let operator = self.operator.clone();
            let key = key.to_owned();
            Box::pin(async move {
                let meta = match operator.stat(&key).await {
                    Ok(meta) => meta,
                    Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
                    Err(err) => return Err(err.into()),
                };
                if meta.is_dir() {
                    return Ok(None);
                }

                let size = meta.content_length();
                let reader = match operator.reader(&key).await {
                    Ok(reader) => reader,
                    Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
                    Err(err) => return Err(err.into()),
                };
                let body: OpendalBody =
                    Box::pin(reader.into_futures_async_read(0..size).await?.compat());

                let http_metadata = match (meta.content_type(), meta.cache_control()) {
                    (None, None) => None,
                    (content_type, cache_control) => Some(HttpMetadata {
                        content_type: content_type.map(str::to_owned),
                        cache_control: cache_control.map(str::to_owned),
                    }),
                };

                Ok(Some(StoredObject {
                    body,
                    size: Some(size),
                    http_metadata,
                }))
            })
        }
    }
}
