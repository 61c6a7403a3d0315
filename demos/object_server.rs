// This example serves a directory as if it were an object store bucket.
//
// Run `cargo run --example object_server -- --root path/to/site`, then
// point your browser to http://localhost:3000/

use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;
use hyper::server::conn::http1;
use hyper_staticobject::{DirStore, MemoryStore, StaticObjects};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// Serve static content from a directory-backed object store.
#[derive(Debug, Parser)]
struct Args {
    /// Directory holding the objects, keyed by relative path.
    #[arg(long, default_value = ".")]
    root: PathBuf,
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:3000")]
    listen: SocketAddr,
    /// Load every object into memory at startup instead of reading on each request.
    #[arg(long)]
    preload: bool,
    /// Object served for paths ending in a slash.
    #[arg(long, default_value = hyper_staticobject::DEFAULT_INDEX_DOCUMENT)]
    index: String,
}

async fn serve<S>(listener: TcpListener, static_: StaticObjects<S>) -> std::io::Result<()>
where
    S: hyper_staticobject::ObjectStore + Send + Sync + 'static,
    S::Future: Send,
    S::Body: tokio::io::AsyncRead + Send + Unpin + 'static,
{
    loop {
        let (stream, peer) = listener.accept().await?;
        let static_ = static_.clone();
        tokio::spawn(async move {
            if let Err(err) = http1::Builder::new()
                .serve_connection(TokioIo::new(stream), static_)
                .await
            {
                tracing::warn!(peer = %peer, error = %err, "Connection error");
            }
        });
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let listener = TcpListener::bind(args.listen).await?;
    tracing::info!(
        root = %args.root.display(),
        addr = %listener.local_addr()?,
        preload = args.preload,
        "Object server running"
    );

    if args.preload {
        let mut static_ = StaticObjects::new(MemoryStore::from_dir(&args.root).await?);
        static_.index_document(args.index);
        serve(listener, static_).await
    } else {
        let mut static_ = StaticObjects::new(DirStore::new(args.root));
        static_.index_document(args.index);
        serve(listener, static_).await
    }
}
