use std::{
    io::{Cursor, Error as IoError},
    pin::Pin,
    task::{ready, Context, Poll},
};

use futures_util::stream::Stream;
use hyper::body::{Bytes, Frame, SizeHint};
use tokio::io::AsyncRead;

use crate::util::ObjectBytesStream;

/// Hyper Body implementation for the responses produced by this crate.
pub enum Body<R = Cursor<Bytes>> {
    /// A fixed document held in memory, such as the robots or not-found documents.
    Fixed(Option<Bytes>),
    /// A stored object, streamed from the store.
    Object(ObjectBytesStream<R>),
}

impl<R> Body<R> {
    /// Create a body for a fixed in-memory document.
    pub fn fixed(data: impl Into<Bytes>) -> Self {
        Body::Fixed(Some(data.into()))
    }
}

impl<R> hyper::body::Body for Body<R>
where
    R: AsyncRead + Unpin,
{
    type Data = Bytes;
    type Error = IoError;

    fn poll_frame(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Bytes>, IoError>>> {
        let opt = ready!(match *self {
            Body::Fixed(ref mut data) => {
                return Poll::Ready(data.take().map(|data| Ok(Frame::data(data))))
            }
            Body::Object(ref mut stream) => Pin::new(stream).poll_next(cx),
        });
        Poll::Ready(opt.map(|res| res.map(Frame::data)))
    }

    fn is_end_stream(&self) -> bool {
        match *self {
            Body::Fixed(ref data) => data.is_none(),
            Body::Object(_) => false,
        }
    }

    fn size_hint(&self) -> SizeHint {
        match *self {
            Body::Fixed(ref data) => {
                SizeHint::with_exact(data.as_ref().map_or(0, |data| data.len() as u64))
            }
            Body::Object(_) => SizeHint::default(),
        }
    }
}
