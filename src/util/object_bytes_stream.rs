use std::{
    io::Error as IoError,
    mem::MaybeUninit,
    pin::Pin,
    task::{Context, Poll},
};

use futures_util::stream::Stream;
use hyper::body::Bytes;
use tokio::io::{AsyncRead, ReadBuf};

const BUF_SIZE: usize = 8 * 1024;

/// Wraps the `AsyncRead` body of a stored object, and implements a stream of `Bytes`s.
///
/// The object is passed through unmodified, in chunks of at most 8 KiB.
pub struct ObjectBytesStream<R> {
    reader: R,
    buf: Box<[MaybeUninit<u8>; BUF_SIZE]>,
    done: bool,
}

impl<R> ObjectBytesStream<R> {
    /// Create a new stream from the given object body.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Box::new([MaybeUninit::uninit(); BUF_SIZE]),
            done: false,
        }
    }
}

impl<R> Stream for ObjectBytesStream<R>
where
    R: AsyncRead + Unpin,
{
    type Item = Result<Bytes, IoError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context) -> Poll<Option<Self::Item>> {
        let Self {
            ref mut reader,
            ref mut buf,
            ref mut done,
        } = *self;

        if *done {
            return Poll::Ready(None);
        }

        let mut read_buf = ReadBuf::uninit(&mut buf[..]);
        match Pin::new(reader).poll_read(cx, &mut read_buf) {
            Poll::Ready(Ok(())) => {
                let filled = read_buf.filled();
                if filled.is_empty() {
                    *done = true;
                    Poll::Ready(None)
                } else {
                    Poll::Ready(Some(Ok(Bytes::copy_from_slice(filled))))
                }
            }
            Poll::Ready(Err(e)) => {
                *done = true;
                Poll::Ready(Some(Err(e)))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
