//! Response body, a lazy sequence of byte chunks.

use std::collections::VecDeque;
use std::fmt::{self, Debug, Formatter};
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_util::stream::{BoxStream, Stream, StreamExt};
use http_body_util::BodyExt;
use hyper::body::{Body, Frame, SizeHint};

use crate::BoxedError;

/// Response body type.
///
/// Concatenating the chunks in emission order reconstructs the full body;
/// chunk boundaries carry no meaning of their own.
#[non_exhaustive]
pub enum ResBody {
    /// No body.
    None,
    /// Once bytes body.
    Once(Bytes),
    /// Chunks body.
    Chunks(VecDeque<Bytes>),
    /// Stream body.
    Stream(BoxStream<'static, Result<Bytes, BoxedError>>),
    /// A body whose stream already failed. Draining it reports the same
    /// failure again instead of an empty body.
    Error(String),
}

impl ResBody {
    /// Creates a chunked body from the given chunk buffers.
    pub fn chunks<I, T>(chunks: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Bytes>,
    {
        Self::Chunks(chunks.into_iter().map(Into::into).collect())
    }

    /// Creates a streaming body from a fallible chunk stream.
    pub fn stream<S, O, E>(stream: S) -> Self
    where
        S: Stream<Item = Result<O, E>> + Send + 'static,
        O: Into<Bytes> + 'static,
        E: Into<BoxedError> + 'static,
    {
        let stream = stream.map(|chunk| chunk.map(Into::into).map_err(Into::into));
        Self::Stream(Box::pin(stream))
    }

    /// Wraps any [`Body`] implementation as a streaming body.
    pub fn from_body<B>(body: B) -> Self
    where
        B: Body<Data = Bytes> + Send + 'static,
        B::Error: Into<BoxedError> + 'static,
    {
        Self::stream(body.into_data_stream())
    }

    /// Check is that body is not set.
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(*self, Self::None)
    }

    /// Check is that body is once.
    #[inline]
    pub fn is_once(&self) -> bool {
        matches!(*self, Self::Once(_))
    }

    /// Check is that body is chunks.
    #[inline]
    pub fn is_chunks(&self) -> bool {
        matches!(*self, Self::Chunks(_))
    }

    /// Check is that body is stream.
    #[inline]
    pub fn is_stream(&self) -> bool {
        matches!(*self, Self::Stream(_))
    }

    /// Check is that body is a recorded stream failure.
    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(*self, Self::Error(_))
    }

    /// Get body's size, if it is known up front.
    #[inline]
    pub fn size(&self) -> Option<u64> {
        match self {
            Self::None => Some(0),
            Self::Once(bytes) => Some(bytes.len() as u64),
            Self::Chunks(chunks) => Some(chunks.iter().map(|bytes| bytes.len() as u64).sum()),
            Self::Stream(_) | Self::Error(_) => None,
        }
    }
}

impl Default for ResBody {
    #[inline]
    fn default() -> Self {
        Self::None
    }
}

impl Stream for ResBody {
    type Item = Result<Bytes, BoxedError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match self.get_mut() {
            Self::None => Poll::Ready(None),
            Self::Once(bytes) => {
                if bytes.is_empty() {
                    Poll::Ready(None)
                } else {
                    let bytes = std::mem::replace(bytes, Bytes::new());
                    Poll::Ready(Some(Ok(bytes)))
                }
            }
            Self::Chunks(chunks) => Poll::Ready(chunks.pop_front().map(Ok)),
            Self::Stream(stream) => stream.as_mut().poll_next(cx),
            Self::Error(msg) => {
                if msg.is_empty() {
                    Poll::Ready(None)
                } else {
                    let msg = std::mem::take(msg);
                    Poll::Ready(Some(Err(msg.into())))
                }
            }
        }
    }
}

impl Body for ResBody {
    type Data = Bytes;
    type Error = BoxedError;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, <Self as Body>::Error>>> {
        match self.poll_next(cx) {
            Poll::Ready(Some(Ok(bytes))) => Poll::Ready(Some(Ok(Frame::data(bytes)))),
            Poll::Ready(Some(Err(e))) => Poll::Ready(Some(Err(e))),
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }

    fn is_end_stream(&self) -> bool {
        match self {
            Self::None => true,
            Self::Once(bytes) => bytes.is_empty(),
            Self::Chunks(chunks) => chunks.is_empty(),
            Self::Stream(_) | Self::Error(_) => false,
        }
    }

    fn size_hint(&self) -> SizeHint {
        match self.size() {
            Some(size) => SizeHint::with_exact(size),
            None => SizeHint::default(),
        }
    }
}

impl Debug for ResBody {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("ResBody::None"),
            Self::Once(bytes) => f.debug_tuple("ResBody::Once").field(&bytes.len()).finish(),
            Self::Chunks(chunks) => f.debug_tuple("ResBody::Chunks").field(&chunks.len()).finish(),
            Self::Stream(_) => f.write_str("ResBody::Stream"),
            Self::Error(msg) => f.debug_tuple("ResBody::Error").field(msg).finish(),
        }
    }
}

impl From<Bytes> for ResBody {
    fn from(value: Bytes) -> Self {
        Self::Once(value)
    }
}

impl From<String> for ResBody {
    #[inline]
    fn from(value: String) -> Self {
        Self::Once(value.into())
    }
}

impl From<&'static str> for ResBody {
    fn from(value: &'static str) -> Self {
        Self::Once(Bytes::from_static(value.as_bytes()))
    }
}

impl From<&'static [u8]> for ResBody {
    fn from(value: &'static [u8]) -> Self {
        Self::Once(Bytes::from_static(value))
    }
}

impl From<Vec<u8>> for ResBody {
    fn from(value: Vec<u8>) -> Self {
        Self::Once(value.into())
    }
}
