//! HTTP response test double.

use std::fmt::{self, Debug, Formatter};

use bytes::{Bytes, BytesMut};
use futures_util::stream::StreamExt;
use http::StatusCode;
use http::header::{HeaderMap, HeaderValue, IntoHeaderName};

use crate::body::ResBody;
use crate::error::Error;

/// Represents an HTTP response under test.
///
/// The response only models what the matchers consume: a status code, a
/// header map and a lazily chunked body.
#[non_exhaustive]
pub struct Response {
    /// The HTTP status code.
    pub status_code: Option<StatusCode>,
    /// The HTTP headers.
    pub headers: HeaderMap,
    /// The HTTP body.
    pub body: ResBody,
}

impl Default for Response {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<B> From<http::Response<B>> for Response
where
    B: Into<ResBody>,
{
    #[inline]
    fn from(res: http::Response<B>) -> Self {
        let (parts, body) = res.into_parts();
        Self {
            status_code: Some(parts.status),
            headers: parts.headers,
            body: body.into(),
        }
    }
}

impl Response {
    /// Creates a new blank `Response`.
    #[inline]
    pub fn new() -> Self {
        Self {
            status_code: None,
            headers: HeaderMap::new(),
            body: ResBody::None,
        }
    }

    /// Get headers reference.
    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get mutable headers reference.
    #[inline]
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Modify a header for this response.
    ///
    /// When `overwrite` is `true` an existing header with the same name is
    /// replaced. Otherwise the new value is appended and the old entries are
    /// kept, so the same name may appear multiple times.
    pub fn add_header<N, V>(
        &mut self,
        name: N,
        value: V,
        overwrite: bool,
    ) -> crate::Result<&mut Self>
    where
        N: IntoHeaderName,
        V: TryInto<HeaderValue>,
    {
        let value = value
            .try_into()
            .map_err(|_| Error::other("invalid header value"))?;
        if overwrite {
            self.headers.insert(name, value);
        } else {
            self.headers.append(name, value);
        }
        Ok(self)
    }

    /// Sets status code and returns `&mut Self`.
    #[inline]
    pub fn status_code(&mut self, code: StatusCode) -> &mut Self {
        self.status_code = Some(code);
        self
    }

    /// Sets body.
    #[inline]
    pub fn body(&mut self, body: impl Into<ResBody>) -> &mut Self {
        self.body = body.into();
        self
    }

    /// Sets body to a new value and returns old value.
    #[inline]
    pub fn replace_body(&mut self, body: ResBody) -> ResBody {
        std::mem::replace(&mut self.body, body)
    }

    /// Take body from response.
    #[inline]
    pub fn take_body(&mut self) -> ResBody {
        self.replace_body(ResBody::None)
    }

    /// Drains the body and concatenates its chunks in emission order.
    ///
    /// The body is consumed: afterwards it is [`ResBody::None`]. Use
    /// [`replay_bytes`](Self::replay_bytes) when the body must stay readable.
    pub async fn take_bytes(&mut self) -> crate::Result<Bytes> {
        let body = self.take_body();
        let bytes = match body {
            ResBody::None => Bytes::new(),
            ResBody::Once(bytes) => bytes,
            ResBody::Chunks(chunks) => {
                let mut buf = BytesMut::new();
                for chunk in chunks {
                    buf.extend_from_slice(&chunk);
                }
                buf.freeze()
            }
            ResBody::Stream(mut stream) => {
                let mut buf = BytesMut::new();
                while let Some(chunk) = stream.next().await {
                    buf.extend_from_slice(&chunk.map_err(Error::Stream)?);
                }
                buf.freeze()
            }
            ResBody::Error(msg) => return Err(Error::Stream(msg.into())),
        };
        Ok(bytes)
    }

    /// Drains the body like [`take_bytes`](Self::take_bytes), then puts the
    /// collected bytes back so the body can be drained again with the same
    /// outcome.
    ///
    /// A body whose stream failed stays failed: draining it again reports the
    /// same fault instead of an empty body.
    pub async fn replay_bytes(&mut self) -> crate::Result<Bytes> {
        match self.take_bytes().await {
            Ok(bytes) => {
                self.body = ResBody::Once(bytes.clone());
                Ok(bytes)
            }
            Err(e) => {
                let msg = match &e {
                    Error::Stream(source) => source.to_string(),
                    other => other.to_string(),
                };
                self.body = ResBody::Error(msg);
                Err(e)
            }
        }
    }

    /// Take body as `String` from response.
    pub async fn take_string(&mut self) -> crate::Result<String> {
        let full = self.take_bytes().await?;
        Ok(String::from_utf8(full.to_vec())?)
    }
}

impl Debug for Response {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status_code", &self.status_code)
            .field("headers", &self.headers)
            .field("body", &self.body)
            .finish()
    }
}
