//! The wire reader.
//!
//! [`Reader`] turns any [`AsyncRead`] into the [`LineRead`] capability, and [`Parser`] builds a
//! [`Request`] out of a `LineRead`. A request is read in three steps: the request line, header
//! lines up to the blank line, and then exactly `Content-Length` bytes of body if that header
//! was sent. Nothing past the declared body is consumed.

use std::future::Future;

use bytes::{Buf, Bytes, BytesMut};
use memchr::memchr;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::http::{
    Body,
    header::{ContentLength, HeaderMap},
    request::Request,
    response::Response,
};

mod error;
mod line;
pub use error::*;
pub use line::*;

pub type HttpParseResult<T> = Result<T, HttpParseError>;

/// Size caps applied while reading a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Request line plus all header lines, line endings included
    pub head_bytes: usize,
    pub body_bytes: u64,
}

impl Limits {
    pub const DEFAULT_HEAD_BYTES: usize = 64 * 1024;
    pub const DEFAULT_BODY_BYTES: u64 = 64 * 1024 * 1024;
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            head_bytes: Self::DEFAULT_HEAD_BYTES,
            body_bytes: Self::DEFAULT_BODY_BYTES,
        }
    }
}

/// A byte source that can be read line by line, or by an exact count.
pub trait LineRead {
    /// Reads one `\n` terminated line and returns it without its `\r\n` (or bare `\n`).
    ///
    /// Fails with [`ParseErrorKind::TooLarge`] if no line ending shows up within `limit` bytes.
    fn read_line(
        &mut self,
        limit: usize,
    ) -> impl Future<Output = Result<&[u8], ParseErrorKind>> + Send;

    /// Reads exactly `n` bytes
    fn read_exact(&mut self, n: usize) -> impl Future<Output = Result<Bytes, ParseErrorKind>> + Send;

    /// Total number of bytes handed out so far
    fn position(&self) -> usize;
}

pub struct Reader<T: AsyncRead + Unpin> {
    inner: T,
    buf: BytesMut,
    /// Length of the line last returned by `read_line`, still at the front of `buf`
    pending: usize,
    position: usize,
}

impl<READER> Reader<READER>
where
    READER: AsyncRead + Unpin,
{
    const BUF_SIZE: usize = 8192;

    pub fn new(reader: READER) -> Self {
        Self {
            inner: reader,
            buf: BytesMut::with_capacity(Self::BUF_SIZE),
            pending: 0,
            position: 0,
        }
    }

    async fn read(&mut self, want: usize) -> std::io::Result<usize> {
        self.buf.reserve(want.max(Self::BUF_SIZE));
        self.inner.read_buf(&mut self.buf).await
    }

    fn release_pending(&mut self) {
        self.buf.advance(self.pending);
        self.pending = 0;
    }

    pub fn into_inner(self) -> READER {
        self.inner
    }
}

impl<READER> LineRead for Reader<READER>
where
    READER: AsyncRead + Unpin + Send,
{
    async fn read_line(&mut self, limit: usize) -> Result<&[u8], ParseErrorKind> {
        self.release_pending();
        let mut scanned = 0;
        loop {
            if let Some(nl) = memchr(b'\n', &self.buf[scanned..]) {
                let nl = scanned + nl;
                if nl + 1 > limit {
                    return Err(ParseErrorKind::TooLarge {
                        what: LimitKind::HeadBytes,
                        limit: limit as u64,
                        actual: (nl + 1) as u64,
                    });
                }
                self.pending = nl + 1;
                self.position += nl + 1;
                let end = if nl > 0 && self.buf[nl - 1] == b'\r' {
                    nl - 1
                } else {
                    nl
                };
                return Ok(&self.buf[..end]);
            }

            scanned = self.buf.len();
            if scanned > limit {
                return Err(ParseErrorKind::TooLarge {
                    what: LimitKind::HeadBytes,
                    limit: limit as u64,
                    actual: scanned as u64,
                });
            }
            if 0 == self.read(Self::BUF_SIZE).await? {
                return Err(ParseErrorKind::IncompleteMessage);
            }
        }
    }

    async fn read_exact(&mut self, n: usize) -> Result<Bytes, ParseErrorKind> {
        self.release_pending();
        while self.buf.len() < n {
            let missing = n - self.buf.len();
            if 0 == self.read(missing).await? {
                return Err(ParseErrorKind::IncompleteMessage);
            }
        }
        self.position += n;
        Ok(self.buf.split_to(n).freeze())
    }

    fn position(&self) -> usize {
        self.position
    }
}

/// An HTTP request parser
pub struct Parser<R: LineRead> {
    reader: R,
    limits: Limits,
}

impl<T> Parser<Reader<T>>
where
    T: AsyncRead + Unpin + Send,
{
    pub fn new(io: T, limits: Limits) -> Self {
        Self::with_reader(Reader::new(io), limits)
    }
}

impl<R: LineRead> Parser<R> {
    pub fn with_reader(reader: R, limits: Limits) -> Self {
        Self { reader, limits }
    }

    pub fn into_reader(self) -> R {
        self.reader
    }

    fn head_budget(&self) -> usize {
        self.limits.head_bytes.saturating_sub(self.reader.position())
    }

    /// Parses an entire HTTP request message
    // RFC 9112 - 2.1 Message Format
    // ABNF:
    //  HTTP-message = start-line CRLF *( field-line CRLF ) CRLF [ message-body ]
    pub async fn parse_request(&mut self) -> HttpParseResult<Request> {
        let budget = self.head_budget();
        let request_line = match self.reader.read_line(budget).await {
            Ok(line) => RequestLine::parse(line),
            Err(kind) => Err(kind),
        }
        .map_err(|kind| HttpParseError::new(kind, Location::StartLine, 0, Some(1)))?;

        let mut headers = HeaderMap::new();
        let mut line_cnt = 1;
        loop {
            line_cnt += 1;
            let offset = self.reader.position();
            let budget = self.head_budget();
            let header = match self.reader.read_line(budget).await {
                Ok([]) => break,
                Ok(line) => parse_header_line(line),
                Err(kind) => Err(kind),
            }
            .map_err(|kind| HttpParseError::new(kind, Location::Headers, offset, Some(line_cnt)))?;

            let (name, value) = header;
            headers.insert(name, value);
        }

        let body_err = |kind, offset| HttpParseError::new(kind, Location::Body, offset, None);
        let offset = self.reader.position();
        let body = match headers.get_header::<ContentLength>() {
            Err(_) => return Err(body_err(ParseErrorKind::InvalidContentLength, offset)),
            Ok(None) => Body::None,
            Ok(Some(cl)) => {
                if cl > self.limits.body_bytes {
                    return Err(body_err(
                        ParseErrorKind::TooLarge {
                            what: LimitKind::BodyBytes,
                            limit: self.limits.body_bytes,
                            actual: cl,
                        },
                        offset,
                    ));
                }
                let cl = usize::try_from(cl)
                    .map_err(|_| body_err(ParseErrorKind::InvalidContentLength, offset))?;
                let bytes = self
                    .reader
                    .read_exact(cl)
                    .await
                    .map_err(|kind| body_err(kind, offset))?;
                Body::Full(bytes)
            }
        };

        log::trace!(
            "parsed {} {} with {} headers and {} body bytes",
            request_line.method,
            request_line.target,
            headers.len(),
            body.len()
        );

        Ok(Request {
            method: request_line.method,
            target: request_line.target,
            version: request_line.version,
            headers,
            body,
            remote: None,
        })
    }
}

/// Writes serialized responses to a connection
pub struct Sender<WRITER: AsyncWrite + Unpin> {
    writer: WRITER,
}

impl<WRITER> Sender<WRITER>
where
    WRITER: AsyncWrite + Unpin,
{
    pub fn new(writer: WRITER) -> Self {
        Self { writer }
    }

    pub async fn send_response(&mut self, response: &Response) -> std::io::Result<()> {
        self.writer.write_all(&response.to_bytes()).await?;
        self.writer.flush().await
    }

    pub async fn shutdown(&mut self) -> std::io::Result<()> {
        self.writer.shutdown().await
    }
}
