use std::fmt::Display;

use bytes::{Bytes, BytesMut};
use smallvec::SmallVec;
mod builder;
pub use builder::ResponseBuilder;

use crate::http::HttpVersion;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCode(u16);

impl StatusCode {
    pub const OK: Self = Self(200);
    pub const CREATED: Self = Self(201);
    pub const BAD_REQUEST: Self = Self(400);
    pub const NOT_FOUND: Self = Self(404);
    pub const METHOD_NOT_ALLOWED: Self = Self(405);
    pub const CONTENT_TOO_LARGE: Self = Self(413);
    pub const INTERNAL_SERVER_ERROR: Self = Self(500);

    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    pub const fn is_client_error(&self) -> bool {
        self.0 >= 400 && self.0 < 500
    }

    pub const fn canonical_reason(&self) -> Option<&'static str> {
        Some(match self.0 {
            200 => "OK",
            201 => "Created",
            400 => "Bad Request",
            404 => "Not Found",
            405 => "Method Not Allowed",
            413 => "Content Too Large",
            500 => "Internal Server Error",
            _ => return None,
        })
    }
}

impl Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Response {
    pub version: HttpVersion,
    pub status: StatusCode,
    /// The reason phrase. Usually the canonical one, but not necessarily.
    pub message: Bytes,
    /// Raw `Name: value` lines, written out in order and not validated
    pub headers: SmallVec<[String; 4]>,
    pub body: Bytes,
}

impl Response {
    /// A bare response with the canonical reason phrase and nothing else
    pub fn empty(version: HttpVersion, status: StatusCode) -> Self {
        ResponseBuilder::new(version, status).build()
    }

    /// Serializes the response into the bytes written to the client.
    ///
    /// Every header line ends in CRLF and the head always ends with a blank line, even when
    /// there are no headers at all.
    pub fn to_bytes(&self) -> Bytes {
        let status_line = format!("{} {} ", self.version, self.status);
        let head_len = status_line.len()
            + self.message.len()
            + self.headers.iter().map(|h| h.len() + 2).sum::<usize>()
            + 4;

        let mut buf = BytesMut::with_capacity(head_len + self.body.len());
        buf.extend_from_slice(status_line.as_bytes());
        buf.extend_from_slice(&self.message);
        buf.extend_from_slice(b"\r\n");
        for header in &self.headers {
            buf.extend_from_slice(header.as_bytes());
            buf.extend_from_slice(b"\r\n");
        }
        buf.extend_from_slice(b"\r\n");
        buf.extend_from_slice(&self.body);
        buf.freeze()
    }
}

#[cfg(test)]
mod tests {
    use carbon_http_test_suite::RawResponse;

    use super::*;

    #[test]
    fn empty_response_still_has_blank_line() {
        let res = Response::empty(HttpVersion::HTTP_1_1, StatusCode::OK);
        assert_eq!(&res.to_bytes()[..], b"HTTP/1.1 200 OK\r\n\r\n");
    }

    #[test]
    fn response_with_body() {
        let res = ResponseBuilder::new(HttpVersion::HTTP_1_1, StatusCode::OK)
            .body("text/plain", Bytes::from_static(b"abc"))
            .build();
        assert_eq!(
            &res.to_bytes()[..],
            b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 3\r\n\r\nabc"
        );
    }

    #[test]
    fn custom_reason_phrase() {
        let res = ResponseBuilder::new(HttpVersion::HTTP_1_1, StatusCode::BAD_REQUEST)
            .message("Not Found")
            .build();
        assert_eq!(&res.to_bytes()[..], b"HTTP/1.1 400 Not Found\r\n\r\n");
    }

    #[test]
    fn header_framing_round_trips() {
        let res = ResponseBuilder::new(HttpVersion::HTTP_1_1, StatusCode::METHOD_NOT_ALLOWED)
            .header("Allow", "GET, POST")
            .header("X-Note", "a: b")
            .body("application/octet-stream", Bytes::from_static(b"\r\n\r\n"))
            .build();

        let parsed = RawResponse::parse(&res.to_bytes()).unwrap();
        assert_eq!(parsed.status(), ("405", "Method Not Allowed"));
        assert_eq!(parsed.headers, res.headers.to_vec());
        assert_eq!(parsed.body, res.body);
    }

    #[test]
    fn unknown_status_has_no_reason() {
        assert_eq!(StatusCode(299).canonical_reason(), None);
        assert!(StatusCode::NOT_FOUND.is_client_error());
        assert!(!StatusCode::INTERNAL_SERVER_ERROR.is_client_error());
    }
}
