use memchr::memmem;

use crate::http::{method::Method, parser::ParseErrorKind};

/// The first line of a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: Method,
    pub target: String,
    pub version: String,
}

impl RequestLine {
    // RFC 9112 3 Request Line
    // OBNF: request-line = method SP request-target SP HTTP-version
    pub fn parse(line: &[u8]) -> Result<Self, ParseErrorKind> {
        let line = std::str::from_utf8(line).map_err(|_| ParseErrorKind::InvalidRequestLine)?;
        let mut words = line.split(' ');
        let (Some(method), Some(target), Some(version), None) =
            (words.next(), words.next(), words.next(), words.next())
        else {
            return Err(ParseErrorKind::InvalidRequestLine);
        };

        if method.is_empty() {
            return Err(ParseErrorKind::InvalidMethod);
        }
        if !target.starts_with('/') {
            return Err(ParseErrorKind::InvalidTarget);
        }
        if version.is_empty() {
            return Err(ParseErrorKind::InvalidVersion);
        }

        Ok(Self {
            method: Method::from(method),
            target: target.to_string(),
            version: version.to_string(),
        })
    }
}

/// Splits a header line on the first `": "`. Both halves are kept verbatim.
pub fn parse_header_line(line: &[u8]) -> Result<(String, String), ParseErrorKind> {
    let split = memmem::find(line, b": ").ok_or(ParseErrorKind::MalformedHeaderLine)?;
    let name = std::str::from_utf8(&line[..split]).map_err(|_| ParseErrorKind::InvalidHeaderName)?;
    let value =
        std::str::from_utf8(&line[split + 2..]).map_err(|_| ParseErrorKind::InvalidHeaderValue)?;
    Ok((name.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_line() {
        let line = RequestLine::parse(b"GET /echo/abc HTTP/1.1").unwrap();
        assert_eq!(line.method, Method::GET);
        assert_eq!(line.target, "/echo/abc");
        assert_eq!(line.version, "HTTP/1.1");
    }

    #[test]
    fn version_is_kept_verbatim() {
        let line = RequestLine::parse(b"POST / HTTP/9.9-beta").unwrap();
        assert_eq!(line.version, "HTTP/9.9-beta");
    }

    #[test]
    fn request_line_field_count() {
        let cases: &[&[u8]] = &[
            b"",
            b"GET",
            b"GET /",
            b"GET / HTTP/1.1 extra",
            b"GET  / HTTP/1.1",
            b"GET / HTTP/1.1 ",
        ];
        for case in cases {
            assert!(RequestLine::parse(case).is_err(), "{case:?}");
        }
        assert_eq!(
            RequestLine::parse(b"GET / HTTP/1.1 extra"),
            Err(ParseErrorKind::InvalidRequestLine)
        );
    }

    #[test]
    fn request_line_target_must_be_absolute_path() {
        assert_eq!(
            RequestLine::parse(b"GET echo HTTP/1.1"),
            Err(ParseErrorKind::InvalidTarget)
        );
        assert_eq!(
            RequestLine::parse(b" / HTTP/1.1"),
            Err(ParseErrorKind::InvalidMethod)
        );
    }

    #[test]
    fn header_splits_on_first_separator_only() {
        assert_eq!(
            parse_header_line(b"X-Note: a: b: c").unwrap(),
            ("X-Note".to_string(), "a: b: c".to_string())
        );
        assert_eq!(
            parse_header_line(b"Host: localhost:4221").unwrap(),
            ("Host".to_string(), "localhost:4221".to_string())
        );
    }

    #[test]
    fn header_keeps_whitespace() {
        assert_eq!(
            parse_header_line(b"X-Pad:  padded ").unwrap(),
            ("X-Pad".to_string(), " padded ".to_string())
        );
    }

    #[test]
    fn header_without_separator() {
        assert_eq!(
            parse_header_line(b"Host:localhost"),
            Err(ParseErrorKind::MalformedHeaderLine)
        );
        assert_eq!(
            parse_header_line(b"X-Bin: \xff"),
            Err(ParseErrorKind::InvalidHeaderValue)
        );
    }
}
