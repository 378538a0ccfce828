use std::fmt::Display;

use crate::http::response::StatusCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    StartLine,
    Headers,
    Body,
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::StartLine => "start line",
            Self::Headers => "headers",
            Self::Body => "body",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    HeadBytes,
    BodyBytes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseErrorKind {
    // Syntax/tokenization
    InvalidRequestLine, // not exactly three space separated fields
    InvalidMethod,
    InvalidTarget, // must start with a slash
    InvalidVersion,
    MalformedHeaderLine, // no ": " separator
    InvalidHeaderName,   // not UTF-8
    InvalidHeaderValue,  // not UTF-8

    // Framing
    InvalidContentLength,

    // Limits
    TooLarge {
        what: LimitKind,
        limit: u64,
        actual: u64,
    },

    // Flow / I/O
    IncompleteMessage, // ran out before CRLF or before body finished
    Io(std::io::ErrorKind),
}

impl Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequestLine => f.write_str("invalid request line"),
            Self::InvalidMethod => f.write_str("invalid method"),
            Self::InvalidTarget => f.write_str("invalid target"),
            Self::InvalidVersion => f.write_str("invalid version"),
            Self::MalformedHeaderLine => f.write_str("malformed header"),
            Self::InvalidHeaderName => f.write_str("invalid header name"),
            Self::InvalidHeaderValue => f.write_str("invalid header value"),
            Self::InvalidContentLength => f.write_str("invalid content length"),
            Self::TooLarge {
                what,
                limit,
                actual,
            } => {
                let what = match what {
                    LimitKind::HeadBytes => "head size",
                    LimitKind::BodyBytes => "body size",
                };
                write!(f, "{what} limit exceeded (limit: {limit}, actual: {actual})")
            }
            Self::IncompleteMessage => f.write_str("incomplete message"),
            Self::Io(err) => Display::fmt(&err, f),
        }
    }
}

impl From<std::io::Error> for ParseErrorKind {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.kind())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpParseError {
    pub kind: ParseErrorKind,
    pub location: Location,
    /// Byte offset into the request where the error was noticed
    pub offset: usize,
    /// 1-based line number, when the error is tied to a line of the head
    pub line: Option<usize>,
}

impl Display for HttpParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "http parse error: {} while parsing {} at offset {}",
            self.kind, self.location, self.offset
        )?;
        if let Some(line) = self.line {
            write!(f, " (line {})", line)?;
        }
        Ok(())
    }
}

impl std::error::Error for HttpParseError {}

impl HttpParseError {
    pub fn new(kind: ParseErrorKind, location: Location, offset: usize, line: Option<usize>) -> Self {
        Self {
            kind,
            location,
            offset,
            line,
        }
    }

    /// The status to answer with, if the client is still there to hear it
    pub fn status_code(&self) -> StatusCode {
        match self.kind {
            ParseErrorKind::InvalidRequestLine
            | ParseErrorKind::InvalidMethod
            | ParseErrorKind::InvalidTarget
            | ParseErrorKind::InvalidVersion
            | ParseErrorKind::MalformedHeaderLine
            | ParseErrorKind::InvalidHeaderName
            | ParseErrorKind::InvalidHeaderValue
            | ParseErrorKind::InvalidContentLength => StatusCode::BAD_REQUEST,
            ParseErrorKind::TooLarge { .. } => StatusCode::CONTENT_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_location_and_line() {
        let err = HttpParseError::new(ParseErrorKind::MalformedHeaderLine, Location::Headers, 17, Some(2));
        assert_eq!(
            err.to_string(),
            "http parse error: malformed header while parsing headers at offset 17 (line 2)"
        );
    }

    #[test]
    fn status_codes() {
        let err = |kind| HttpParseError::new(kind, Location::StartLine, 0, None);
        assert_eq!(err(ParseErrorKind::InvalidTarget).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err(ParseErrorKind::TooLarge {
                what: LimitKind::BodyBytes,
                limit: 1,
                actual: 2
            })
            .status_code(),
            StatusCode::CONTENT_TOO_LARGE
        );
        assert_eq!(
            err(ParseErrorKind::IncompleteMessage).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
