use bytes::Bytes;
use memchr::memmem;

/// Builder for the bytes of a single HTTP/1.1 request.
#[derive(Debug, Clone)]
pub struct RawRequest {
    method: String,
    target: String,
    version: String,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl RawRequest {
    pub fn new(method: &str, target: &str) -> Self {
        Self {
            method: method.to_string(),
            target: target.to_string(),
            version: "HTTP/1.1".to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(target: &str) -> Self {
        Self::new("GET", target)
    }

    pub fn post(target: &str) -> Self {
        Self::new("POST", target)
    }

    pub fn version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Sets the body and a matching `Content-Length` header.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        let body = body.into();
        self.headers
            .push(("Content-Length".to_string(), body.len().to_string()));
        self.body = Some(body);
        self
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = format!("{} {} {}\r\n", self.method, self.target, self.version).into_bytes();
        for (name, value) in &self.headers {
            out.extend_from_slice(name.as_bytes());
            out.extend_from_slice(b": ");
            out.extend_from_slice(value.as_bytes());
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(b"\r\n");
        if let Some(body) = &self.body {
            out.extend_from_slice(body);
        }
        out
    }
}

/// A response split back into its parts, without any interpretation of the headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub version: String,
    pub code: String,
    pub phrase: String,
    /// Header lines in the order they were sent, as raw `Name: value` strings
    pub headers: Vec<String>,
    pub body: Bytes,
}

impl RawResponse {
    /// Parses a complete response. Returns `None` if the bytes are not a well formed
    /// status line and header block.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let head_end = memmem::find(bytes, b"\r\n\r\n")?;
        let head = std::str::from_utf8(&bytes[..head_end]).ok()?;
        let body = Bytes::copy_from_slice(&bytes[head_end + 4..]);

        let mut lines = head.split("\r\n");
        let mut status = lines.next()?.splitn(3, ' ');
        let version = status.next()?.to_string();
        let code = status.next()?.to_string();
        let phrase = status.next()?.to_string();
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        Some(Self {
            version,
            code,
            phrase,
            headers: lines.map(str::to_string).collect(),
            body,
        })
    }

    /// The value of the first header named exactly `name`.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find_map(|line| {
            let (n, v) = line.split_once(": ")?;
            (n == name).then_some(v)
        })
    }

    pub fn status(&self) -> (&str, &str) {
        (&self.code, &self.phrase)
    }
}
