use std::net::SocketAddr;

use smallvec::SmallVec;

use crate::http::{
    Body, HttpVersion, ParseHttpVersionError, header::HeaderMap, method::Method,
};

/// A parsed request. Built once per connection and never modified by the router.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// The request target as sent, always starting with `/`
    pub target: String,
    /// The protocol version exactly as sent
    pub version: String,
    pub headers: HeaderMap,
    pub body: Body,
    pub remote: Option<SocketAddr>,
}

impl Request {
    pub fn new(method: Method, target: impl Into<String>) -> Self {
        Self {
            method,
            target: target.into(),
            version: HttpVersion::HTTP_1_1.to_string(),
            headers: HeaderMap::new(),
            body: Body::None,
            remote: None,
        }
    }

    pub fn http_version(&self) -> Result<HttpVersion, ParseHttpVersionError> {
        self.version.parse()
    }

    /// Splits the target into its route name and route arguments.
    ///
    /// `/files/a.txt` gives `("files", ["a.txt"])`, `/` gives `("", [])`.
    pub fn route(&self) -> (&str, SmallVec<[&str; 4]>) {
        let mut segments = self.target.split('/').skip(1);
        let name = segments.next().unwrap_or_default();
        (name, segments.collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(req: &Request) -> (&str, Vec<&str>) {
        let (name, args) = req.route();
        (name, args.to_vec())
    }

    #[test]
    fn route_segments() {
        let req = Request::new(Method::GET, "/files/a.txt");
        assert_eq!(route(&req), ("files", vec!["a.txt"]));

        let req = Request::new(Method::GET, "/echo/a/b");
        assert_eq!(route(&req), ("echo", vec!["a", "b"]));

        let req = Request::new(Method::GET, "/echo/");
        assert_eq!(route(&req), ("echo", vec![""]));

        let req = Request::new(Method::GET, "/echo");
        assert_eq!(route(&req), ("echo", vec![]));

        let req = Request::new(Method::GET, "/");
        assert_eq!(route(&req), ("", vec![]));
    }

    #[test]
    fn typed_version() {
        let mut req = Request::new(Method::GET, "/");
        assert_eq!(req.http_version(), Ok(HttpVersion::HTTP_1_1));
        req.version = "HTTP/one".to_string();
        assert!(req.http_version().is_err());
    }
}
