use std::fmt::{Debug, Display};

use bytes::Bytes;

/// An HTTP Method
/// Defined in RFC 9112 3.1
///
/// Methods are case-sensitive: `get` is a custom method, not [`Method::GET`].
#[derive(Clone, PartialEq, Eq)]
pub struct Method(Repr);

impl Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Debug for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl From<&str> for Method {
    fn from(value: &str) -> Self {
        match Builtin::try_from(value) {
            Ok(builtin) => Method(Repr::Builtin(builtin)),
            Err(_) => Method(Repr::Custom(Bytes::copy_from_slice(value.as_bytes()))),
        }
    }
}

impl Method {
    pub const GET: Self = Self(Repr::Builtin(Builtin::GET));
    pub const POST: Self = Self(Repr::Builtin(Builtin::POST));
    pub const PUT: Self = Self(Repr::Builtin(Builtin::PUT));
    pub const DELETE: Self = Self(Repr::Builtin(Builtin::DELETE));
    pub const PATCH: Self = Self(Repr::Builtin(Builtin::PATCH));
    pub const OPTIONS: Self = Self(Repr::Builtin(Builtin::OPTIONS));
    pub const CONNECT: Self = Self(Repr::Builtin(Builtin::CONNECT));
    pub const TRACE: Self = Self(Repr::Builtin(Builtin::TRACE));
    pub const HEAD: Self = Self(Repr::Builtin(Builtin::HEAD));

    pub fn is_custom(&self) -> bool {
        matches!(self.0, Repr::Custom(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Repr {
    Builtin(Builtin),
    Custom(Bytes),
}

impl Display for Repr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Builtin(builtin) => Display::fmt(builtin, f),
            // Custom methods are only ever built from a &str
            Self::Custom(custom) => f.write_str(&String::from_utf8_lossy(custom)),
        }
    }
}

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, PartialEq, Eq)]
enum Builtin {
    GET,
    POST,
    PUT,
    DELETE,
    PATCH,
    OPTIONS,
    CONNECT,
    TRACE,
    HEAD,
}

impl TryFrom<&str> for Builtin {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Ok(match value {
            "GET" => Self::GET,
            "POST" => Self::POST,
            "PUT" => Self::PUT,
            "DELETE" => Self::DELETE,
            "PATCH" => Self::PATCH,
            "OPTIONS" => Self::OPTIONS,
            "CONNECT" => Self::CONNECT,
            "TRACE" => Self::TRACE,
            "HEAD" => Self::HEAD,
            _ => return Err(()),
        })
    }
}

impl Display for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::GET => "GET",
            Self::POST => "POST",
            Self::PUT => "PUT",
            Self::DELETE => "DELETE",
            Self::PATCH => "PATCH",
            Self::OPTIONS => "OPTIONS",
            Self::CONNECT => "CONNECT",
            Self::TRACE => "TRACE",
            Self::HEAD => "HEAD",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_methods() {
        assert_eq!(Method::from("GET"), Method::GET);
        assert_eq!(Method::from("POST"), Method::POST);
        assert_eq!(Method::from("DELETE").to_string(), "DELETE");
        assert!(!Method::from("HEAD").is_custom());
    }

    #[test]
    fn methods_are_case_sensitive() {
        let method = Method::from("get");
        assert_ne!(method, Method::GET);
        assert!(method.is_custom());
        assert_eq!(method.to_string(), "get");
    }
}
