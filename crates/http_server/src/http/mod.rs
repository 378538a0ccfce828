pub mod header;
pub mod method;
pub mod parser;
pub mod request;
pub mod response;

mod version;
pub use version::{HttpVersion, ParseHttpVersionError};

use bytes::Bytes;

/// A message body.
///
/// `None` means the message declared no length at all, which is different from a
/// `Content-Length: 0` body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Body {
    #[default]
    None,
    Full(Bytes),
}

impl Body {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::None => &[],
            Self::Full(bytes) => bytes,
        }
    }

    /// Returns the body bytes, empty if there was no body
    pub fn into_bytes(self) -> Bytes {
        match self {
            Self::None => Bytes::new(),
            Self::Full(bytes) => bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}
