use std::collections::{HashMap, hash_map};

use super::{HeaderField, HeaderParseError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    map: HashMap<String, String>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn with_capacity(size: usize) -> Self {
        Self {
            map: HashMap::with_capacity(size),
        }
    }

    /// Inserts a header, returning the value it replaced
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.map.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Looks up and parses a well-known header.
    ///
    /// Returns `Ok(None)` when the header is absent, and an error when it is present but its
    /// value does not parse.
    pub fn get_header<T: HeaderField>(&self) -> Result<Option<T::Output>, HeaderParseError> {
        match self.get(T::NAME) {
            None => Ok(None),
            Some(value) => T::parse(value).map(Some),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, String> {
        self.map.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::header::{ContentLength, UserAgent};

    #[test]
    fn last_write_wins() {
        let mut headers = HeaderMap::new();
        assert_eq!(headers.insert("X-Test", "one"), None);
        assert_eq!(headers.insert("X-Test", "two"), Some("one".to_string()));
        assert_eq!(headers.get("X-Test"), Some("two"));
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn names_are_not_case_folded() {
        let mut headers = HeaderMap::new();
        headers.insert("user-agent", "curl/8.0");
        assert_eq!(headers.get("User-Agent"), None);
        assert_eq!(headers.get_header::<UserAgent>().unwrap(), None);
        assert!(headers.contains("user-agent"));
    }

    #[test]
    fn typed_content_length() {
        let mut headers = HeaderMap::new();
        assert_eq!(headers.get_header::<ContentLength>().unwrap(), None);

        headers.insert("Content-Length", "42");
        assert_eq!(headers.get_header::<ContentLength>().unwrap(), Some(42));

        headers.insert("Content-Length", "-1");
        assert!(headers.get_header::<ContentLength>().is_err());
    }
}
