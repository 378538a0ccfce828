//! Where the `files` route keeps its files.
//!
//! Names handed to a [`Storage`] must be a single plain path component, see
//! [`is_valid_name`]. Both backends refuse anything else with
//! [`std::io::ErrorKind::InvalidInput`].

use std::{
    ffi::OsStr,
    future::Future,
    io,
    path::{Component, Path},
};

use bytes::Bytes;

mod directory;
mod memory;

pub use directory::DirectoryStorage;
pub use memory::MemoryStorage;

pub trait Storage: Send + Sync + 'static {
    /// Reads a whole file. Returns `Ok(None)` if there is no file with that name.
    fn read(&self, name: &str) -> impl Future<Output = io::Result<Option<Bytes>>> + Send;

    /// Creates or truncates a file and writes `contents` to it
    fn write(&self, name: &str, contents: Bytes) -> impl Future<Output = io::Result<()>> + Send;
}

/// Whether `name` is exactly one normal path component: not empty, not `.` or `..`, and
/// without separators.
pub fn is_valid_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(component)), None) => component == OsStr::new(name),
        _ => false,
    }
}

fn invalid_name(name: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("invalid file name {name:?}"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_names() {
        for name in ["report.txt", "a", "with space", ".hidden", "x..y"] {
            assert!(is_valid_name(name), "{name}");
        }
    }

    #[test]
    fn invalid_names() {
        for name in ["", ".", "..", "a/b", "/etc", "a/", "./a"] {
            assert!(!is_valid_name(name), "{name}");
        }
    }
}
