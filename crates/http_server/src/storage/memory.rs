use std::{
    collections::HashMap,
    future::{Future, ready},
    io,
    sync::{Mutex, MutexGuard, PoisonError},
};

use bytes::Bytes;

use super::{Storage, invalid_name, is_valid_name};

/// In-memory files, for tests and for embedding without a filesystem
#[derive(Debug, Default)]
pub struct MemoryStorage {
    files: Mutex<HashMap<String, Bytes>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn files(&self) -> MutexGuard<'_, HashMap<String, Bytes>> {
        self.files.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn insert(&self, name: impl Into<String>, contents: impl Into<Bytes>) {
        self.files().insert(name.into(), contents.into());
    }

    pub fn get(&self, name: &str) -> Option<Bytes> {
        self.files().get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.files().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, name: &str) -> impl Future<Output = io::Result<Option<Bytes>>> + Send {
        let result = if is_valid_name(name) {
            Ok(self.get(name))
        } else {
            Err(invalid_name(name))
        };
        ready(result)
    }

    fn write(&self, name: &str, contents: Bytes) -> impl Future<Output = io::Result<()>> + Send {
        let result = if is_valid_name(name) {
            self.insert(name, contents);
            Ok(())
        } else {
            Err(invalid_name(name))
        };
        ready(result)
    }
}
