use std::{
    io,
    path::{Path, PathBuf},
};

use bytes::Bytes;

use super::{Storage, invalid_name, is_valid_name};

/// Files directly beneath a root directory
#[derive(Debug, Clone)]
pub struct DirectoryStorage {
    root: PathBuf,
}

impl DirectoryStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> io::Result<PathBuf> {
        if !is_valid_name(name) {
            return Err(invalid_name(name));
        }
        Ok(self.root.join(name))
    }
}

impl Storage for DirectoryStorage {
    async fn read(&self, name: &str) -> io::Result<Option<Bytes>> {
        let path = self.resolve(name)?;
        match tokio::fs::read(&path).await {
            Ok(contents) => Ok(Some(Bytes::from(contents))),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn write(&self, name: &str, contents: Bytes) -> io::Result<()> {
        let path = self.resolve(name)?;
        tokio::fs::write(&path, &contents).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root(test: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!(
            "carbon-route-server-{}-{}",
            test,
            std::process::id()
        ));
        std::fs::create_dir_all(&root).unwrap();
        root
    }

    #[tokio::test]
    async fn write_then_read() {
        let root = temp_root("write-then-read");
        let storage = DirectoryStorage::new(&root);

        storage
            .write("report.txt", Bytes::from_static(b"hello-world"))
            .await
            .unwrap();
        assert_eq!(
            std::fs::read(root.join("report.txt")).unwrap(),
            b"hello-world"
        );
        assert_eq!(
            storage.read("report.txt").await.unwrap(),
            Some(Bytes::from_static(b"hello-world"))
        );

        storage
            .write("report.txt", Bytes::from_static(b"short"))
            .await
            .unwrap();
        assert_eq!(
            storage.read("report.txt").await.unwrap(),
            Some(Bytes::from_static(b"short"))
        );

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[tokio::test]
    async fn missing_file_is_none() {
        let root = temp_root("missing");
        let storage = DirectoryStorage::new(&root);
        assert_eq!(storage.read("does-not-exist.bin").await.unwrap(), None);
        std::fs::remove_dir_all(&root).unwrap();
    }

    #[tokio::test]
    async fn reading_a_directory_is_an_error() {
        let root = temp_root("dir-read");
        std::fs::create_dir_all(root.join("sub")).unwrap();
        let storage = DirectoryStorage::new(&root);
        assert!(storage.read("sub").await.is_err());
        std::fs::remove_dir_all(&root).unwrap();
    }

    #[tokio::test]
    async fn traversal_is_rejected() {
        let root = temp_root("traversal");
        let storage = DirectoryStorage::new(root.join("inner"));
        let err = storage.read("..").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        let err = storage
            .write("../escaped", Bytes::from_static(b"x"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(!root.join("escaped").exists());
        std::fs::remove_dir_all(&root).unwrap();
    }
}
