//! File-based list loader.
//!
//! This module provides functionality to read raw list payloads from local
//! files on the filesystem.

use std::path::{Path, PathBuf};

/// Error type for list file loading operations.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// File was not found at the specified path.
    #[error("file not found: {0:?}")]
    NotFound(PathBuf),

    /// Permission denied when accessing the file.
    #[error("permission denied: {0:?}")]
    PermissionDenied(PathBuf),

    /// I/O error while reading the file.
    #[error("I/O error reading {path:?}")]
    Io {
        /// Path to the file that caused the error.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Loads list payloads from local files.
pub struct FileLoader;

impl FileLoader {
    /// Read the raw payload of a list file.
    ///
    /// The content is returned undecoded; see
    /// [`decode`](crate::blocklist::decode::decode).
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if:
    /// - The file does not exist ([`LoadError::NotFound`])
    /// - Permission is denied ([`LoadError::PermissionDenied`])
    /// - An I/O error occurs ([`LoadError::Io`])
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use gfwlist::blocklist::loader::FileLoader;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let payload = FileLoader::load(Path::new("/etc/gfwlist/gfwlist.txt")).await?;
    /// println!("Read {} bytes", payload.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn load(path: &Path) -> Result<Vec<u8>, LoadError> {
        tokio::fs::read(path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => LoadError::PermissionDenied(path.to_path_buf()),
            _ => LoadError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[tokio::test]
    async fn should_read_file_content_unchanged() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"! comment\r\n||example.com\n").unwrap();
        file.flush().unwrap();

        let payload = FileLoader::load(file.path()).await.unwrap();

        assert_eq!(payload, b"! comment\r\n||example.com\n");
    }

    #[tokio::test]
    async fn should_return_empty_payload_when_file_is_empty() {
        let file = NamedTempFile::new().unwrap();

        let payload = FileLoader::load(file.path()).await.unwrap();

        assert!(payload.is_empty());
    }

    #[tokio::test]
    async fn should_return_not_found_error_when_file_does_not_exist() {
        let result = FileLoader::load(Path::new("/nonexistent/path/to/gfwlist.txt")).await;

        assert!(matches!(result, Err(LoadError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_return_io_error_when_path_is_directory() {
        let dir = TempDir::new().unwrap();

        let result = FileLoader::load(dir.path()).await;

        assert!(matches!(result, Err(LoadError::Io { .. })));
    }

    #[tokio::test]
    async fn should_handle_large_file() {
        let mut file = NamedTempFile::new().unwrap();
        for i in 0..10_000 {
            writeln!(file, "||domain{i}.example.com").unwrap();
        }
        file.flush().unwrap();

        let payload = FileLoader::load(file.path()).await.unwrap();
        let text = String::from_utf8(payload).unwrap();

        assert_eq!(text.lines().count(), 10_000);
        assert!(text.starts_with("||domain0.example.com\n"));
    }
}
