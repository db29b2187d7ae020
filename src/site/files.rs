//! Document-root file lookup.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Resolves a normalized request path under `root`.
///
/// Leading slashes are dropped so the result always stays a child of `root`.
pub fn resolve(root: &Path, path: &str) -> PathBuf {
    root.join(path.trim_start_matches('/'))
}

/// Reads a regular file under the document root.
///
/// `Ok(None)` when the file does not exist or names a directory; `Err` for
/// any other I/O failure.
pub async fn read_file(root: &Path, path: &str) -> std::io::Result<Option<Vec<u8>>> {
    let full = resolve(root, path);

    let metadata = match tokio::fs::metadata(&full).await {
        Ok(m) => m,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };

    if metadata.is_dir() {
        return Ok(None);
    }

    tokio::fs::read(&full).await.map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_stays_under_root() {
        let root = Path::new("/srv/www");
        assert_eq!(resolve(root, "//secret"), PathBuf::from("/srv/www/secret"));
        assert_eq!(resolve(root, "/a/b.html"), PathBuf::from("/srv/www/a/b.html"));
    }

    #[tokio::test]
    async fn directory_and_missing_are_none() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("a.txt"), b"abc").unwrap();

        assert_eq!(read_file(dir.path(), "/sub").await.unwrap(), None);
        assert_eq!(read_file(dir.path(), "/nope").await.unwrap(), None);
        assert_eq!(
            read_file(dir.path(), "/a.txt").await.unwrap(),
            Some(b"abc".to_vec())
        );
    }
}
