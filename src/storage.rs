use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

/// On-disk store for uploaded item images. Constructed once at startup and
/// handed to handlers as shared app data; files are served back by the
/// static `/uploads` route keyed by stored filename.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(ImageStore { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes the payload under a uuid-prefixed sanitized name and returns
    /// the stored filename. The prefix keeps concurrent uploads of the same
    /// client filename from overwriting each other.
    pub fn save(&self, original_name: &str, bytes: &[u8]) -> io::Result<String> {
        let stored_name = format!("{}_{}", Uuid::new_v4(), sanitize_filename(original_name));
        let path = self.root.join(&stored_name);
        fs::write(&path, bytes)?;
        log::info!("Stored upload {} ({} bytes)", stored_name, bytes.len());
        Ok(stored_name)
    }

    pub fn remove(&self, stored_name: &str) -> io::Result<()> {
        fs::remove_file(self.root.join(stored_name))
    }
}

/// Keeps only the final path component and a conservative character set, so
/// client-supplied names cannot escape the upload directory.
fn sanitize_filename(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload");

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches('.').is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path()).unwrap();

        let stored = store.save("chair.jpg", b"not really a jpeg").unwrap();
        assert!(stored.ends_with("chair.jpg"));

        let on_disk = fs::read(store.root().join(&stored)).unwrap();
        assert_eq!(on_disk, b"not really a jpeg");

        store.remove(&stored).unwrap();
        assert!(!store.root().join(&stored).exists());
    }

    #[test]
    fn test_same_name_does_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path()).unwrap();

        let first = store.save("chair.jpg", b"one").unwrap();
        let second = store.save("chair.jpg", b"two").unwrap();
        assert_ne!(first, second);

        assert_eq!(fs::read(store.root().join(&first)).unwrap(), b"one");
        assert_eq!(fs::read(store.root().join(&second)).unwrap(), b"two");
    }

    #[test]
    fn test_sanitize_strips_path_components() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("dir/photo.png"), "photo.png");
        assert_eq!(sanitize_filename("we ird name!.jpg"), "we_ird_name_.jpg");
        assert_eq!(sanitize_filename(""), "upload");
        assert_eq!(sanitize_filename(".."), "upload");
    }
}
