use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::CerviError;

pub const ALLOWED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Directory holding uploaded microscopy images.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write `bytes` under the upload directory, creating it if needed.
    /// Only the final component of `filename` is kept. An existing file is
    /// never replaced: a name already taken gets a `-1`, `-2`, ... suffix.
    pub async fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, CerviError> {
        let name = sanitize_filename(filename);
        fs::create_dir_all(&self.dir).await?;

        let mut attempt = 0u32;
        loop {
            let path = self.dir.join(numbered_name(&name, attempt));
            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(mut file) => {
                    file.write_all(bytes).await?;
                    file.flush().await?;
                    debug!(path = %path.display(), size = bytes.len(), "image stored");
                    return Ok(path);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
                Err(e) => return Err(e.into()),
            }
        }
    }

    pub async fn read(&self, stored_path: &Path) -> Result<Vec<u8>, CerviError> {
        Ok(fs::read(stored_path).await?)
    }
}

fn numbered_name(name: &str, attempt: u32) -> String {
    if attempt == 0 {
        return name.to_string();
    }
    let path = Path::new(name);
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or(name);
    match path.extension().and_then(|s| s.to_str()) {
        Some(ext) => format!("{stem}-{attempt}.{ext}"),
        None => format!("{stem}-{attempt}"),
    }
}

pub fn sanitize_filename(filename: &str) -> String {
    Path::new(&filename.replace('\\', "/"))
        .file_name()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("upload")
        .to_string()
}

/// Reject anything that is not a jpg, jpeg or png by extension.
pub fn ensure_allowed_extension(filename: &str) -> Result<(), CerviError> {
    let ok = Path::new(filename)
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            ALLOWED_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        });
    if ok {
        Ok(())
    } else {
        Err(CerviError::UnsupportedFileType(filename.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filenames_lose_directories() {
        assert_eq!(sanitize_filename("../../etc/passwd.png"), "passwd.png");
        assert_eq!(sanitize_filename(r"C:\scans\cell.jpg"), "cell.jpg");
        assert_eq!(sanitize_filename("cell.jpeg"), "cell.jpeg");
        assert_eq!(sanitize_filename(".."), "upload");
        assert_eq!(sanitize_filename(""), "upload");
    }

    #[test]
    fn only_image_extensions_pass() {
        assert!(ensure_allowed_extension("a.jpg").is_ok());
        assert!(ensure_allowed_extension("a.JPEG").is_ok());
        assert!(ensure_allowed_extension("a.png").is_ok());
        assert!(ensure_allowed_extension("a.gif").is_err());
        assert!(ensure_allowed_extension("png").is_err());
    }

    #[tokio::test]
    async fn save_creates_directory() {
        let tmp = tempfile::tempdir().expect("tmpdir");
        let store = ImageStore::new(tmp.path().join("uploaded_images"));
        let path = store.save("sub/dir/cell.png", b"bytes").await.expect("save");
        assert_eq!(path, tmp.path().join("uploaded_images").join("cell.png"));
        assert_eq!(store.read(&path).await.unwrap(), b"bytes");
    }

    #[tokio::test]
    async fn reused_names_keep_earlier_images() {
        let tmp = tempfile::tempdir().expect("tmpdir");
        let store = ImageStore::new(tmp.path());
        let first = store.save("cell.png", b"first").await.expect("first");
        let second = store.save("cell.png", b"second").await.expect("second");
        let third = store.save("cell.png", b"third").await.expect("third");

        assert_eq!(first, tmp.path().join("cell.png"));
        assert_eq!(second, tmp.path().join("cell-1.png"));
        assert_eq!(third, tmp.path().join("cell-2.png"));
        assert_eq!(store.read(&first).await.unwrap(), b"first");
        assert_eq!(store.read(&second).await.unwrap(), b"second");
    }

    #[test]
    fn numbered_names_keep_extension() {
        assert_eq!(numbered_name("cell.png", 0), "cell.png");
        assert_eq!(numbered_name("cell.png", 3), "cell-3.png");
        assert_eq!(numbered_name("archive.tar.gz", 1), "archive.tar-1.gz");
        assert_eq!(numbered_name("upload", 2), "upload-2");
    }
}
