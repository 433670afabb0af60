use crate::constants::DEFAULT_PHOTO_EXTENSION;
use async_trait::async_trait;
use rocket::fs::TempFile;
use std::{ffi::OsStr, path::Path};
use tokio::io::AsyncReadExt;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait UploadFileHandler: Send + Sync {
    /// Read the attached uploaded file
    async fn get_contents(&self) -> std::io::Result<Vec<u8>>;
    /// Returns the name for an uploaded file
    fn name(&self) -> Option<String>;
    /// Returns the file length for an uploaded file
    fn len(&self) -> u64;
}

#[async_trait]
impl UploadFileHandler for TempFile<'_> {
    async fn get_contents(&self) -> std::io::Result<Vec<u8>> {
        let mut opened = self.open().await?;
        let mut buf = Vec::with_capacity(self.len() as usize);
        opened.read_to_end(&mut buf).await?;
        Ok(buf)
    }

    fn name(&self) -> Option<String> {
        self.raw_name()
            .map(|n| n.dangerous_unsafe_unsanitized_raw().as_str().to_owned())
    }

    fn len(&self) -> u64 {
        self.len()
    }
}

/// Derives the stored file name for a contact photo from the contact id and
/// the original file name: the id plus the original's extension.
pub fn photo_file_name(id: &str, original_file_name: &str) -> String {
    format!("{}{}", id, file_extension(original_file_name))
}

/// Returns the extension of the given file name including the leading dot,
/// searching only the bare file name with any path components stripped.
/// Falls back to a default if the name contains no dot.
pub fn file_extension(file_name: &str) -> String {
    let bare = Path::new(file_name)
        .file_name()
        .and_then(OsStr::to_str)
        .unwrap_or(file_name);
    match bare.rsplit_once('.') {
        Some((_, extension)) => format!(".{extension}"),
        None => DEFAULT_PHOTO_EXTENSION.to_string(),
    }
}

pub fn detect_content_type_for_bytes(bytes: &[u8]) -> Option<String> {
    infer::get(bytes).map(|t| t.mime_type().to_owned())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn file_extension_basic() {
        assert_eq!(file_extension("profile.jpg"), String::from(".jpg"));
    }

    #[test]
    fn file_extension_takes_last_dot() {
        assert_eq!(file_extension("archive.tar.gz"), String::from(".gz"));
    }

    #[test]
    fn file_extension_defaults_without_dot() {
        assert_eq!(file_extension("noext"), String::from(".png"));
    }

    #[test]
    fn file_extension_ignores_path_components() {
        assert_eq!(
            file_extension("/tmp/uploads.d/profile.jpeg"),
            String::from(".jpeg")
        );
        assert_eq!(file_extension("/tmp/uploads.d/noext"), String::from(".png"));
    }

    #[test]
    fn file_extension_trailing_dot_yields_bare_dot() {
        assert_eq!(file_extension("strange."), String::from("."));
    }

    #[test]
    fn photo_file_name_joins_id_and_extension() {
        assert_eq!(
            photo_file_name("abc123", "profile.jpg"),
            String::from("abc123.jpg")
        );
        assert_eq!(photo_file_name("abc123", "noext"), String::from("abc123.png"));
    }

    #[test]
    fn detect_content_type_for_png_bytes() {
        let png_magic = [0x89u8, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a];
        assert_eq!(
            detect_content_type_for_bytes(&png_magic),
            Some(String::from("image/png"))
        );
    }

    #[test]
    fn detect_content_type_for_unknown_bytes() {
        assert_eq!(detect_content_type_for_bytes(b"hello world"), None);
    }
}
