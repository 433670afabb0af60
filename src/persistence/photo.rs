use super::{file_storage_path, Error, Result};
use crate::util;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::{create_dir_all, read, rename, write};

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait PhotoStoreApi: Send + Sync {
    /// Writes the given photo bytes to disk under the given file name,
    /// replacing any existing photo with that name.
    async fn save_photo(&self, file_name: &str, bytes: &[u8]) -> Result<()>;

    /// Reads the photo with the given file name from disk.
    async fn open_photo(&self, file_name: &str) -> Result<Vec<u8>>;
}

#[derive(Clone)]
pub struct FileBasedPhotoStore {
    photos_folder: String,
}

impl FileBasedPhotoStore {
    pub async fn new(data_dir: &str, photos_path: &str) -> Result<Self> {
        let photos_folder = file_storage_path(data_dir, photos_path).await?;
        Ok(Self { photos_folder })
    }

    fn photo_path(&self, file_name: &str) -> PathBuf {
        PathBuf::from(self.photos_folder.as_str()).join(file_name)
    }
}

#[async_trait]
impl PhotoStoreApi for FileBasedPhotoStore {
    async fn save_photo(&self, file_name: &str, bytes: &[u8]) -> Result<()> {
        // concurrent first uploads may race to create the folder, so
        // create_dir_all, which treats "already exists" as success
        if !Path::new(&self.photos_folder).exists() {
            create_dir_all(&self.photos_folder).await?;
        }
        // write to a uniquely named temp file and rename for a best-effort
        // atomic replace, so concurrent writers of the same photo never
        // share a temp file
        let path = self.photo_path(file_name);
        let tmp_path = self.photo_path(&format!("{}.{}.tmp", file_name, util::get_uuid_v4()));
        write(&tmp_path, bytes).await?;
        rename(&tmp_path, &path).await?;
        Ok(())
    }

    async fn open_photo(&self, file_name: &str) -> Result<Vec<u8>> {
        let path = self.photo_path(file_name);
        if !path.exists() {
            return Err(Error::NoSuchEntity(
                "photo".to_string(),
                file_name.to_string(),
            ));
        }
        let bytes = read(path).await?;
        Ok(bytes)
    }
}
