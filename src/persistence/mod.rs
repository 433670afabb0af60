pub mod contact;
pub mod photo;

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::config::Config;
use crate::constants::{CONTACTS_FILE_NAME, CONTACTS_FOLDER, PHOTOS_FOLDER};

/// Generic persistence result type
pub type Result<T> = std::result::Result<T, Error>;

/// Generic persistence error type
#[derive(Debug, Error)]
pub enum Error {
    #[error("io error {0}")]
    Io(#[from] std::io::Error),

    #[error("unable to serialize/deserialize to/from JSON {0}")]
    Json(#[from] serde_json::Error),

    #[error("no such {0} entity {1}")]
    NoSuchEntity(String, String),
}

pub use contact::{ContactStoreApi, FileBasedContactStore};
pub use photo::{FileBasedPhotoStore, PhotoStoreApi};

/// A container for all persistence implementations the services depend on
#[derive(Clone)]
pub struct DbContext {
    pub contact_store: Arc<dyn ContactStoreApi>,
    pub photo_store: Arc<dyn PhotoStoreApi>,
}

/// Creates the stores and returns a context with them
pub async fn get_db_context(conf: &Config) -> Result<DbContext> {
    let contact_store = Arc::new(
        FileBasedContactStore::new(&conf.data_dir, CONTACTS_FOLDER, CONTACTS_FILE_NAME).await?,
    );
    let photo_store = Arc::new(FileBasedPhotoStore::new(&conf.data_dir, PHOTOS_FOLDER).await?);
    Ok(DbContext {
        contact_store,
        photo_store,
    })
}

/// Given a base path and a directory path, ensures that the directory
/// exists and returns the full path.
pub async fn file_storage_path(data_dir: &str, path: &str) -> Result<String> {
    let directory = format!("{}/{}", data_dir, path);
    if !Path::new(&directory).exists() {
        tokio::fs::create_dir_all(&directory).await?;
    }
    Ok(directory)
}
