use std::sync::Arc;

use async_trait::async_trait;
use log::{error, info};
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_FILE_NAME_CHARACTERS, MAX_FILE_SIZE_BYTES, PHOTO_ROUTE_PREFIX};
use crate::persistence::{self, ContactStoreApi, PhotoStoreApi};
use crate::util::file::{photo_file_name, UploadFileHandler};

use super::{Error, Result};

#[async_trait]
pub trait ContactServiceApi: Send + Sync {
    /// Returns the given zero-based page of contacts, sorted ascending by name.
    /// A page past the last one is empty, not an error.
    async fn list_contacts(&self, page: usize, size: usize) -> Result<ContactPage>;

    /// Returns the contact with the given id, or a not found error if there
    /// is none.
    async fn get_contact(&self, id: &str) -> Result<Contact>;

    /// Persists the given contact, inserting or fully overwriting it by id,
    /// and returns the persisted value with store-assigned fields filled in.
    async fn create_contact(&self, contact: Contact) -> Result<Contact>;

    /// Deletes the contact with the given id. Deleting an unknown id is a
    /// no-op, so repeated deletes are side-effect-free.
    async fn delete_contact(&self, id: &str) -> Result<()>;

    /// Stores the uploaded file as the photo of the contact with the given
    /// id, sets the contact's photo url and returns it. The photo file is
    /// named after the contact id, so a re-upload replaces the previous
    /// photo in place.
    async fn upload_photo(&self, id: &str, file: &dyn UploadFileHandler) -> Result<String>;

    /// Reads the photo bytes stored under the given file name.
    async fn open_photo(&self, file_name: &str) -> Result<Vec<u8>>;
}

/// The contact service is responsible for managing the contact records and
/// their photos.
#[derive(Clone)]
pub struct ContactService {
    store: Arc<dyn ContactStoreApi>,
    photo_store: Arc<dyn PhotoStoreApi>,
}

impl ContactService {
    pub fn new(store: Arc<dyn ContactStoreApi>, photo_store: Arc<dyn PhotoStoreApi>) -> Self {
        Self { store, photo_store }
    }

    fn validated_file_name(&self, file: &dyn UploadFileHandler) -> Result<String> {
        let name = match file.name() {
            Some(n) if !n.is_empty() => n,
            _ => {
                return Err(Error::Validation(String::from("File name needs to be set")));
            }
        };

        if name.len() > MAX_FILE_NAME_CHARACTERS {
            return Err(Error::Validation(format!(
                "File name needs to have between 1 and {} characters",
                MAX_FILE_NAME_CHARACTERS
            )));
        }

        if file.len() > MAX_FILE_SIZE_BYTES as u64 {
            return Err(Error::Validation(format!(
                "Maximum file size is {} bytes",
                MAX_FILE_SIZE_BYTES
            )));
        }
        Ok(name)
    }
}

#[async_trait]
impl ContactServiceApi for ContactService {
    async fn list_contacts(&self, page: usize, size: usize) -> Result<ContactPage> {
        Ok(self.store.find_all(page, size).await?)
    }

    async fn get_contact(&self, id: &str) -> Result<Contact> {
        self.store
            .by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound(id.to_owned()))
    }

    async fn create_contact(&self, contact: Contact) -> Result<Contact> {
        Ok(self.store.save(contact).await?)
    }

    async fn delete_contact(&self, id: &str) -> Result<()> {
        self.store.delete(id).await?;
        Ok(())
    }

    async fn upload_photo(&self, id: &str, file: &dyn UploadFileHandler) -> Result<String> {
        info!("saving photo for contact {id}");
        let mut contact = self.get_contact(id).await?;

        let original_name = self.validated_file_name(file)?;
        let file_name = photo_file_name(id, &original_name);

        let bytes = file.get_contents().await.map_err(|e| {
            error!("could not read uploaded file {original_name}: {e}");
            Error::Storage(original_name.clone())
        })?;
        // the file is written before the record is saved, so a failed write
        // never leaves a contact pointing at a missing photo
        self.photo_store
            .save_photo(&file_name, &bytes)
            .await
            .map_err(|e| {
                error!("could not store photo {file_name}: {e}");
                Error::Storage(original_name.clone())
            })?;

        let photo_url = format!("{PHOTO_ROUTE_PREFIX}{file_name}");
        // a store failure from here on leaves the written photo file behind
        // with no record referencing it, there is no compensation for that
        contact.photo_url = Some(photo_url.clone());
        self.store.save(contact).await?;
        Ok(photo_url)
    }

    async fn open_photo(&self, file_name: &str) -> Result<Vec<u8>> {
        self.photo_store
            .open_photo(file_name)
            .await
            .map_err(|e| match e {
                persistence::Error::NoSuchEntity(_, _) => Error::NotFound(file_name.to_owned()),
                other => Error::Persistence(other),
            })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Eq, PartialEq, Default)]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub email: String,
    pub title: String,
    pub phone: String,
    pub address: String,
    pub status: String,
    pub photo_url: Option<String>,
}

/// One page of a contact listing, with its pagination metadata.
#[derive(Debug, Serialize, Deserialize, Clone, Eq, PartialEq)]
pub struct ContactPage {
    pub content: Vec<Contact>,
    pub page: usize,
    pub size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
}

impl ContactPage {
    /// Cuts the given zero-based page out of the full, already sorted list
    /// of contacts. A page past the end, or a size of zero, yields an empty
    /// page.
    pub fn paginate(all: Vec<Contact>, page: usize, size: usize) -> Self {
        let total_elements = all.len();
        let total_pages = match size {
            0 => 0,
            s => total_elements.div_ceil(s),
        };
        let content = all
            .into_iter()
            .skip(page.saturating_mul(size))
            .take(size)
            .collect();
        Self {
            content,
            page,
            size,
            total_elements,
            total_pages,
        }
    }
}
