use crate::service::contact_service::{Contact, ContactPage};
use std::{collections::HashMap, path::Path};

use super::{file_storage_path, Result};
use crate::util;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ContactStoreApi: Send + Sync {
    /// Inserts, or fully overwrites, the contact under its id and returns
    /// the persisted value. An empty id is replaced by a generated one.
    async fn save(&self, contact: Contact) -> Result<Contact>;

    /// Returns the contact with the given id, if there is one.
    async fn by_id(&self, id: &str) -> Result<Option<Contact>>;

    /// Deletes the contact with the given id. Does nothing if there is no
    /// contact with that id.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Returns the given zero-based page of contacts, sorted ascending
    /// by name.
    async fn find_all(&self, page: usize, size: usize) -> Result<ContactPage>;
}

#[derive(Clone)]
pub struct FileBasedContactStore {
    file: String,
}

/// Just some shortcuts for read and write here
impl FileBasedContactStore {
    pub async fn new(data_dir: &str, path: &str, file_name: &str) -> Result<Self> {
        let directory = file_storage_path(data_dir, path).await?;
        Ok(Self {
            file: format!("{}/{}", directory, file_name),
        })
    }

    async fn write(&self, contacts: HashMap<String, Contact>) -> Result<()> {
        write_contacts_map(&self.file, contacts).await
    }

    async fn read(&self) -> Result<HashMap<String, Contact>> {
        read_contacts_map(&self.file).await
    }
}

#[async_trait]
impl ContactStoreApi for FileBasedContactStore {
    async fn save(&self, mut contact: Contact) -> Result<Contact> {
        if contact.id.is_empty() {
            contact.id = util::get_uuid_v4().to_string();
        }
        let mut current = self.read().await?;
        current.insert(contact.id.clone(), contact.clone());
        self.write(current).await?;
        Ok(contact)
    }

    async fn by_id(&self, id: &str) -> Result<Option<Contact>> {
        let contact = self.read().await?.get(id).map(|c| c.to_owned());
        Ok(contact)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut current = self.read().await?;
        current.remove(id);
        self.write(current).await?;
        Ok(())
    }

    async fn find_all(&self, page: usize, size: usize) -> Result<ContactPage> {
        let mut contacts: Vec<Contact> = self.read().await?.into_values().collect();
        contacts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(ContactPage::paginate(contacts, page, size))
    }
}

async fn write_contacts_map(file: &str, map: HashMap<String, Contact>) -> Result<()> {
    let contacts_bytes = serde_json::to_vec(&map)?;
    tokio::fs::write(file, contacts_bytes).await?;
    Ok(())
}

async fn read_contacts_map(file: &str) -> Result<HashMap<String, Contact>> {
    if !Path::new(file).exists() {
        create_contacts_map(file).await?;
    }
    let data = tokio::fs::read(file).await?;
    let contacts: HashMap<String, Contact> = serde_json::from_slice(&data)?;
    Ok(contacts)
}

async fn create_contacts_map(file: &str) -> Result<()> {
    let contacts: HashMap<String, Contact> = HashMap::new();
    write_contacts_map(file, contacts).await?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    async fn get_store() -> (tempfile::TempDir, FileBasedContactStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBasedContactStore::new(
            dir.path().to_str().unwrap(),
            "contacts",
            "contacts.json",
        )
        .await
        .unwrap();
        (dir, store)
    }

    fn contact(id: &str, name: &str) -> Contact {
        Contact {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{name}@example.com"),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn save_then_by_id_returns_identical_contact() {
        let (_dir, store) = get_store().await;
        let saved = store.save(contact("abc123", "Minka")).await.unwrap();
        let fetched = store.by_id("abc123").await.unwrap().unwrap();
        assert_eq!(saved, fetched);
        assert_eq!(fetched.email, "Minka@example.com");
    }

    #[tokio::test]
    async fn save_assigns_id_when_empty() {
        let (_dir, store) = get_store().await;
        let saved = store.save(contact("", "Minka")).await.unwrap();
        assert!(!saved.id.is_empty());
        assert!(store.by_id(&saved.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn save_overwrites_existing_contact() {
        let (_dir, store) = get_store().await;
        store.save(contact("abc123", "Minka")).await.unwrap();
        store.save(contact("abc123", "Moritz")).await.unwrap();
        let fetched = store.by_id("abc123").await.unwrap().unwrap();
        assert_eq!(fetched.name, "Moritz");
    }

    #[tokio::test]
    async fn by_id_returns_none_for_unknown_id() {
        let (_dir, store) = get_store().await;
        assert!(store.by_id("no_such_id").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_then_by_id_returns_none() {
        let (_dir, store) = get_store().await;
        store.save(contact("abc123", "Minka")).await.unwrap();
        store.delete("abc123").await.unwrap();
        assert!(store.by_id("abc123").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_of_unknown_id_succeeds() {
        let (_dir, store) = get_store().await;
        assert!(store.delete("no_such_id").await.is_ok());
    }

    #[tokio::test]
    async fn find_all_sorts_ascending_by_name() {
        let (_dir, store) = get_store().await;
        store.save(contact("1", "Charlie")).await.unwrap();
        store.save(contact("2", "Alice")).await.unwrap();
        store.save(contact("3", "Bob")).await.unwrap();
        let page = store.find_all(0, 10).await.unwrap();
        let names: Vec<&str> = page.content.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Charlie"]);
        assert_eq!(page.total_elements, 3);
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn find_all_paginates() {
        let (_dir, store) = get_store().await;
        store.save(contact("1", "Charlie")).await.unwrap();
        store.save(contact("2", "Alice")).await.unwrap();
        store.save(contact("3", "Bob")).await.unwrap();
        let page = store.find_all(1, 2).await.unwrap();
        let names: Vec<&str> = page.content.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Charlie"]);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn find_all_page_beyond_last_is_empty() {
        let (_dir, store) = get_store().await;
        store.save(contact("1", "Alice")).await.unwrap();
        let page = store.find_all(5, 10).await.unwrap();
        assert!(page.content.is_empty());
        assert_eq!(page.total_elements, 1);
    }

    #[tokio::test]
    async fn find_all_on_empty_store_is_empty() {
        let (_dir, store) = get_store().await;
        let page = store.find_all(0, 10).await.unwrap();
        assert!(page.content.is_empty());
        assert_eq!(page.total_elements, 0);
    }
}
