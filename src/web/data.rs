use rocket::fs::TempFile;
use rocket::FromForm;
use serde::{Deserialize, Serialize};

use crate::service::contact_service::Contact;

#[derive(Debug, Serialize, Deserialize)]
pub struct NewContactPayload {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub status: String,
}

impl From<NewContactPayload> for Contact {
    fn from(payload: NewContactPayload) -> Self {
        Self {
            id: payload.id,
            name: payload.name,
            email: payload.email,
            title: payload.title,
            phone: payload.phone,
            address: payload.address,
            status: payload.status,
            photo_url: None,
        }
    }
}

#[derive(Debug, FromForm)]
pub struct UploadPhotoForm<'r> {
    pub id: String,
    pub file: TempFile<'r>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadPhotoResponse {
    pub photo_url: String,
}
