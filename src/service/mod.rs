pub mod contact_service;

use crate::config::Config;
use crate::persistence::{self, DbContext};
use contact_service::{ContactService, ContactServiceApi};
use log::error;
use rocket::http::ContentType;
use rocket::Response;
use rocket::{http::Status, response::Responder};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;
use thiserror::Error;

/// Generic result type
pub type Result<T> = std::result::Result<T, Error>;

/// Generic error type
#[derive(Debug, Error)]
pub enum Error {
    /// all errors originating from the persistence layer
    #[error("Persistence error: {0}")]
    Persistence(#[from] persistence::Error),

    /// errors for entities that were requested but don't exist
    #[error("not found: {0}")]
    NotFound(String),

    /// errors while storing an uploaded file, carrying the original file
    /// name for diagnostics
    #[error("could not store file {0}")]
    Storage(String),

    /// errors that stem from validation
    #[error("Validation Error: {0}")]
    Validation(String),
}

/// Map from service errors directly to rocket status codes. This allows us to
/// write handlers that return `Result<T, service::Error>` and still return the correct
/// status code.
impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &rocket::Request) -> rocket::response::Result<'o> {
        match self {
            // for now handle all persistence errors as InternalServerError, there
            // will be cases where we want to handle them differently (eg. 409 Conflict)
            Error::Persistence(e) => {
                error!("{e}");
                Status::InternalServerError.respond_to(req)
            }
            Error::NotFound(_) => Status::NotFound.respond_to(req),
            Error::Storage(e) => {
                error!("could not store file {e}");
                Status::InternalServerError.respond_to(req)
            }
            Error::Validation(msg) => build_validation_response(msg),
        }
    }
}

fn build_validation_response<'o>(msg: String) -> rocket::response::Result<'o> {
    let body = json!({ "error": "validation_error", "message": msg }).to_string();
    Response::build()
        .status(Status::BadRequest)
        .header(ContentType::JSON)
        .sized_body(body.len(), Cursor::new(body))
        .ok()
}

/// A dependency container for all services that are used by the application
#[derive(Clone)]
pub struct ServiceContext {
    pub config: Config,
    pub contact_service: Arc<dyn ContactServiceApi>,
}

impl ServiceContext {
    pub fn new(config: Config, contact_service: ContactService) -> Self {
        Self {
            config,
            contact_service: Arc::new(contact_service),
        }
    }
}

/// building up the service context dependencies here for now. Later we can modularize this
/// and make it more flexible.
pub async fn create_service_context(config: Config, db: DbContext) -> Result<ServiceContext> {
    let contact_service = ContactService::new(db.contact_store, db.photo_store);
    Ok(ServiceContext::new(config, contact_service))
}
