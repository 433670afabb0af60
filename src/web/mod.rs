use crate::service::ServiceContext;
use log::info;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::{catch, catchers, routes, Build, Config, Request, Response, Rocket};
use serde::Serialize;

pub mod data;
mod handlers;

use crate::constants::MAX_FILE_SIZE_BYTES;
use rocket::data::ByteUnit;
use rocket::figment::Figment;
use rocket::serde::json::Json;

#[derive(Serialize, Debug, Clone)]
pub struct ErrorResponse {
    error: &'static str,
    message: String,
    code: u16,
}

impl ErrorResponse {
    pub fn new(error: &'static str, message: String, code: u16) -> Self {
        Self {
            error,
            message,
            code,
        }
    }
}

pub fn rocket_main(context: ServiceContext) -> Rocket<Build> {
    let conf = context.config.clone();
    let config = Figment::from(Config::default())
        .merge(("limits.forms", ByteUnit::Byte(MAX_FILE_SIZE_BYTES as u64)))
        .merge(("limits.file", ByteUnit::Byte(MAX_FILE_SIZE_BYTES as u64)))
        .merge((
            "limits.data-form",
            ByteUnit::Byte(MAX_FILE_SIZE_BYTES as u64),
        ))
        .merge(("port", conf.http_port))
        .merge(("address", conf.http_address.to_owned()));

    let rocket = rocket::custom(config)
        .register("/", catchers![default_catcher, not_found])
        .manage(context)
        .mount(
            "/contacts",
            routes![
                handlers::contacts::return_contacts,
                handlers::contacts::return_contact,
                handlers::contacts::new_contact,
                handlers::contacts::remove_contact,
                handlers::contacts::upload_photo,
                handlers::contacts::get_image,
            ],
        )
        .attach(Cors);

    info!("HTTP Server Listening on {}", conf.http_listen_url());

    rocket
}

struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, PATCH, OPTIONS, PUT, DELETE",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

#[catch(default)]
pub fn default_catcher(status: Status, _req: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        "error",
        status.reason().unwrap_or("Unknown error").to_string(),
        status.code,
    ))
}

#[catch(404)]
pub fn not_found(req: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        "not_found",
        format!("We couldn't find the requested path '{}'", req.uri()),
        404,
    ))
}
