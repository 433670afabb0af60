use crate::service::contact_service::{Contact, ContactPage};
use crate::service::{Result, ServiceContext};
use crate::util::file::{detect_content_type_for_bytes, UploadFileHandler};
use crate::web::data::{NewContactPayload, UploadPhotoForm, UploadPhotoResponse};
use rocket::form::Form;
use rocket::http::{ContentType, Status};
use rocket::serde::json::Json;
use rocket::{delete, get, post, put, State};

#[get("/?<page>&<size>")]
pub async fn return_contacts(
    state: &State<ServiceContext>,
    page: Option<usize>,
    size: Option<usize>,
) -> Result<Json<ContactPage>> {
    let contacts = state
        .contact_service
        .list_contacts(page.unwrap_or(0), size.unwrap_or(10))
        .await?;
    Ok(Json(contacts))
}

#[get("/<id>")]
pub async fn return_contact(state: &State<ServiceContext>, id: &str) -> Result<Json<Contact>> {
    let contact = state.contact_service.get_contact(id).await?;
    Ok(Json(contact))
}

#[post("/", format = "json", data = "<new_contact_payload>")]
pub async fn new_contact(
    state: &State<ServiceContext>,
    new_contact_payload: Json<NewContactPayload>,
) -> Result<Json<Contact>> {
    let contact = state
        .contact_service
        .create_contact(new_contact_payload.0.into())
        .await?;
    Ok(Json(contact))
}

#[delete("/<id>")]
pub async fn remove_contact(state: &State<ServiceContext>, id: &str) -> Result<Status> {
    state.contact_service.delete_contact(id).await?;
    Ok(Status::Ok)
}

#[put("/photo", data = "<photo_upload_form>")]
pub async fn upload_photo(
    state: &State<ServiceContext>,
    photo_upload_form: Form<UploadPhotoForm<'_>>,
) -> Result<Json<UploadPhotoResponse>> {
    let form = photo_upload_form.into_inner();
    let upload_file_handler: &dyn UploadFileHandler = &form.file as &dyn UploadFileHandler;

    let photo_url = state
        .contact_service
        .upload_photo(&form.id, upload_file_handler)
        .await?;

    Ok(Json(UploadPhotoResponse { photo_url }))
}

#[get("/image/<file_name>")]
pub async fn get_image(
    state: &State<ServiceContext>,
    file_name: &str,
) -> Result<(ContentType, Vec<u8>)> {
    let file_bytes = state.contact_service.open_photo(file_name).await?;

    let content_type = detect_content_type_for_bytes(&file_bytes)
        .and_then(|t| ContentType::parse_flexible(&t))
        .unwrap_or(ContentType::Binary);

    Ok((content_type, file_bytes))
}
