use actix_web::{http::header, web, HttpResponse};
use chrono::{Local, NaiveDate};
use mongodb::bson::oid::ObjectId;
use serde::Deserialize;
use serde_json::json;

use crate::api::state::AppState;
use crate::domain::owner::form::{OwnerForm, PetForm, VisitForm};
use crate::domain::owner::model::Owner;
use crate::domain::owner::reminder::send_owner_reminder;
use crate::domain::owner::service::{self, AgeSearchOutcome, OwnerSearchOutcome};
use crate::domain::pagination::PageRequest;
use crate::domain::validation::ValidationErrors;
use crate::utils::errors::ApiError;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OwnerSearchQuery {
    pub last_name: Option<String>,
    pub page: Option<i64>,
}

#[derive(Deserialize, Debug)]
pub struct AgeSearchQuery {
    pub age: Option<i64>,
    pub page: Option<i64>,
}

#[derive(Deserialize, Debug)]
pub struct OwnerPath {
    pub owner_id: String,
}

#[derive(Deserialize, Debug)]
pub struct PetPath {
    pub owner_id: String,
    pub pet_id: String,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// A malformed id cannot name a stored record, so it reads as not found.
fn parse_id(raw: &str, kind: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw).map_err(|_| ApiError::NotFound(format!("{} {} not found", kind, raw)))
}

fn page_request(page: Option<i64>) -> Result<PageRequest, ApiError> {
    page.map(PageRequest::new).unwrap_or_else(|| Ok(PageRequest::first()))
}

fn owner_location(owner: &Owner) -> String {
    format!("/owners/{}", owner.id.map(|id| id.to_hex()).unwrap_or_default())
}

pub async fn find_owners_form() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "lastName": "" }))
}

pub async fn find_owners(
    state: web::Data<AppState>,
    query: web::Query<OwnerSearchQuery>,
) -> Result<HttpResponse, ApiError> {
    let query = query.into_inner();
    let page = page_request(query.page)?;

    match service::search_by_last_name(state.owners.as_ref(), query.last_name.as_deref(), page).await? {
        OwnerSearchOutcome::NotFound => Err(OwnerSearchOutcome::not_found_error()),
        OwnerSearchOutcome::DirectHit(owner) => Ok(HttpResponse::SeeOther()
            .insert_header((header::LOCATION, owner_location(&owner)))
            .finish()),
        OwnerSearchOutcome::Listing(results) => {
            let today = today();
            Ok(HttpResponse::Ok().json(results.map(|owner| owner.to_send(today))))
        }
    }
}

pub async fn find_owners_by_age(
    state: web::Data<AppState>,
    query: web::Query<AgeSearchQuery>,
) -> Result<HttpResponse, ApiError> {
    let query = query.into_inner();
    let age = query.age.ok_or_else(|| {
        ApiError::Validation(ValidationErrors::single("age", "required", "age is required"))
    })?;
    let page = page_request(query.page)?;
    let today = today();

    match service::search_by_age(state.owners.as_ref(), age, page, today).await? {
        AgeSearchOutcome::NoMatches { message } => Ok(HttpResponse::Ok().json(json!({
            "message": message,
            "items": [],
            "totalItems": 0,
        }))),
        AgeSearchOutcome::Listing(results) => {
            Ok(HttpResponse::Ok().json(results.map(|owner| owner.to_send(today))))
        }
    }
}

pub async fn new_owner_form() -> HttpResponse {
    HttpResponse::Ok().json(OwnerForm::default())
}

pub async fn create_owner(
    state: web::Data<AppState>,
    form: web::Json<OwnerForm>,
) -> Result<HttpResponse, ApiError> {
    let today = today();
    let owner = service::create_owner(state.owners.as_ref(), form.into_inner(), today).await?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, owner_location(&owner)))
        .json(owner.to_send(today)))
}

pub async fn show_owner(
    state: web::Data<AppState>,
    path: web::Path<OwnerPath>,
) -> Result<HttpResponse, ApiError> {
    let owner_id = parse_id(&path.owner_id, "Owner")?;
    let owner = service::load_owner(state.owners.as_ref(), owner_id).await?;
    Ok(HttpResponse::Ok().json(owner.to_send(today())))
}

pub async fn edit_owner_form(
    state: web::Data<AppState>,
    path: web::Path<OwnerPath>,
) -> Result<HttpResponse, ApiError> {
    let owner_id = parse_id(&path.owner_id, "Owner")?;
    let owner = service::load_owner(state.owners.as_ref(), owner_id).await?;
    Ok(HttpResponse::Ok().json(OwnerForm::from_owner(&owner)))
}

pub async fn update_owner(
    state: web::Data<AppState>,
    path: web::Path<OwnerPath>,
    form: web::Json<OwnerForm>,
) -> Result<HttpResponse, ApiError> {
    let owner_id = parse_id(&path.owner_id, "Owner")?;
    let today = today();
    let owner = service::update_owner(state.owners.as_ref(), owner_id, form.into_inner(), today).await?;
    Ok(HttpResponse::Ok().json(owner.to_send(today)))
}

pub async fn delete_owner(
    state: web::Data<AppState>,
    path: web::Path<OwnerPath>,
) -> Result<HttpResponse, ApiError> {
    let owner_id = parse_id(&path.owner_id, "Owner")?;
    service::delete_owner(state.owners.as_ref(), owner_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Owner has been deleted successfully" })))
}

pub async fn create_pet(
    state: web::Data<AppState>,
    path: web::Path<OwnerPath>,
    form: web::Json<PetForm>,
) -> Result<HttpResponse, ApiError> {
    let owner_id = parse_id(&path.owner_id, "Owner")?;
    let (owner, pet) = service::add_pet(state.owners.as_ref(), owner_id, form.into_inner(), today()).await?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, owner_location(&owner)))
        .json(pet.to_send()))
}

pub async fn update_pet(
    state: web::Data<AppState>,
    path: web::Path<PetPath>,
    form: web::Json<PetForm>,
) -> Result<HttpResponse, ApiError> {
    let owner_id = parse_id(&path.owner_id, "Owner")?;
    let pet_id = parse_id(&path.pet_id, "Pet")?;
    let (_, pet) = service::update_pet(state.owners.as_ref(), owner_id, pet_id, form.into_inner(), today()).await?;
    Ok(HttpResponse::Ok().json(pet.to_send()))
}

pub async fn add_visit(
    state: web::Data<AppState>,
    path: web::Path<PetPath>,
    form: web::Json<VisitForm>,
) -> Result<HttpResponse, ApiError> {
    let owner_id = parse_id(&path.owner_id, "Owner")?;
    let pet_id = parse_id(&path.pet_id, "Pet")?;
    let owner = service::add_visit(
        state.owners.as_ref(),
        state.vets.as_ref(),
        owner_id,
        pet_id,
        form.into_inner(),
        today(),
    ).await?;

    let pet = owner
        .get_pet(pet_id)
        .ok_or_else(|| ApiError::NotFound(format!("Pet {} not found", pet_id.to_hex())))?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, owner_location(&owner)))
        .json(pet.to_send()))
}

pub async fn send_reminder(
    state: web::Data<AppState>,
    path: web::Path<OwnerPath>,
) -> Result<HttpResponse, ApiError> {
    let owner_id = parse_id(&path.owner_id, "Owner")?;
    let owner = service::load_owner(state.owners.as_ref(), owner_id).await?;
    let reminder = send_owner_reminder(&owner, &mut rand::rng());
    Ok(HttpResponse::Ok().json(reminder))
}
