use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::api::state::AppState;
use crate::domain::pagination::PageRequest;
use crate::domain::vet::model::Vet;
use crate::domain::vet::service;
use crate::utils::errors::ApiError;

#[derive(Deserialize, Debug)]
pub struct VetPageQuery {
    pub page: Option<i64>,
}

pub async fn get_vets(
    state: web::Data<AppState>,
    query: web::Query<VetPageQuery>,
) -> Result<HttpResponse, ApiError> {
    let page = match query.page {
        Some(page) => PageRequest::new(page)?,
        None => PageRequest::first(),
    };

    let vets = state.vets.get_vets_page(page).await?;
    Ok(HttpResponse::Ok().json(vets.map(|vet| vet.to_send())))
}

pub async fn get_all_vets(
    state: web::Data<AppState>
) -> Result<HttpResponse, ApiError> {
    let vets = state.vets.get_all_vets().await?;
    Ok(HttpResponse::Ok().json(vets.iter().map(Vet::to_send).collect::<Vec<_>>()))
}

pub async fn get_most_active_vets(
    state: web::Data<AppState>
) -> Result<HttpResponse, ApiError> {
    let activity = service::most_active_vets(state.vets.as_ref(), state.owners.as_ref()).await?;
    Ok(HttpResponse::Ok().json(activity))
}

pub async fn get_vets_with_pets(
    state: web::Data<AppState>
) -> Result<HttpResponse, ApiError> {
    let listing = service::vets_with_treated_pets(state.vets.as_ref(), state.owners.as_ref()).await?;
    Ok(HttpResponse::Ok().json(listing))
}
