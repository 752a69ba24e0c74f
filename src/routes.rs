use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::api::handlers::owner_handlers::{
    add_visit, create_owner, create_pet, delete_owner, edit_owner_form, find_owners,
    find_owners_form, find_owners_by_age, new_owner_form, send_reminder, show_owner,
    update_owner, update_pet,
};
use crate::api::handlers::user_handlers::{create_user, login_user};
use crate::api::handlers::vet_handlers::{get_all_vets, get_most_active_vets, get_vets, get_vets_with_pets};
use crate::utils::errors::ApiError;
use crate::utils::security::jwt::JwtMiddleware;

async fn entry_point() -> HttpResponse {
    HttpResponse::Ok().body("Welcome to the PetClinic API. Use /register and /login to obtain an access token.")
}

pub fn public_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _| ApiError::BadRequest(err.to_string()).into())
    );
    cfg.app_data(
        web::QueryConfig::default()
            .error_handler(|err, _| ApiError::BadRequest(err.to_string()).into())
    );

    cfg.service(
        web::resource("/")
            .route(web::get().to(entry_point))
    );

    cfg.service(
        web::resource("/register")
            .route(web::post().to(create_user))
    );

    cfg.service(
        web::resource("/login")
            .route(web::post().to(login_user))
    );
}

/// Owner and vet routes; every request needs a valid access token.
pub fn private_routes(cfg: &mut web::ServiceConfig, secret_key: Arc<String>) {
    // Literal segments come before `/{id}` so they are not taken for ids.
    cfg.service(
        web::scope("/owners")
            .wrap(JwtMiddleware { secret_key: Arc::clone(&secret_key) })
            .route("", web::get().to(find_owners))
            .route("/find", web::get().to(find_owners_form))
            .route("/age", web::get().to(find_owners_by_age))
            .route("/new", web::get().to(new_owner_form))
            .route("/new", web::post().to(create_owner))
            .route("/{owner_id}", web::get().to(show_owner))
            .route("/{owner_id}/edit", web::get().to(edit_owner_form))
            .route("/{owner_id}/edit", web::post().to(update_owner))
            .route("/{owner_id}/delete", web::get().to(delete_owner))
            .route("/{owner_id}/reminder", web::post().to(send_reminder))
            .route("/{owner_id}/pets/new", web::post().to(create_pet))
            .route("/{owner_id}/pets/{pet_id}/edit", web::post().to(update_pet))
            .route("/{owner_id}/pets/{pet_id}/visits/new", web::post().to(add_visit))
    );

    cfg.service(
        web::scope("/vets")
            .wrap(JwtMiddleware { secret_key })
            .route("", web::get().to(get_vets))
            .route("/all", web::get().to(get_all_vets))
            .route("/most-active", web::get().to(get_most_active_vets))
            .route("/with-pets", web::get().to(get_vets_with_pets))
    );
}
