use actix_web::{web, HttpResponse};

use crate::api::state::AppState;
use crate::domain::user::model::{UserLoginReceive, UserRegisterReceive};
use crate::domain::user::service;
use crate::utils::errors::ApiError;

pub async fn create_user(
    state: web::Data<AppState>,
    user: web::Json<UserRegisterReceive>
) -> Result<HttpResponse, ApiError> {
    let user = service::register(state.users.as_ref(), user.into_inner()).await?;
    Ok(HttpResponse::Created().json(user))
}

pub async fn login_user(
    state: web::Data<AppState>,
    credentials: web::Json<UserLoginReceive>
) -> Result<HttpResponse, ApiError> {
    let config = &state.config;

    let user = service::login(
        state.users.as_ref(),
        credentials.into_inner(),
        &config.secret_key,
        config.access_token_minutes,
    ).await?;
    Ok(HttpResponse::Ok().json(user))
}
