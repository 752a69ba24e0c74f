pub mod handlers;
pub mod state;

#[cfg(test)]
pub(crate) mod testing {
    use actix_web::{web, App};
    use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
    use actix_web::body::MessageBody;

    use crate::api::state::AppState;
    use crate::domain::UserRole;
    use crate::routes::{private_routes, public_routes};
    use crate::utils::config::AppConfig;
    use crate::utils::security::auth::AuthUtils;

    pub fn state() -> AppState {
        AppState::in_memory(AppConfig::test_config())
    }

    pub fn app(
        state: AppState,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Response = ServiceResponse<impl MessageBody>,
            Config = (),
            InitError = (),
            Error = actix_web::Error,
        >,
    > {
        let secret_key = std::sync::Arc::new(state.config.secret_key.clone());
        App::new()
            .app_data(web::Data::new(state))
            .configure(public_routes)
            .configure(|cfg| private_routes(cfg, secret_key))
    }

    pub fn bearer(state: &AppState) -> (&'static str, String) {
        let token = AuthUtils::generate_access_token(
            "george",
            &[UserRole::Owner],
            &state.config.secret_key,
            state.config.access_token_minutes,
        ).unwrap();
        ("Authorization", format!("Bearer {}", token))
    }
}
