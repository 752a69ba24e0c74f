use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use petclinic_service::{
    api::state::AppState,
    domain::user::service::bootstrap_admin,
    infrastructure::{database::mongo_context::MongoContext, memory::seed::seed_demo_data, mongo::MongoUserRepository},
    routes::{private_routes, public_routes},
    utils::{config::{AppConfig, StorageBackend}, logger::init_logger},
};

#[tokio::main]
async fn main() -> std::io::Result<()> {

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logger(config.log_format);

    let state = match config.storage_backend {
        StorageBackend::Mongo => {
            let database_url = config.database_url.clone().unwrap_or_default();
            let mongo_context = match MongoContext::init(&database_url, &config.database_name).await {
                Ok(context) => context,
                Err(e) => {
                    tracing::error!(error = %e, "failed to connect to MongoDB");
                    std::process::exit(1);
                }
            };

            if let Err(e) = MongoUserRepository::new(&mongo_context).ensure_indexes().await {
                tracing::error!(error = %e, "failed to create user indexes");
                std::process::exit(1);
            }

            if config.seed_demo_data {
                tracing::warn!("SEED_DEMO_DATA is ignored for the mongo backend");
            }
            AppState::mongo(&mongo_context, config.clone())
        }
        StorageBackend::Memory => {
            let state = AppState::in_memory(config.clone());
            if config.seed_demo_data {
                if let Err(e) = seed_demo_data(state.owners.as_ref(), state.vets.as_ref()).await {
                    tracing::error!(error = %e, "failed to load demo data");
                    std::process::exit(1);
                }
            }
            state
        }
    };

    if let (Some(username), Some(password)) = (&config.admin_username, &config.admin_password) {
        if let Err(e) = bootstrap_admin(state.users.as_ref(), username, password).await {
            tracing::error!(error = %e, "failed to create admin account");
            std::process::exit(1);
        }
    }

    let secret_key = Arc::new(config.secret_key.clone());
    tracing::info!(address = %config.bind_address, backend = ?config.storage_backend, "starting server");

    HttpServer::new(move || {
        let secret_key = Arc::clone(&secret_key);
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(public_routes)
            .configure(|cfg| private_routes(cfg, secret_key))
    })
    .bind(&config.bind_address)?
    .run()
    .await
}
