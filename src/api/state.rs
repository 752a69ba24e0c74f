use std::sync::Arc;

use crate::domain::owner::repository::OwnerRepository;
use crate::domain::user::repository::UserRepository;
use crate::domain::vet::repository::VetRepository;
use crate::infrastructure::database::mongo_context::MongoContext;
use crate::infrastructure::memory::{InMemoryOwnerRepository, InMemoryUserRepository, InMemoryVetRepository};
use crate::infrastructure::mongo::{MongoOwnerRepository, MongoUserRepository, MongoVetRepository};
use crate::utils::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub owners: Arc<dyn OwnerRepository>,
    pub vets: Arc<dyn VetRepository>,
    pub users: Arc<dyn UserRepository>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn mongo(context: &MongoContext, config: AppConfig) -> Self {
        AppState {
            owners: Arc::new(MongoOwnerRepository::new(context)),
            vets: Arc::new(MongoVetRepository::new(context)),
            users: Arc::new(MongoUserRepository::new(context)),
            config: Arc::new(config),
        }
    }

    pub fn in_memory(config: AppConfig) -> Self {
        AppState {
            owners: Arc::new(InMemoryOwnerRepository::new()),
            vets: Arc::new(InMemoryVetRepository::new()),
            users: Arc::new(InMemoryUserRepository::new()),
            config: Arc::new(config),
        }
    }
}
