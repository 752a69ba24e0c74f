use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::domain::pagination::{Page, PageRequest};
use crate::domain::vet::model::Vet;
use crate::utils::errors::ApiError;

/// Vets are listed ordered by last name, then first name.
#[async_trait]
pub trait VetRepository: Send + Sync {
    async fn create_vet(&self, vet: Vet) -> Result<Vet, ApiError>;
    async fn get_vet_by_id(&self, id: ObjectId) -> Result<Option<Vet>, ApiError>;
    async fn get_all_vets(&self) -> Result<Vec<Vet>, ApiError>;
    async fn get_vets_page(&self, page: PageRequest) -> Result<Page<Vet>, ApiError>;
}
