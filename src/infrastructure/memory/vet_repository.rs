use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::domain::pagination::{Page, PageRequest};
use crate::domain::vet::model::Vet;
use crate::domain::vet::repository::VetRepository;
use crate::utils::errors::ApiError;

#[derive(Debug, Default)]
pub struct InMemoryVetRepository {
    vets: RwLock<Vec<Vet>>,
}

impl InMemoryVetRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn sorted(&self) -> Vec<Vet> {
        let mut vets = self.vets.read().await.clone();
        vets.sort_by(|a, b| {
            a.last_name
                .cmp(&b.last_name)
                .then_with(|| a.first_name.cmp(&b.first_name))
        });
        vets
    }
}

#[async_trait]
impl VetRepository for InMemoryVetRepository {
    async fn create_vet(&self, mut vet: Vet) -> Result<Vet, ApiError> {
        vet.id = Some(ObjectId::new());
        self.vets.write().await.push(vet.clone());
        Ok(vet)
    }

    async fn get_vet_by_id(&self, id: ObjectId) -> Result<Option<Vet>, ApiError> {
        Ok(self.vets.read().await.iter().find(|vet| vet.id == Some(id)).cloned())
    }

    async fn get_all_vets(&self) -> Result<Vec<Vet>, ApiError> {
        Ok(self.sorted().await)
    }

    async fn get_vets_page(&self, page: PageRequest) -> Result<Page<Vet>, ApiError> {
        Ok(Page::from_sorted(self.sorted().await, page))
    }
}
