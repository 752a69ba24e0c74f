use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::domain::owner::age::BirthDateWindow;
use crate::domain::owner::model::Owner;
use crate::domain::owner::repository::OwnerRepository;
use crate::domain::pagination::{Page, PageRequest};
use crate::utils::errors::ApiError;

/// Process-local owner store used by tests and the `memory` storage backend.
#[derive(Debug, Default)]
pub struct InMemoryOwnerRepository {
    owners: RwLock<Vec<Owner>>,
}

impl InMemoryOwnerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn page_where<F>(&self, page: PageRequest, keep: F) -> Page<Owner>
    where
        F: Fn(&Owner) -> bool,
    {
        let owners = self.owners.read().await;
        Page::from_sorted(sorted_where(&owners, keep), page)
    }
}

fn sorted_where<F>(owners: &[Owner], keep: F) -> Vec<Owner>
where
    F: Fn(&Owner) -> bool,
{
    let mut matches: Vec<Owner> = owners.iter().filter(|owner| keep(owner)).cloned().collect();
    matches.sort_by(|a, b| {
        a.last_name
            .cmp(&b.last_name)
            .then_with(|| a.first_name.cmp(&b.first_name))
            .then_with(|| a.id.cmp(&b.id))
    });
    matches
}

#[async_trait]
impl OwnerRepository for InMemoryOwnerRepository {
    async fn create_owner(&self, mut owner: Owner) -> Result<Owner, ApiError> {
        owner.id = Some(ObjectId::new());
        self.owners.write().await.push(owner.clone());
        Ok(owner)
    }

    async fn get_owner_by_id(&self, id: ObjectId) -> Result<Option<Owner>, ApiError> {
        let owners = self.owners.read().await;
        Ok(owners.iter().find(|owner| owner.id == Some(id)).cloned())
    }

    async fn update_owner(&self, owner: Owner) -> Result<(), ApiError> {
        let id = owner.id.ok_or_else(|| ApiError::InvalidData("owner has no id".to_string()))?;
        let mut owners = self.owners.write().await;
        let slot = owners
            .iter_mut()
            .find(|existing| existing.id == Some(id))
            .ok_or_else(|| ApiError::NotFound(format!("Owner {} not found", id.to_hex())))?;
        *slot = owner;
        Ok(())
    }

    async fn delete_owner(&self, id: ObjectId) -> Result<(), ApiError> {
        let mut owners = self.owners.write().await;
        let before = owners.len();
        owners.retain(|owner| owner.id != Some(id));
        if owners.len() == before {
            return Err(ApiError::NotFound(format!("Owner {} not found", id.to_hex())));
        }
        Ok(())
    }

    async fn find_by_last_name(&self, last_name: &str, page: PageRequest) -> Result<Page<Owner>, ApiError> {
        Ok(self.page_where(page, |owner| owner.last_name.starts_with(last_name)).await)
    }

    async fn find_by_birth_date(&self, window: BirthDateWindow, page: PageRequest) -> Result<Page<Owner>, ApiError> {
        Ok(self
            .page_where(page, |owner| owner.birth_date.is_some_and(|birth| window.contains(birth)))
            .await)
    }

    async fn find_with_attended_visits(&self) -> Result<Vec<Owner>, ApiError> {
        let owners = self.owners.read().await;
        Ok(sorted_where(&owners, |owner| {
            owner.pets
                .iter()
                .flat_map(|pet| &pet.visits)
                .any(|visit| visit.vet_id.is_some())
        }))
    }
}
