use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::domain::owner::age::BirthDateWindow;
use crate::domain::owner::model::Owner;
use crate::domain::pagination::{Page, PageRequest};
use crate::utils::errors::ApiError;

/// Owners are stored as aggregates: pets and visits travel with their owner.
#[async_trait]
pub trait OwnerRepository: Send + Sync {
    /// Persists a new owner and returns it with its assigned id.
    async fn create_owner(&self, owner: Owner) -> Result<Owner, ApiError>;
    async fn get_owner_by_id(&self, id: ObjectId) -> Result<Option<Owner>, ApiError>;
    /// Replaces the stored owner; `NotFound` when nothing carries its id.
    async fn update_owner(&self, owner: Owner) -> Result<(), ApiError>;
    /// `NotFound` when nothing carries `id`.
    async fn delete_owner(&self, id: ObjectId) -> Result<(), ApiError>;
    /// Case-sensitive prefix match on last name; an empty prefix matches
    /// everyone. Ordered by last name, first name, id.
    async fn find_by_last_name(&self, last_name: &str, page: PageRequest) -> Result<Page<Owner>, ApiError>;
    /// Owners born inside `window`, same ordering as the last-name search.
    async fn find_by_birth_date(&self, window: BirthDateWindow, page: PageRequest) -> Result<Page<Owner>, ApiError>;
    /// Every owner with at least one visit that names an attending vet.
    async fn find_with_attended_visits(&self) -> Result<Vec<Owner>, ApiError>;
}
