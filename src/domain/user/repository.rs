use async_trait::async_trait;
use crate::{domain::user::model::User, utils::errors::ApiError};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// `Conflict` when the username is taken.
    async fn create_user(&self, user: User) -> Result<User, ApiError>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, ApiError>;
}
