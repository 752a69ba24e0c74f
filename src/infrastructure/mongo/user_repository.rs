use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};

use crate::infrastructure::database::mongo_context::MongoContext;
use crate::domain::user::repository::UserRepository;
use crate::domain::user::model::User;
use crate::utils::errors::ApiError;

const DUPLICATE_KEY: i32 = 11000;

pub struct MongoUserRepository {
    users: Collection<User>
}

impl MongoUserRepository {
    pub fn new(context: &MongoContext) -> Self {
        Self {
            users: context.users()
        }
    }

    /// Unique index backing the username conflict check.
    pub async fn ensure_indexes(&self) -> Result<(), ApiError> {
        let index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.users.create_index(index).await?;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {

    async fn create_user(&self, mut user: User) -> Result<User, ApiError> {
        if user.username.is_empty() {
            return Err(ApiError::InvalidData("Username cannot be empty".to_string()));
        }

        if self.get_user_by_username(&user.username).await?.is_some() {
            return Err(ApiError::Conflict(format!("username '{}' is already taken", user.username)));
        }

        // The unique index still decides when two registrations race.
        let result = self.users
            .insert_one(&user)
            .await
            .map_err(|e| conflict_on_duplicate(e, &user.username))?;
        user.id = result.inserted_id.as_object_id();
        Ok(user)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        match self.users.find_one(doc! { "username": username }).await {
            Ok(user) => Ok(user),
            Err(e) => Err(ApiError::MongoError(e))
        }
    }
}

fn conflict_on_duplicate(error: MongoError, username: &str) -> ApiError {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY => {
            ApiError::Conflict(format!("username '{}' is already taken", username))
        }
        _ => ApiError::MongoError(error),
    }
}
