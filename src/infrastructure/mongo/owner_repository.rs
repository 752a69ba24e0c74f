use async_trait::async_trait;
use futures::StreamExt;
use mongodb::bson::{doc, Document};
use mongodb::bson::oid::ObjectId;
use mongodb::Collection;

use crate::domain::owner::age::BirthDateWindow;
use crate::domain::owner::model::Owner;
use crate::domain::owner::repository::OwnerRepository;
use crate::domain::pagination::{Page, PageRequest};
use crate::infrastructure::database::mongo_context::MongoContext;
use crate::utils::errors::ApiError;

pub struct MongoOwnerRepository {
    owners: Collection<Owner>
}

impl MongoOwnerRepository {
    pub fn new(context: &MongoContext) -> Self {
        Self {
            owners: context.owners()
        }
    }

    async fn find_page(&self, filter: Document, page: PageRequest) -> Result<Page<Owner>, ApiError> {
        let total_items = self.owners.count_documents(filter.clone()).await?;

        let mut cursor = self.owners
            .find(filter)
            .sort(owner_sort())
            .skip(page.offset())
            .limit(page.size() as i64)
            .await?;

        let mut owners = Vec::new();
        while let Some(doc) = cursor.next().await {
            match doc {
                Ok(owner) => owners.push(owner),
                Err(e) => return Err(ApiError::MongoError(e)),
            }
        }

        Ok(Page::new(owners, page, total_items))
    }
}

fn owner_sort() -> Document {
    doc! { "last_name": 1, "first_name": 1, "_id": 1 }
}

/// Anchored prefix regex built from the escaped query text.
pub(crate) fn last_name_filter(last_name: &str) -> Document {
    if last_name.is_empty() {
        return doc! {};
    }
    doc! { "last_name": { "$regex": format!("^{}", regex::escape(last_name)) } }
}

/// Birth dates are stored as ISO `YYYY-MM-DD` strings, which order like dates.
pub(crate) fn birth_date_filter(window: BirthDateWindow) -> Document {
    doc! {
        "birth_date": {
            "$gt": window.after.to_string(),
            "$lte": window.up_to.to_string(),
        }
    }
}

pub(crate) fn attended_visits_filter() -> Document {
    doc! { "pets.visits.vet_id": { "$exists": true } }
}

#[async_trait]
impl OwnerRepository for MongoOwnerRepository {

    async fn create_owner(&self, mut owner: Owner) -> Result<Owner, ApiError> {
        let result = self.owners.insert_one(&owner).await?;
        let id = result.inserted_id
            .as_object_id()
            .ok_or_else(|| ApiError::InternalServerError("inserted owner has no ObjectId".to_string()))?;
        owner.id = Some(id);
        Ok(owner)
    }

    async fn get_owner_by_id(&self, id: ObjectId) -> Result<Option<Owner>, ApiError> {
        match self.owners.find_one(doc! { "_id": id }).await {
            Ok(owner) => Ok(owner),
            Err(e) => Err(ApiError::MongoError(e))
        }
    }

    async fn update_owner(&self, owner: Owner) -> Result<(), ApiError> {
        let id = owner.id.ok_or_else(|| ApiError::InvalidData("owner has no id".to_string()))?;
        let result = self.owners.replace_one(doc! { "_id": id }, &owner).await?;

        if result.matched_count == 0 {
            return Err(ApiError::NotFound(format!("Owner {} not found", id.to_hex())));
        }
        Ok(())
    }

    async fn delete_owner(&self, id: ObjectId) -> Result<(), ApiError> {
        let result = self.owners.delete_one(doc! { "_id": id }).await?;

        if result.deleted_count == 0 {
            return Err(ApiError::NotFound(format!("Owner {} not found", id.to_hex())));
        }
        Ok(())
    }

    async fn find_by_last_name(&self, last_name: &str, page: PageRequest) -> Result<Page<Owner>, ApiError> {
        self.find_page(last_name_filter(last_name), page).await
    }

    async fn find_by_birth_date(&self, window: BirthDateWindow, page: PageRequest) -> Result<Page<Owner>, ApiError> {
        self.find_page(birth_date_filter(window), page).await
    }

    async fn find_with_attended_visits(&self) -> Result<Vec<Owner>, ApiError> {
        let mut cursor = self.owners
            .find(attended_visits_filter())
            .sort(owner_sort())
            .await?;

        let mut owners = Vec::new();
        while let Some(doc) = cursor.next().await {
            owners.push(doc?);
        }
        Ok(owners)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_empty_last_name_filter_matches_all() {
        assert_eq!(last_name_filter(""), doc! {});
    }

    #[test]
    fn test_last_name_filter_is_anchored_prefix() {
        let filter = last_name_filter("Davis");
        assert_eq!(filter, doc! { "last_name": { "$regex": "^Davis" } });
    }

    #[test]
    fn test_last_name_filter_escapes_pattern_syntax() {
        let filter = last_name_filter("O'Neil.*|x");
        let pattern = filter.get_document("last_name").unwrap().get_str("$regex").unwrap();
        assert_eq!(pattern, r"^O'Neil\.\*\|x");
    }

    #[test]
    fn test_birth_date_filter_uses_half_open_window() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let window = BirthDateWindow::for_age(30, today).unwrap();
        let filter = birth_date_filter(window);
        let range = filter.get_document("birth_date").unwrap();
        assert_eq!(range.get_str("$gt").unwrap(), "1995-10-18");
        assert_eq!(range.get_str("$lte").unwrap(), "1996-10-18");
    }

    #[test]
    fn test_attended_visits_filter_targets_embedded_visits() {
        assert_eq!(attended_visits_filter(), doc! { "pets.visits.vet_id": { "$exists": true } });
    }

    #[test]
    fn test_owner_birth_date_serializes_as_iso_string() {
        let owner = crate::domain::owner::model::fixtures::owner(
            "George",
            "Franklin",
            NaiveDate::from_ymd_opt(1968, 3, 14),
        );
        let document = mongodb::bson::to_document(&owner).unwrap();
        assert_eq!(document.get_str("birth_date").unwrap(), "1968-03-14");
        assert!(document.get("_id").is_none());
    }
}
