use async_trait::async_trait;
use futures::StreamExt;
use mongodb::bson::{doc, Document};
use mongodb::bson::oid::ObjectId;
use mongodb::Collection;

use crate::domain::pagination::{Page, PageRequest};
use crate::domain::vet::model::Vet;
use crate::domain::vet::repository::VetRepository;
use crate::infrastructure::database::mongo_context::MongoContext;
use crate::utils::errors::ApiError;

pub struct MongoVetRepository {
    vets: Collection<Vet>
}

impl MongoVetRepository {
    pub fn new(context: &MongoContext) -> Self {
        Self {
            vets: context.vets()
        }
    }
}

fn vet_sort() -> Document {
    doc! { "last_name": 1, "first_name": 1 }
}

#[async_trait]
impl VetRepository for MongoVetRepository {

    async fn create_vet(&self, mut vet: Vet) -> Result<Vet, ApiError> {
        let result = self.vets.insert_one(&vet).await?;
        vet.id = result.inserted_id.as_object_id();
        Ok(vet)
    }

    async fn get_vet_by_id(&self, id: ObjectId) -> Result<Option<Vet>, ApiError> {
        Ok(self.vets.find_one(doc! { "_id": id }).await?)
    }

    async fn get_all_vets(&self) -> Result<Vec<Vet>, ApiError> {
        let mut cursor = self.vets.find(doc! {}).sort(vet_sort()).await?;
        let mut vets = Vec::new();

        while let Some(doc) = cursor.next().await {
            match doc {
                Ok(vet) => vets.push(vet),
                Err(e) => return Err(ApiError::MongoError(e)),
            }
        }
        Ok(vets)
    }

    async fn get_vets_page(&self, page: PageRequest) -> Result<Page<Vet>, ApiError> {
        let total_items = self.vets.count_documents(doc! {}).await?;
        let mut cursor = self.vets
            .find(doc! {})
            .sort(vet_sort())
            .skip(page.offset())
            .limit(page.size() as i64)
            .await?;

        let mut vets = Vec::new();
        while let Some(doc) = cursor.next().await {
            vets.push(doc?);
        }
        Ok(Page::new(vets, page, total_items))
    }
}
