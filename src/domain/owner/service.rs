use chrono::NaiveDate;
use mongodb::bson::oid::ObjectId;

use crate::domain::owner::age::BirthDateWindow;
use crate::domain::owner::form::{OwnerForm, PetForm, VisitForm};
use crate::domain::owner::model::{Owner, Pet};
use crate::domain::owner::repository::OwnerRepository;
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::validation::ValidationErrors;
use crate::domain::vet::repository::VetRepository;
use crate::utils::errors::ApiError;

#[derive(Debug, PartialEq)]
pub enum OwnerSearchOutcome {
    /// Nothing on the requested page.
    NotFound,
    /// Exactly one owner matched overall.
    DirectHit(Owner),
    Listing(Page<Owner>),
}

impl OwnerSearchOutcome {
    /// The `notFound` rejection shown against the search field.
    pub fn not_found_error() -> ApiError {
        ApiError::Validation(ValidationErrors::single("lastName", "notFound", "not found"))
    }
}

#[derive(Debug, PartialEq)]
pub enum AgeSearchOutcome {
    NoMatches { message: String },
    Listing(Page<Owner>),
}

/// Last-name search. `None` and the empty string both match every owner.
pub async fn search_by_last_name(
    repo: &dyn OwnerRepository,
    last_name: Option<&str>,
    page: PageRequest,
) -> Result<OwnerSearchOutcome, ApiError> {
    let last_name = last_name.unwrap_or("");
    let mut results = repo.find_by_last_name(last_name, page).await?;
    tracing::debug!(last_name, page = page.page(), total = results.total_items, "owner search by last name");

    if results.is_empty() {
        return Ok(OwnerSearchOutcome::NotFound);
    }

    if results.total_items == 1 {
        if let Some(owner) = results.items.pop() {
            return Ok(OwnerSearchOutcome::DirectHit(owner));
        }
    }

    Ok(OwnerSearchOutcome::Listing(results))
}

/// Exact derived-age search relative to `today`.
pub async fn search_by_age(
    repo: &dyn OwnerRepository,
    age: i64,
    page: PageRequest,
    today: NaiveDate,
) -> Result<AgeSearchOutcome, ApiError> {
    if age < 0 {
        return Err(ApiError::Validation(ValidationErrors::single(
            "age",
            "min",
            "age must not be negative",
        )));
    }

    let no_matches = || AgeSearchOutcome::NoMatches {
        message: format!("No owners found with age {}", age),
    };

    let window = match u32::try_from(age).ok().and_then(|age| BirthDateWindow::for_age(age, today)) {
        Some(window) => window,
        None => return Ok(no_matches()),
    };

    let results = repo.find_by_birth_date(window, page).await?;
    tracing::debug!(age, page = page.page(), total = results.total_items, "owner search by age");

    if results.is_empty() {
        return Ok(no_matches());
    }
    Ok(AgeSearchOutcome::Listing(results))
}

pub async fn load_owner(repo: &dyn OwnerRepository, owner_id: ObjectId) -> Result<Owner, ApiError> {
    repo.get_owner_by_id(owner_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Owner {} not found", owner_id.to_hex())))
}

pub async fn create_owner(
    repo: &dyn OwnerRepository,
    form: OwnerForm,
    today: NaiveDate,
) -> Result<Owner, ApiError> {
    let owner = form.into_owner(today)?;
    let owner = repo.create_owner(owner).await?;
    tracing::info!(owner_id = ?owner.id, "owner created");
    Ok(owner)
}

/// Applies the edit form; pets and visits are kept.
pub async fn update_owner(
    repo: &dyn OwnerRepository,
    owner_id: ObjectId,
    form: OwnerForm,
    today: NaiveDate,
) -> Result<Owner, ApiError> {
    let existing = load_owner(repo, owner_id).await?;
    let mut updated = form.into_owner(today)?;
    updated.id = Some(owner_id);
    updated.pets = existing.pets;
    repo.update_owner(updated.clone()).await?;
    tracing::info!(owner_id = %owner_id, "owner updated");
    Ok(updated)
}

pub async fn delete_owner(repo: &dyn OwnerRepository, owner_id: ObjectId) -> Result<(), ApiError> {
    repo.delete_owner(owner_id).await?;
    tracing::info!(owner_id = %owner_id, "owner deleted");
    Ok(())
}

pub async fn add_pet(
    repo: &dyn OwnerRepository,
    owner_id: ObjectId,
    form: PetForm,
    today: NaiveDate,
) -> Result<(Owner, Pet), ApiError> {
    let mut owner = load_owner(repo, owner_id).await?;
    let pet = form.into_new_pet(&owner, today)?;
    owner.add_pet(pet.clone());
    repo.update_owner(owner.clone()).await?;
    Ok((owner, pet))
}

pub async fn update_pet(
    repo: &dyn OwnerRepository,
    owner_id: ObjectId,
    pet_id: ObjectId,
    form: PetForm,
    today: NaiveDate,
) -> Result<(Owner, Pet), ApiError> {
    let mut owner = load_owner(repo, owner_id).await?;
    let mut pet = owner
        .get_pet(pet_id)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("Pet {} not found", pet_id.to_hex())))?;

    let (name, birth_date, pet_type) = form.validate(&owner, Some(pet_id), today)?;
    pet.name = name;
    pet.birth_date = birth_date;
    pet.pet_type = pet_type;

    owner.replace_pet(pet.clone())?;
    repo.update_owner(owner.clone()).await?;
    Ok((owner, pet))
}

/// Records a visit; a named attending vet must exist.
pub async fn add_visit(
    repo: &dyn OwnerRepository,
    vets: &dyn VetRepository,
    owner_id: ObjectId,
    pet_id: ObjectId,
    form: VisitForm,
    today: NaiveDate,
) -> Result<Owner, ApiError> {
    let mut owner = load_owner(repo, owner_id).await?;
    if owner.get_pet(pet_id).is_none() {
        return Err(ApiError::NotFound(format!("Pet {} not found", pet_id.to_hex())));
    }
    let visit = form.into_visit(today)?;
    if let Some(vet_id) = visit.vet_id {
        if vets.get_vet_by_id(vet_id).await?.is_none() {
            return Err(ApiError::Validation(ValidationErrors::single(
                "vetId",
                "notFound",
                "no vet with this id",
            )));
        }
    }
    owner.add_visit(pet_id, visit)?;
    repo.update_owner(owner.clone()).await?;
    Ok(owner)
}
