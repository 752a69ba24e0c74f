use std::collections::{HashMap, HashSet};

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::domain::owner::model::{Owner, Pet, PetType};
use crate::domain::owner::repository::OwnerRepository;
use crate::domain::vet::model::VetSend;
use crate::domain::vet::repository::VetRepository;
use crate::utils::errors::ApiError;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VetActivity {
    pub vet: VetSend,
    pub pet_count: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TreatedPet {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub pet_type: PetType,
    pub owner_id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VetTreatedPets {
    pub vet: VetSend,
    pub treated_pets: Vec<TreatedPet>,
}

impl TreatedPet {
    fn new(owner: &Owner, pet: &Pet) -> Self {
        TreatedPet {
            id: pet.id.to_hex(),
            name: pet.name.clone(),
            pet_type: pet.pet_type,
            owner_id: owner.id.map(|id| id.to_hex()).unwrap_or_default(),
        }
    }
}

/// Each pet appears once per vet, however many visits that vet attended.
fn pets_by_vet(owners: &[Owner]) -> HashMap<ObjectId, Vec<TreatedPet>> {
    let mut treated: HashMap<ObjectId, Vec<TreatedPet>> = HashMap::new();

    for owner in owners {
        for pet in &owner.pets {
            let mut vets_seen = HashSet::new();
            for vet_id in pet.visits.iter().filter_map(|visit| visit.vet_id) {
                if vets_seen.insert(vet_id) {
                    treated.entry(vet_id).or_default().push(TreatedPet::new(owner, pet));
                }
            }
        }
    }

    for pets in treated.values_mut() {
        pets.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()).then_with(|| a.id.cmp(&b.id)));
    }
    treated
}

/// Every vet with the pets they attended, in vet listing order. Vets without
/// any recorded visit carry an empty list.
pub async fn vets_with_treated_pets(
    vets: &dyn VetRepository,
    owners: &dyn OwnerRepository,
) -> Result<Vec<VetTreatedPets>, ApiError> {
    let all_vets = vets.get_all_vets().await?;
    let mut treated = pets_by_vet(&owners.find_with_attended_visits().await?);

    Ok(all_vets
        .iter()
        .map(|vet| VetTreatedPets {
            vet: vet.to_send(),
            treated_pets: vet.id.and_then(|id| treated.remove(&id)).unwrap_or_default(),
        })
        .collect())
}

/// Every vet with the number of distinct pets they attended, busiest first.
/// Ties keep vet listing order.
pub async fn most_active_vets(
    vets: &dyn VetRepository,
    owners: &dyn OwnerRepository,
) -> Result<Vec<VetActivity>, ApiError> {
    let mut activity: Vec<VetActivity> = vets_with_treated_pets(vets, owners)
        .await?
        .into_iter()
        .map(|entry| VetActivity { pet_count: entry.treated_pets.len(), vet: entry.vet })
        .collect();

    activity.sort_by(|a, b| b.pet_count.cmp(&a.pet_count));
    Ok(activity)
}
