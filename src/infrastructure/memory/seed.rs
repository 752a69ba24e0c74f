use chrono::NaiveDate;
use mongodb::bson::oid::ObjectId;

use crate::domain::owner::model::{Owner, Pet, PetType, Telephone, Visit};
use crate::domain::owner::repository::OwnerRepository;
use crate::domain::vet::model::Vet;
use crate::domain::vet::repository::VetRepository;
use crate::utils::errors::ApiError;

type OwnerRow = (&'static str, &'static str, &'static str, &'static str, &'static str, (i32, u32, u32));
type PetRow = (usize, &'static str, (i32, u32, u32), PetType);

const OWNERS: [OwnerRow; 10] = [
    ("George", "Franklin", "110 W. Liberty St.", "Madison", "6085551023", (1968, 3, 14)),
    ("Betty", "Davis", "638 Cardinal Ave.", "Sun Prairie", "6085551749", (1975, 7, 2)),
    ("Eduardo", "Rodriquez", "2693 Commerce St.", "McFarland", "6085558763", (1983, 11, 23)),
    ("Harold", "Davis", "563 Friendly St.", "Windsor", "6085553198", (1959, 1, 30)),
    ("Peter", "McTavish", "2387 S. Fair Way", "Madison", "6085552765", (1990, 5, 9)),
    ("Jean", "Coleman", "105 N. Lake St.", "Monona", "6085552654", (1972, 2, 29)),
    ("Jeff", "Black", "1450 Oak Blvd.", "Monona", "6085555387", (1988, 9, 17)),
    ("Maria", "Escobito", "345 Maple St.", "Madison", "6085557683", (1995, 12, 1)),
    ("David", "Schroeder", "2749 Blackhawk Trail", "Madison", "6085559435", (1966, 6, 6)),
    ("Carlos", "Estaban", "2335 Independence La.", "Waunakee", "6085555487", (2001, 4, 12)),
];

const PETS: [PetRow; 13] = [
    (0, "Leo", (2020, 9, 7), PetType::Cat),
    (1, "Basil", (2022, 8, 6), PetType::Hamster),
    (2, "Rosy", (2021, 4, 17), PetType::Dog),
    (2, "Jewel", (2020, 3, 7), PetType::Dog),
    (3, "Iggy", (2020, 11, 30), PetType::Lizard),
    (4, "George", (2020, 1, 20), PetType::Snake),
    (5, "Samantha", (2022, 9, 4), PetType::Cat),
    (5, "Max", (2022, 9, 4), PetType::Cat),
    (6, "Lucky", (2021, 8, 6), PetType::Bird),
    (7, "Mulligan", (2017, 2, 24), PetType::Dog),
    (8, "Freddy", (2020, 3, 9), PetType::Bird),
    (9, "Lucky", (2020, 6, 24), PetType::Dog),
    (9, "Sly", (2022, 6, 8), PetType::Cat),
];

const VETS: [(&str, &str, &[&str]); 6] = [
    ("James", "Carter", &[]),
    ("Helen", "Leary", &["radiology"]),
    ("Linda", "Douglas", &["dentistry", "surgery"]),
    ("Rafael", "Ortega", &["surgery"]),
    ("Henry", "Stevens", &["radiology"]),
    ("Sharon", "Jenkins", &[]),
];

fn day((year, month, day): (i32, u32, u32)) -> Result<NaiveDate, ApiError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| ApiError::InvalidData(format!("invalid seed date {}-{}-{}", year, month, day)))
}

/// Demo owners with their pets, for local runs against the in-memory backend.
/// The Coleman pets' visits name `attending_vet` when given.
pub fn demo_owners(attending_vet: Option<ObjectId>) -> Result<Vec<Owner>, ApiError> {
    let mut owners = OWNERS
        .iter()
        .map(|(first_name, last_name, address, city, telephone, birth)| {
            Ok(Owner {
                id: None,
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                address: address.to_string(),
                city: city.to_string(),
                telephone: Telephone::parse(telephone).map_err(ApiError::InvalidData)?,
                birth_date: Some(day(*birth)?),
                pets: Vec::new(),
            })
        })
        .collect::<Result<Vec<Owner>, ApiError>>()?;

    for (owner_index, name, birth, pet_type) in PETS.iter() {
        let mut pet = Pet::new(name.to_string(), day(*birth)?, *pet_type);
        if *owner_index == 5 {
            let visit = Visit::new(day((2025, 3, 4))?, format!("{} rabies shot", name));
            pet.add_visit(match attending_vet {
                Some(vet_id) => visit.attended_by(vet_id),
                None => visit,
            });
        }
        if let Some(owner) = owners.get_mut(*owner_index) {
            owner.add_pet(pet);
        }
    }

    Ok(owners)
}

pub async fn seed_demo_data(
    owners: &dyn OwnerRepository,
    vets: &dyn VetRepository,
) -> Result<(), ApiError> {
    let mut attending_vet = None;
    for (first_name, last_name, specialties) in VETS.iter() {
        let vet = vets.create_vet(Vet::new(first_name, last_name, specialties)).await?;
        attending_vet = attending_vet.or(vet.id);
    }

    let demo = demo_owners(attending_vet)?;
    let owner_count = demo.len();
    for owner in demo {
        owners.create_owner(owner).await?;
    }
    tracing::info!(owners = owner_count, vets = VETS.len(), "demo data loaded");
    Ok(())
}
