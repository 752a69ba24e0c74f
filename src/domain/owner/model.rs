use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::domain::owner::age::age_on;
use crate::utils::errors::ApiError;

const TELEPHONE_DIGITS: usize = 10;

/// A ten digit telephone number. `Display` masks all but the last four digits.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub struct Telephone(String);

impl Telephone {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        if trimmed.len() == TELEPHONE_DIGITS && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Telephone(trimmed.to_string()))
        } else {
            Err("Telephone must be a 10-digit number".to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn masked(&self) -> String {
        let visible = &self.0[self.0.len() - 4..];
        format!("{}{}", "*".repeat(self.0.len() - 4), visible)
    }
}

impl TryFrom<String> for Telephone {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Telephone::parse(&value)
    }
}

impl From<Telephone> for String {
    fn from(value: Telephone) -> Self {
        value.0
    }
}

impl fmt::Display for Telephone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PetType {
    Bird,
    Cat,
    Dog,
    Hamster,
    Lizard,
    Snake,
}

impl PetType {
    pub const ALL: [PetType; 6] = [
        PetType::Bird,
        PetType::Cat,
        PetType::Dog,
        PetType::Hamster,
        PetType::Lizard,
        PetType::Snake,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PetType::Bird => "bird",
            PetType::Cat => "cat",
            PetType::Dog => "dog",
            PetType::Hamster => "hamster",
            PetType::Lizard => "lizard",
            PetType::Snake => "snake",
        }
    }
}

impl FromStr for PetType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().to_ascii_lowercase();
        PetType::ALL
            .iter()
            .copied()
            .find(|pet_type| pet_type.as_str() == wanted)
            .ok_or_else(|| format!("unknown pet type '{}'", value.trim()))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Visit {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub date: NaiveDate,
    pub description: String,
    /// The vet who attended, when one was recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vet_id: Option<ObjectId>,
}

impl Visit {
    pub fn new(date: NaiveDate, description: String) -> Self {
        Visit { id: ObjectId::new(), date, description, vet_id: None }
    }

    pub fn attended_by(mut self, vet_id: ObjectId) -> Self {
        self.vet_id = Some(vet_id);
        self
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Pet {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub birth_date: NaiveDate,
    pub pet_type: PetType,
    #[serde(default)]
    pub visits: Vec<Visit>,
}

impl Pet {
    pub fn new(name: String, birth_date: NaiveDate, pet_type: PetType) -> Self {
        Pet {
            id: ObjectId::new(),
            name,
            birth_date,
            pet_type,
            visits: Vec::new(),
        }
    }

    /// Visits stay ordered by date; same-day visits keep insertion order.
    pub fn add_visit(&mut self, visit: Visit) {
        let position = self.visits.partition_point(|existing| existing.date <= visit.date);
        self.visits.insert(position, visit);
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Owner {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: Telephone,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub pets: Vec<Pet>,
}

impl Owner {

    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        self.birth_date.and_then(|birth_date| age_on(birth_date, today))
    }

    /// Pets stay ordered by name.
    pub fn add_pet(&mut self, pet: Pet) {
        let key = pet.name.to_lowercase();
        let position = self.pets.partition_point(|existing| existing.name.to_lowercase() <= key);
        self.pets.insert(position, pet);
    }

    pub fn has_pet_with_name(&self, name: &str) -> bool {
        self.get_pet_by_name(name).is_some()
    }

    pub fn get_pet(&self, id: ObjectId) -> Option<&Pet> {
        self.pets.iter().find(|pet| pet.id == id)
    }

    pub fn get_pet_by_name(&self, name: &str) -> Option<&Pet> {
        let wanted = name.trim().to_lowercase();
        self.pets.iter().find(|pet| pet.name.to_lowercase() == wanted)
    }

    /// Replaces the pet carrying the same id and restores name ordering.
    pub fn replace_pet(&mut self, pet: Pet) -> Result<(), ApiError> {
        let index = self.pets
            .iter()
            .position(|existing| existing.id == pet.id)
            .ok_or_else(|| ApiError::NotFound(format!("Pet {} not found", pet.id.to_hex())))?;
        self.pets.remove(index);
        self.add_pet(pet);
        Ok(())
    }

    pub fn add_visit(&mut self, pet_id: ObjectId, visit: Visit) -> Result<(), ApiError> {
        let pet = self.pets
            .iter_mut()
            .find(|pet| pet.id == pet_id)
            .ok_or_else(|| ApiError::NotFound(format!("Pet {} not found", pet_id.to_hex())))?;
        pet.add_visit(visit);
        Ok(())
    }

    pub fn to_send(&self, today: NaiveDate) -> OwnerSend {
        OwnerSend {
            id: self.id.map(|id| id.to_hex()).unwrap_or_default(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            telephone: self.telephone.masked(),
            birth_date: self.birth_date,
            age: self.age_on(today),
            pets: self.pets.iter().map(Pet::to_send).collect(),
        }
    }
}

impl Pet {
    pub fn to_send(&self) -> PetSend {
        PetSend {
            id: self.id.to_hex(),
            name: self.name.clone(),
            birth_date: self.birth_date,
            pet_type: self.pet_type,
            visits: self.visits
                .iter()
                .map(|visit| VisitSend {
                    id: visit.id.to_hex(),
                    date: visit.date,
                    description: visit.description.clone(),
                    vet_id: visit.vet_id.map(|id| id.to_hex()),
                })
                .collect(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OwnerSend {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
    pub birth_date: Option<NaiveDate>,
    pub age: Option<u32>,
    pub pets: Vec<PetSend>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PetSend {
    pub id: String,
    pub name: String,
    pub birth_date: NaiveDate,
    #[serde(rename = "type")]
    pub pet_type: PetType,
    pub visits: Vec<VisitSend>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VisitSend {
    pub id: String,
    pub date: NaiveDate,
    pub description: String,
    pub vet_id: Option<String>,
}
