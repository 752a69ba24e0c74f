use serde::{Serialize, Deserialize};
use mongodb::bson::oid::ObjectId;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Vet {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub specialties: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VetSend {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub specialties: Vec<String>,
    pub nr_of_specialties: usize,
}

impl Vet {
    pub fn new(first_name: &str, last_name: &str, specialties: &[&str]) -> Self {
        let mut specialties: Vec<String> = specialties.iter().map(|s| s.to_string()).collect();
        specialties.sort();
        Vet {
            id: None,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            specialties,
        }
    }

    pub fn to_send(&self) -> VetSend {
        VetSend {
            id: self.id.map(|id| id.to_hex()).unwrap_or_default(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            specialties: self.specialties.clone(),
            nr_of_specialties: self.specialties.len(),
        }
    }
}
