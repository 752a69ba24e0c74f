use chrono::NaiveDate;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::domain::owner::model::{Owner, Pet, PetType, Telephone, Visit};
use crate::domain::validation::ValidationErrors;
use crate::utils::errors::ApiError;

/// Owner fields as submitted by the create and edit forms.
///
/// Every field is optional at the binding layer so a missing value surfaces as
/// a field error instead of a body parse failure.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct OwnerForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub telephone: Option<String>,
    pub birth_date: Option<String>,
}

impl OwnerForm {

    /// Pre-fills the edit form, telephone unmasked.
    pub fn from_owner(owner: &Owner) -> Self {
        OwnerForm {
            first_name: Some(owner.first_name.clone()),
            last_name: Some(owner.last_name.clone()),
            address: Some(owner.address.clone()),
            city: Some(owner.city.clone()),
            telephone: Some(owner.telephone.as_str().to_string()),
            birth_date: owner.birth_date.map(|date| date.to_string()),
        }
    }

    /// Validates the form and builds an owner without identity or pets.
    pub fn into_owner(self, today: NaiveDate) -> Result<Owner, ApiError> {
        let mut errors = ValidationErrors::new();

        let first_name = required(&mut errors, "firstName", self.first_name);
        let last_name = required(&mut errors, "lastName", self.last_name);
        let address = required(&mut errors, "address", self.address);
        let city = required(&mut errors, "city", self.city);

        let telephone = match self.telephone.as_deref().map(str::trim) {
            None | Some("") => {
                errors.reject("telephone", "required", "must not be blank");
                None
            }
            Some(raw) => match Telephone::parse(raw) {
                Ok(telephone) => Some(telephone),
                Err(message) => {
                    errors.reject("telephone", "pattern", message);
                    None
                }
            },
        };

        let birth_date = match self.birth_date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => parse_past_date(&mut errors, "birthDate", raw, today),
        };

        errors.into_result()?;

        match (first_name, last_name, address, city, telephone) {
            (Some(first_name), Some(last_name), Some(address), Some(city), Some(telephone)) => {
                Ok(Owner {
                    id: None,
                    first_name,
                    last_name,
                    address,
                    city,
                    telephone,
                    birth_date,
                    pets: Vec::new(),
                })
            }
            _ => Err(ApiError::InternalServerError("owner form validated without all fields".to_string())),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PetForm {
    pub name: Option<String>,
    pub birth_date: Option<String>,
    #[serde(rename = "type")]
    pub pet_type: Option<String>,
}

impl PetForm {

    /// Validates the form against `owner`. `editing` names the pet being
    /// updated, which may keep its own name.
    pub fn validate(
        self,
        owner: &Owner,
        editing: Option<ObjectId>,
        today: NaiveDate,
    ) -> Result<(String, NaiveDate, PetType), ApiError> {
        let mut errors = ValidationErrors::new();

        let name = required(&mut errors, "name", self.name);
        if let Some(name) = &name {
            let clash = owner
                .get_pet_by_name(name)
                .map(|existing| Some(existing.id) != editing)
                .unwrap_or(false);
            if clash {
                errors.reject("name", "duplicate", "is already in use");
            }
        }

        let pet_type = match self.pet_type.as_deref().map(str::trim) {
            None | Some("") => {
                errors.reject("type", "required", "is required");
                None
            }
            Some(raw) => match raw.parse::<PetType>() {
                Ok(pet_type) => Some(pet_type),
                Err(message) => {
                    errors.reject("type", "typeMismatch", message);
                    None
                }
            },
        };

        let birth_date = match self.birth_date.as_deref().map(str::trim) {
            None | Some("") => {
                errors.reject("birthDate", "required", "is required");
                None
            }
            Some(raw) => parse_past_date(&mut errors, "birthDate", raw, today),
        };

        errors.into_result()?;

        match (name, birth_date, pet_type) {
            (Some(name), Some(birth_date), Some(pet_type)) => Ok((name, birth_date, pet_type)),
            _ => Err(ApiError::InternalServerError("pet form validated without all fields".to_string())),
        }
    }

    pub fn into_new_pet(self, owner: &Owner, today: NaiveDate) -> Result<Pet, ApiError> {
        let (name, birth_date, pet_type) = self.validate(owner, None, today)?;
        Ok(Pet::new(name, birth_date, pet_type))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct VisitForm {
    pub date: Option<String>,
    pub description: Option<String>,
    pub vet_id: Option<String>,
}

impl VisitForm {

    /// A missing date means the visit happens today.
    pub fn into_visit(self, today: NaiveDate) -> Result<Visit, ApiError> {
        let mut errors = ValidationErrors::new();

        let description = required(&mut errors, "description", self.description);
        let date = match self.date.as_deref().map(str::trim) {
            None | Some("") => Some(today),
            Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.reject("date", "typeMismatch", "must be a date formatted as YYYY-MM-DD");
                    None
                }
            },
        };

        let vet_id = match self.vet_id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match ObjectId::parse_str(raw) {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.reject("vetId", "typeMismatch", "must be a vet id");
                    None
                }
            },
        };

        errors.into_result()?;

        match (date, description) {
            (Some(date), Some(description)) => {
                let visit = Visit::new(date, description);
                Ok(match vet_id {
                    Some(vet_id) => visit.attended_by(vet_id),
                    None => visit,
                })
            }
            _ => Err(ApiError::InternalServerError("visit form validated without all fields".to_string())),
        }
    }
}

fn required(errors: &mut ValidationErrors, field: &str, value: Option<String>) -> Option<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Some(v),
        _ => {
            errors.reject(field, "required", "must not be blank");
            None
        }
    }
}

fn parse_past_date(
    errors: &mut ValidationErrors,
    field: &str,
    raw: &str,
    today: NaiveDate,
) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) if date > today => {
            errors.reject(field, "future", "must not be in the future");
            None
        }
        Ok(date) => Some(date),
        Err(_) => {
            errors.reject(field, "typeMismatch", "must be a date formatted as YYYY-MM-DD");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::owner::model::fixtures::{date, owner};

    fn today() -> NaiveDate {
        date(2026, 10, 18)
    }

    fn validation_errors(result: Result<impl std::fmt::Debug, ApiError>) -> ValidationErrors {
        match result {
            Err(ApiError::Validation(errors)) => errors,
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    fn complete_owner_form() -> OwnerForm {
        OwnerForm {
            first_name: Some("Betty".to_string()),
            last_name: Some("Davis".to_string()),
            address: Some("638 Cardinal Ave.".to_string()),
            city: Some("Sun Prairie".to_string()),
            telephone: Some("6085551749".to_string()),
            birth_date: Some("1975-03-09".to_string()),
        }
    }

    fn complete_pet_form() -> PetForm {
        PetForm {
            name: Some("Max".to_string()),
            birth_date: Some("2025-10-18".to_string()),
            pet_type: Some("dog".to_string()),
        }
    }

    #[test]
    fn test_owner_form_builds_owner() {
        let built = complete_owner_form().into_owner(today()).unwrap();
        assert_eq!(built.last_name, "Davis");
        assert_eq!(built.telephone.as_str(), "6085551749");
        assert_eq!(built.birth_date, Some(date(1975, 3, 9)));
        assert!(built.id.is_none());
    }

    #[test]
    fn test_owner_form_without_birth_date_is_valid() {
        let mut form = complete_owner_form();
        form.birth_date = None;
        assert_eq!(form.into_owner(today()).unwrap().birth_date, None);
    }

    #[test]
    fn test_owner_form_reports_every_blank_field() {
        let errors = validation_errors(OwnerForm::default().into_owner(today()));
        for field in ["firstName", "lastName", "address", "city", "telephone"] {
            assert_eq!(errors.field_error(field).unwrap().code, "required", "{}", field);
        }
        assert_eq!(errors.error_count(), 5);
    }

    #[test]
    fn test_owner_form_rejects_bad_telephone() {
        let mut form = complete_owner_form();
        form.telephone = Some("12345".to_string());
        let errors = validation_errors(form.into_owner(today()));
        let error = errors.field_error("telephone").unwrap();
        assert_eq!(error.code, "pattern");
        assert_eq!(error.message, "Telephone must be a 10-digit number");
    }

    #[test]
    fn test_owner_form_rejects_future_or_malformed_birth_date() {
        let mut form = complete_owner_form();
        form.birth_date = Some("2027-01-01".to_string());
        let errors = validation_errors(form.into_owner(today()));
        assert_eq!(errors.field_error("birthDate").unwrap().code, "future");

        let mut form = complete_owner_form();
        form.birth_date = Some("09/03/1975".to_string());
        let errors = validation_errors(form.into_owner(today()));
        assert_eq!(errors.field_error("birthDate").unwrap().code, "typeMismatch");
    }

    #[test]
    fn test_owner_form_round_trips_through_edit() {
        let built = complete_owner_form().into_owner(today()).unwrap();
        assert_eq!(OwnerForm::from_owner(&built), complete_owner_form());
    }

    #[test]
    fn test_pet_form_valid_when_all_fields_set() {
        let george = owner("George", "Franklin", None);
        let pet = complete_pet_form().into_new_pet(&george, today()).unwrap();
        assert_eq!(pet.name, "Max");
        assert_eq!(pet.pet_type, PetType::Dog);
    }

    #[test]
    fn test_pet_form_name_required_even_when_whitespace() {
        let george = owner("George", "Franklin", None);
        for name in [None, Some(""), Some("  ")] {
            let mut form = complete_pet_form();
            form.name = name.map(str::to_string);
            let errors = validation_errors(form.into_new_pet(&george, today()));
            assert_eq!(errors.field_error("name").unwrap().code, "required");
        }
    }

    #[test]
    fn test_pet_form_type_and_birth_date_required() {
        let george = owner("George", "Franklin", None);

        let mut form = complete_pet_form();
        form.pet_type = None;
        let errors = validation_errors(form.into_new_pet(&george, today()));
        assert_eq!(errors.field_error("type").unwrap().code, "required");

        let mut form = complete_pet_form();
        form.birth_date = None;
        let errors = validation_errors(form.into_new_pet(&george, today()));
        assert_eq!(errors.field_error("birthDate").unwrap().code, "required");
    }

    #[test]
    fn test_pet_form_all_fields_missing_gives_three_errors() {
        let george = owner("George", "Franklin", None);
        let errors = validation_errors(PetForm::default().into_new_pet(&george, today()));
        assert_eq!(errors.error_count(), 3);
        assert!(errors.has_field_errors("name"));
        assert!(errors.has_field_errors("type"));
        assert!(errors.has_field_errors("birthDate"));
    }

    #[test]
    fn test_pet_form_unknown_type_and_future_birth_date() {
        let george = owner("George", "Franklin", None);
        let form = PetForm {
            name: Some("Puff".to_string()),
            birth_date: Some("2030-01-01".to_string()),
            pet_type: Some("dragon".to_string()),
        };
        let errors = validation_errors(form.into_new_pet(&george, today()));
        assert_eq!(errors.field_error("type").unwrap().code, "typeMismatch");
        assert_eq!(errors.field_error("birthDate").unwrap().code, "future");
    }

    #[test]
    fn test_pet_form_duplicate_name_only_for_other_pets() {
        let mut george = owner("George", "Franklin", None);
        george.add_pet(Pet::new("Max".to_string(), date(2020, 1, 1), PetType::Dog));
        let max_id = george.pets[0].id;

        let errors = validation_errors(complete_pet_form().into_new_pet(&george, today()));
        assert_eq!(errors.field_error("name").unwrap().code, "duplicate");

        let mut form = complete_pet_form();
        form.name = Some("MAX".to_string());
        let (name, _, _) = form.validate(&george, Some(max_id), today()).unwrap();
        assert_eq!(name, "MAX");
    }

    #[test]
    fn test_visit_form_defaults_date_to_today() {
        let form = VisitForm { date: None, description: Some("annual checkup".to_string()), vet_id: None };
        let visit = form.into_visit(today()).unwrap();
        assert_eq!(visit.date, today());
        assert_eq!(visit.description, "annual checkup");
        assert!(visit.vet_id.is_none());
    }

    #[test]
    fn test_visit_form_parses_attending_vet() {
        let vet_id = ObjectId::new();
        let form: VisitForm = serde_json::from_value(serde_json::json!({
            "description": "dental cleaning",
            "vetId": vet_id.to_hex(),
        })).unwrap();
        assert_eq!(form.into_visit(today()).unwrap().vet_id, Some(vet_id));

        let form = VisitForm {
            date: None,
            description: Some("dental cleaning".to_string()),
            vet_id: Some("carter".to_string()),
        };
        let errors = validation_errors(form.into_visit(today()));
        assert_eq!(errors.field_error("vetId").unwrap().code, "typeMismatch");
    }

    #[test]
    fn test_visit_form_requires_description() {
        let form = VisitForm { date: Some("2026-01-02".to_string()), description: Some(" ".to_string()), vet_id: None };
        let errors = validation_errors(form.into_visit(today()));
        assert_eq!(errors.field_error("description").unwrap().code, "required");
    }

    #[test]
    fn test_forms_deserialize_camel_case() {
        let form: PetForm = serde_json::from_str(r#"{"name":"Leo","birthDate":"2020-09-07","type":"cat"}"#).unwrap();
        assert_eq!(form.pet_type.as_deref(), Some("cat"));
        assert_eq!(form.birth_date.as_deref(), Some("2020-09-07"));

        let form: OwnerForm = serde_json::from_str(r#"{"lastName":"Davis"}"#).unwrap();
        assert_eq!(form.last_name.as_deref(), Some("Davis"));
        assert!(form.first_name.is_none());
    }
}
