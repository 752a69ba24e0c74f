pub mod age;
pub mod form;
pub mod model;
pub mod reminder;
pub mod repository;
pub mod service;

pub use model::{Owner, Pet, PetType, Telephone, Visit};
pub use repository::OwnerRepository;
