pub mod model;
pub mod repository;
pub mod service;

pub use model::Vet;
pub use repository::VetRepository;
