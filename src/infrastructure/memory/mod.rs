pub mod owner_repository;
pub mod seed;
pub mod user_repository;
pub mod vet_repository;

pub use owner_repository::InMemoryOwnerRepository;
pub use user_repository::InMemoryUserRepository;
pub use vet_repository::InMemoryVetRepository;
