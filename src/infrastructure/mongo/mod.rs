pub mod owner_repository;
pub mod user_repository;
pub mod vet_repository;

pub use owner_repository::MongoOwnerRepository;
pub use user_repository::MongoUserRepository;
pub use vet_repository::MongoVetRepository;
