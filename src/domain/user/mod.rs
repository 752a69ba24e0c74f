pub mod model;
pub mod repository;
pub mod service;

pub use model::{User, UserRole};
pub use repository::UserRepository;
