pub mod owner;
pub mod pagination;
pub mod user;
pub mod validation;
pub mod vet;

pub use user::model::UserRole;
