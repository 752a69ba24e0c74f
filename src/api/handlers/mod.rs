pub mod owner_handlers;
pub mod user_handlers;
pub mod vet_handlers;
