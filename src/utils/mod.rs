pub mod errors;
pub mod config;
pub mod logger;
pub mod security;

pub use errors::ApiError;
pub use config::AppConfig;
