pub mod mongo_context;

pub use mongo_context::MongoContext;
