use std::error::Error;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use mongodb::{options::ClientOptions, Client, Collection, Database};
use regex::Regex;

const OWNERS_COLLECTION: &str = "owners";
const VETS_COLLECTION: &str = "vets";
const USERS_COLLECTION: &str = "users";

#[derive(Clone, Debug)]
pub struct MongoContext {
    db: Database
}

impl MongoContext {

    pub async fn init(uri: &str, db_name: &str) -> Result<MongoContext, Box<dyn Error>> {
        Self::validate_mongo_uri(uri)?;
        tracing::info!(database = db_name, "connecting to MongoDB");

        let mut client_options = ClientOptions::parse(uri)
            .await?;

        client_options.app_name = Some("PetClinic".to_string());
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(client_options)
            .map_err(|e| format!("Failed to create MongoDB client: {}", e))?;

        client.list_database_names()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "MongoDB ping failed");
                format!("Failed to connect to MongoDB: {}", e)
            })?;

        let db = client.database(db_name);
        tracing::info!(database = db_name, "connected to MongoDB");

        Ok(MongoContext { db })
    }

    pub fn get_db(&self) -> &Database {
        &self.db
    }

    pub fn collection<T>(&self, name: &str) -> Collection<T>
    where
        T: Send + Sync + Unpin + for<'de> Deserialize<'de> + Serialize,
    {
        self.db.collection::<T>(name)
    }

    pub fn owners<T>(&self) -> Collection<T>
    where
        T: Send + Sync + Unpin + for<'de> Deserialize<'de> + Serialize,
    {
        self.collection(OWNERS_COLLECTION)
    }

    pub fn vets<T>(&self) -> Collection<T>
    where
        T: Send + Sync + Unpin + for<'de> Deserialize<'de> + Serialize,
    {
        self.collection(VETS_COLLECTION)
    }

    pub fn users<T>(&self) -> Collection<T>
    where
        T: Send + Sync + Unpin + for<'de> Deserialize<'de> + Serialize,
    {
        self.collection(USERS_COLLECTION)
    }

    fn validate_mongo_uri(uri: &str) -> Result<(), Box<dyn Error>> {
        let trimmed_uri = uri.trim();
        if trimmed_uri.is_empty() {
            return Err("Invalid MongoDB URI: cannot be empty or whitespace".into());
        }

        let host_part = match trimmed_uri
            .strip_prefix("mongodb://")
            .or_else(|| trimmed_uri.strip_prefix("mongodb+srv://"))
        {
            Some(host_part) => host_part,
            None => {
                return Err(format!(
                    "Invalid MongoDB URI: must start with 'mongodb://' or 'mongodb+srv://'. Got: {}",
                    uri
                ).into())
            }
        };

        if host_part.trim().is_empty() {
            return Err("Invalid MongoDB URI: missing host after protocol".into());
        }

        if uri.contains(char::is_whitespace) {
            return Err("Invalid MongoDB URI: cannot contain whitespace".into());
        }

        let re = Regex::new(r"^mongodb(\+srv)?://([^/\s]+)(/.*)?$")?;
        if !re.is_match(trimmed_uri) {
            return Err(format!("Invalid MongoDB URI format. Expected format: mongodb://host[:port][/database] or mongodb+srv://host[/database]. Got: {}", uri).into());
        }

        Ok(())
    }

}
