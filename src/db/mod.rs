use mongodb::{
    bson::{doc, Document},
    options::{ClientOptions, FindOneAndUpdateOptions, ReturnDocument, ServerApi, ServerApiVersion},
    Client, Collection,
};
use std::time::Duration;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

const COUNTERS_COLLECTION: &str = "counters";
const MIN_POOL_SIZE: u32 = 2;
const MAX_POOL_SIZE: u32 = 10;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct Database {
    client: Client,
    db_name: String,
}

impl Database {
    /// Opens the pool and fails fast if the server does not answer a ping.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let mut options = ClientOptions::parse(&config.mongo_conn_string).await?;
        options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.min_pool_size = Some(MIN_POOL_SIZE);
        options.max_pool_size = Some(MAX_POOL_SIZE);
        options.connect_timeout = Some(CONNECT_TIMEOUT);
        options.server_selection_timeout = Some(CONNECT_TIMEOUT);

        let client = Client::with_options(options)?;
        client
            .database(&config.mongo_db_name)
            .run_command(doc! { "ping": 1 })
            .await?;

        log::info!("connected to MongoDB database '{}'", config.mongo_db_name);
        Ok(Self {
            client,
            db_name: config.mongo_db_name.clone(),
        })
    }

    pub fn get_collection<T>(&self, collection_name: &str) -> Collection<T>
    where
        T: Send + Sync,
    {
        self.client
            .database(&self.db_name)
            .collection(collection_name)
    }

    /// Allocates the next integer id for `sequence`, starting at 1.
    pub async fn next_id(&self, sequence: &str) -> AppResult<i64> {
        let counters: Collection<Document> = self.get_collection(COUNTERS_COLLECTION);
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let counter = counters
            .find_one_and_update(doc! { "_id": sequence }, doc! { "$inc": { "seq": 1_i64 } })
            .with_options(options)
            .await?
            .ok_or_else(|| {
                AppError::DatabaseError(format!("counter '{}' was not created", sequence))
            })?;

        counter
            .get_i64("seq")
            .map_err(|e| AppError::DatabaseError(format!("counter '{}' is corrupt: {}", sequence, e)))
    }
}
