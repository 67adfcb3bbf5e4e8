use async_trait::async_trait;
use mongodb::{
    bson::{doc, to_document},
    options::{FindOneAndUpdateOptions, ReturnDocument},
    Collection,
};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{
        score::{NewScore, ScoreChanges},
        Score,
    },
    pagination::{Page, PageRequest},
    repositories::{find_page, unique_index},
};

const SCORES_COLLECTION: &str = "scores";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScoreRepository: Send + Sync {
    async fn create(&self, score: NewScore) -> AppResult<Score>;
    async fn list(&self, page: PageRequest) -> AppResult<Page<Score>>;
    async fn list_by_user(&self, user_id: i64, page: PageRequest) -> AppResult<Page<Score>>;
    async fn find_by_user(&self, id: i64, user_id: i64) -> AppResult<Option<Score>>;
    async fn update(&self, id: i64, user_id: i64, changes: ScoreChanges) -> AppResult<Option<Score>>;
    async fn delete(&self, id: i64, user_id: i64) -> AppResult<bool>;
}

pub struct MongoScoreRepository {
    db: Database,
    collection: Collection<Score>,
}

impl MongoScoreRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(SCORES_COLLECTION);
        Self {
            db: db.clone(),
            collection,
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for scores collection");
        self.collection.create_index(unique_index("id")).await?;
        Ok(())
    }
}

#[async_trait]
impl ScoreRepository for MongoScoreRepository {
    async fn create(&self, score: NewScore) -> AppResult<Score> {
        let id = self.db.next_id(SCORES_COLLECTION).await?;
        let score = score.into_score(id);
        self.collection.insert_one(&score).await?;
        Ok(score)
    }

    async fn list(&self, page: PageRequest) -> AppResult<Page<Score>> {
        find_page(&self.collection, doc! {}, page).await
    }

    async fn list_by_user(&self, user_id: i64, page: PageRequest) -> AppResult<Page<Score>> {
        find_page(&self.collection, doc! { "user_id": user_id }, page).await
    }

    async fn find_by_user(&self, id: i64, user_id: i64) -> AppResult<Option<Score>> {
        let score = self
            .collection
            .find_one(doc! { "id": id, "user_id": user_id })
            .await?;
        Ok(score)
    }

    async fn update(&self, id: i64, user_id: i64, changes: ScoreChanges) -> AppResult<Option<Score>> {
        let set = to_document(&changes)?;
        if set.is_empty() {
            return self.find_by_user(id, user_id).await;
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let score = self
            .collection
            .find_one_and_update(doc! { "id": id, "user_id": user_id }, doc! { "$set": set })
            .with_options(options)
            .await?;
        Ok(score)
    }

    async fn delete(&self, id: i64, user_id: i64) -> AppResult<bool> {
        let result = self
            .collection
            .delete_one(doc! { "id": id, "user_id": user_id })
            .await?;
        Ok(result.deleted_count > 0)
    }
}
