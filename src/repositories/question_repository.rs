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
        question::{NewQuestion, QuestionChanges},
        Question,
    },
    pagination::{Page, PageRequest},
    repositories::{find_page, unique_index},
};

const QUESTIONS_COLLECTION: &str = "questions";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn create(&self, question: NewQuestion) -> AppResult<Question>;
    async fn list(&self, page: PageRequest) -> AppResult<Page<Question>>;
    async fn list_by_author(&self, author_id: i64, page: PageRequest) -> AppResult<Page<Question>>;
    async fn find_by_author(&self, id: i64, author_id: i64) -> AppResult<Option<Question>>;
    async fn update(&self, id: i64, author_id: i64, changes: QuestionChanges) -> AppResult<Option<Question>>;
    async fn delete(&self, id: i64, author_id: i64) -> AppResult<bool>;
}

pub struct MongoQuestionRepository {
    db: Database,
    collection: Collection<Question>,
}

impl MongoQuestionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(QUESTIONS_COLLECTION);
        Self {
            db: db.clone(),
            collection,
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for questions collection");
        self.collection.create_index(unique_index("id")).await?;
        Ok(())
    }
}

#[async_trait]
impl QuestionRepository for MongoQuestionRepository {
    async fn create(&self, question: NewQuestion) -> AppResult<Question> {
        let id = self.db.next_id(QUESTIONS_COLLECTION).await?;
        let question = question.into_question(id);
        self.collection.insert_one(&question).await?;
        Ok(question)
    }

    async fn list(&self, page: PageRequest) -> AppResult<Page<Question>> {
        find_page(&self.collection, doc! {}, page).await
    }

    async fn list_by_author(&self, author_id: i64, page: PageRequest) -> AppResult<Page<Question>> {
        find_page(&self.collection, doc! { "author_id": author_id }, page).await
    }

    async fn find_by_author(&self, id: i64, author_id: i64) -> AppResult<Option<Question>> {
        let question = self
            .collection
            .find_one(doc! { "id": id, "author_id": author_id })
            .await?;
        Ok(question)
    }

    async fn update(&self, id: i64, author_id: i64, changes: QuestionChanges) -> AppResult<Option<Question>> {
        let set = to_document(&changes)?;
        if set.is_empty() {
            return self.find_by_author(id, author_id).await;
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let question = self
            .collection
            .find_one_and_update(doc! { "id": id, "author_id": author_id }, doc! { "$set": set })
            .with_options(options)
            .await?;
        Ok(question)
    }

    async fn delete(&self, id: i64, author_id: i64) -> AppResult<bool> {
        let result = self
            .collection
            .delete_one(doc! { "id": id, "author_id": author_id })
            .await?;
        Ok(result.deleted_count > 0)
    }
}
