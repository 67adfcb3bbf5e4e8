use async_trait::async_trait;
use mongodb::{
    bson::{doc, to_document},
    options::{FindOneAndUpdateOptions, ReturnDocument},
    Collection,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{
        user::{NewUser, UserChanges},
        User,
    },
    pagination::{Page, PageRequest},
    repositories::{find_page, unique_index},
};

const USERS_COLLECTION: &str = "users";
const USER_EXISTS: &str = "User already exists";

/// The credential store. Usernames and emails are unique.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: NewUser) -> AppResult<User>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn find_by_username_or_email(&self, username: &str, email: &str) -> AppResult<Option<User>>;
    async fn list(&self, page: PageRequest) -> AppResult<Page<User>>;
    /// Returns the updated user, or `None` when no user has `id`.
    async fn update(&self, id: i64, changes: UserChanges) -> AppResult<Option<User>>;
    /// Returns whether a user was removed.
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

pub struct MongoUserRepository {
    db: Database,
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(USERS_COLLECTION);
        Self {
            db: db.clone(),
            collection,
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for users collection");

        for field in ["id", "username", "email"] {
            self.collection.create_index(unique_index(field)).await?;
        }

        log::info!("Successfully created indexes for users collection");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn create(&self, user: NewUser) -> AppResult<User> {
        let id = self.db.next_id(USERS_COLLECTION).await?;
        let user = user.into_user(id);
        self.collection
            .insert_one(&user)
            .await
            .map_err(|e| AppError::from(e).on_conflict(USER_EXISTS))?;
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let user = self.collection.find_one(doc! { "id": id }).await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = self.collection.find_one(doc! { "email": email }).await?;
        Ok(user)
    }

    async fn find_by_username_or_email(&self, username: &str, email: &str) -> AppResult<Option<User>> {
        let user = self
            .collection
            .find_one(doc! { "$or": [ { "username": username }, { "email": email } ] })
            .await?;
        Ok(user)
    }

    async fn list(&self, page: PageRequest) -> AppResult<Page<User>> {
        find_page(&self.collection, doc! {}, page).await
    }

    async fn update(&self, id: i64, changes: UserChanges) -> AppResult<Option<User>> {
        let set = to_document(&changes)?;
        if set.is_empty() {
            return self.find_by_id(id).await;
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let user = self
            .collection
            .find_one_and_update(doc! { "id": id }, doc! { "$set": set })
            .with_options(options)
            .await
            .map_err(|e| AppError::from(e).on_conflict(USER_EXISTS))?;
        Ok(user)
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
