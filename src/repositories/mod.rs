pub mod question_repository;
pub mod score_repository;
pub mod user_repository;

pub use question_repository::{MongoQuestionRepository, QuestionRepository};
pub use score_repository::{MongoScoreRepository, ScoreRepository};
pub use user_repository::{MongoUserRepository, UserRepository};

use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::{FindOptions, IndexOptions},
    Collection, IndexModel,
};
use serde::de::DeserializeOwned;

use crate::{
    errors::AppResult,
    pagination::{Page, PageRequest},
};

/// Runs `filter` against `collection` ordered by `id` and cuts out the
/// requested window, counting the full match set for the page metadata.
pub(crate) async fn find_page<T>(
    collection: &Collection<T>,
    filter: Document,
    page: PageRequest,
) -> AppResult<Page<T>>
where
    T: DeserializeOwned + Unpin + Send + Sync,
{
    let total = collection.count_documents(filter.clone()).await?;

    let items = match page.offset() {
        Some(offset) if offset < total => {
            let find_options = FindOptions::builder()
                .sort(doc! { "id": 1 })
                .skip(Some(offset))
                .limit(Some(page.limit()))
                .build();

            let cursor = collection.find(filter).with_options(find_options).await?;
            cursor.try_collect().await?
        }
        _ => Vec::new(),
    };

    Ok(Page::new(items, page, total))
}

pub(crate) fn unique_index(field: &str) -> IndexModel {
    IndexModel::builder()
        .keys(doc! { field: 1 })
        .options(
            IndexOptions::builder()
                .unique(true)
                .name(format!("{}_unique", field))
                .build(),
        )
        .build()
}
