use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{score::NewScore, Score},
        dto::request::{CreateScoreRequest, UpdateScoreRequest},
    },
    pagination::{Page, PageRequest},
    repositories::ScoreRepository,
};

const SCORE_NOT_FOUND: &str = "Score does not exist";

pub struct ScoreService {
    repository: Arc<dyn ScoreRepository>,
}

impl ScoreService {
    pub fn new(repository: Arc<dyn ScoreRepository>) -> Self {
        Self { repository }
    }

    pub async fn create_score(&self, request: CreateScoreRequest) -> AppResult<Score> {
        request.validate()?;

        self.repository
            .create(NewScore {
                user_id: request.user_id,
                question_id: request.question_id,
                correct: request.correct,
                points: request.points,
                runtime: request.runtime,
            })
            .await
    }

    pub async fn list_scores(&self, page: PageRequest) -> AppResult<Page<Score>> {
        self.repository.list(page).await
    }

    pub async fn list_by_user(&self, user_id: i64, page: PageRequest) -> AppResult<Page<Score>> {
        self.repository.list_by_user(user_id, page).await
    }

    pub async fn get_score(&self, id: i64, user_id: i64) -> AppResult<Score> {
        self.repository
            .find_by_user(id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(SCORE_NOT_FOUND.to_string()))
    }

    pub async fn update_score(&self, id: i64, user_id: i64, request: UpdateScoreRequest) -> AppResult<Score> {
        request.validate()?;

        self.repository
            .update(id, user_id, request.into())
            .await?
            .ok_or_else(|| AppError::NotFound(SCORE_NOT_FOUND.to_string()))
    }

    pub async fn delete_score(&self, id: i64, user_id: i64) -> AppResult<()> {
        if !self.repository.delete(id, user_id).await? {
            return Err(AppError::NotFound(SCORE_NOT_FOUND.to_string()));
        }
        Ok(())
    }
}
