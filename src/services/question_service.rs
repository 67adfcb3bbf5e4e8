use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{question::NewQuestion, Question},
        dto::request::{CreateQuestionRequest, UpdateQuestionRequest},
    },
    pagination::{Page, PageRequest},
    repositories::QuestionRepository,
};

const QUESTION_NOT_FOUND: &str = "Question does not exist";

pub struct QuestionService {
    repository: Arc<dyn QuestionRepository>,
}

impl QuestionService {
    pub fn new(repository: Arc<dyn QuestionRepository>) -> Self {
        Self { repository }
    }

    /// Adds a question authored by `author_id`. Identical questions are allowed.
    pub async fn create_question(&self, author_id: i64, request: CreateQuestionRequest) -> AppResult<Question> {
        request.validate()?;

        self.repository
            .create(NewQuestion {
                author_id,
                body: request.body,
                test_code: request.test_code,
                test_solution: request.test_solution,
                difficulty: request.difficulty,
            })
            .await
    }

    pub async fn list_questions(&self, page: PageRequest) -> AppResult<Page<Question>> {
        self.repository.list(page).await
    }

    pub async fn list_by_author(&self, author_id: i64, page: PageRequest) -> AppResult<Page<Question>> {
        self.repository.list_by_author(author_id, page).await
    }

    pub async fn get_question(&self, id: i64, author_id: i64) -> AppResult<Question> {
        self.repository
            .find_by_author(id, author_id)
            .await?
            .ok_or_else(|| AppError::NotFound(QUESTION_NOT_FOUND.to_string()))
    }

    pub async fn update_question(
        &self,
        id: i64,
        author_id: i64,
        request: UpdateQuestionRequest,
    ) -> AppResult<Question> {
        request.validate()?;

        self.repository
            .update(id, author_id, request.into())
            .await?
            .ok_or_else(|| AppError::NotFound(QUESTION_NOT_FOUND.to_string()))
    }

    pub async fn delete_question(&self, id: i64, author_id: i64) -> AppResult<()> {
        if !self.repository.delete(id, author_id).await? {
            return Err(AppError::NotFound(QUESTION_NOT_FOUND.to_string()));
        }
        Ok(())
    }
}
