use serde::Deserialize;
use validator::Validate;

use crate::models::domain::{question::QuestionChanges, score::ScoreChanges};

/// Body of `POST /login/register` and the admin-only `POST /users`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 128))]
    pub username: String,

    #[validate(email, length(max = 128))]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 128))]
    pub username: Option<String>,

    #[validate(email, length(max = 128))]
    pub email: Option<String>,

    #[validate(length(min = 1))]
    pub password: Option<String>,

    pub active: Option<bool>,
    pub admin: Option<bool>,
}

impl UpdateUserRequest {
    /// Whether the update touches account flags only an admin may change.
    pub fn changes_privileges(&self) -> bool {
        self.active.is_some() || self.admin.is_some()
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1))]
    pub body: String,

    #[validate(length(min = 1))]
    pub test_code: String,

    #[validate(length(min = 1))]
    pub test_solution: String,

    #[validate(length(min = 1))]
    pub difficulty: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateQuestionRequest {
    #[validate(length(min = 1))]
    pub body: Option<String>,

    #[validate(length(min = 1))]
    pub test_code: Option<String>,

    #[validate(length(min = 1))]
    pub test_solution: Option<String>,

    #[validate(length(min = 1))]
    pub difficulty: Option<String>,
}

impl From<UpdateQuestionRequest> for QuestionChanges {
    fn from(request: UpdateQuestionRequest) -> Self {
        QuestionChanges {
            body: request.body,
            test_code: request.test_code,
            test_solution: request.test_solution,
            difficulty: request.difficulty,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateScoreRequest {
    pub user_id: i64,
    pub question_id: i64,
    pub correct: bool,

    #[validate(range(min = 0))]
    pub points: i32,

    #[validate(range(min = 0))]
    pub runtime: i32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateScoreRequest {
    pub correct: Option<bool>,

    #[validate(range(min = 0))]
    pub points: Option<i32>,

    #[validate(range(min = 0))]
    pub runtime: Option<i32>,
}

impl From<UpdateScoreRequest> for ScoreChanges {
    fn from(request: UpdateScoreRequest) -> Self {
        ScoreChanges {
            correct: request.correct,
            points: request.points,
            runtime: request.runtime,
        }
    }
}
