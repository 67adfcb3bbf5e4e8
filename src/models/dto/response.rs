use serde::Serialize;

use crate::{
    models::domain::{Question, Score, User},
    pagination::Page,
};

const SUCCESS: &str = "success";

#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub active: bool,
    pub admin: bool,
    #[serde(rename = "self")]
    pub self_link: String,
}

impl UserDto {
    pub fn new(user: User, base_url: &str) -> Self {
        UserDto {
            self_link: format!("{}/users/{}", base_url, user.id),
            id: user.id,
            username: user.username,
            email: user.email,
            active: user.active,
            admin: user.admin,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionDto {
    pub id: i64,
    pub author_id: i64,
    pub body: String,
    pub test_code: String,
    pub test_solution: String,
    pub difficulty: String,
    #[serde(rename = "self")]
    pub self_link: String,
}

impl QuestionDto {
    pub fn new(question: Question, base_url: &str) -> Self {
        QuestionDto {
            self_link: format!(
                "{}/questions/{}/user/{}",
                base_url, question.id, question.author_id
            ),
            id: question.id,
            author_id: question.author_id,
            body: question.body,
            test_code: question.test_code,
            test_solution: question.test_solution,
            difficulty: question.difficulty,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreDto {
    pub id: i64,
    pub user_id: i64,
    pub question_id: i64,
    pub correct: bool,
    pub points: i32,
    pub runtime: i32,
    #[serde(rename = "self")]
    pub self_link: String,
}

impl ScoreDto {
    pub fn new(score: Score, base_url: &str) -> Self {
        ScoreDto {
            self_link: format!("{}/scores/{}/user/{}", base_url, score.id, score.user_id),
            id: score.id,
            user_id: score.user_id,
            question_id: score.question_id,
            correct: score.correct,
            points: score.points,
            runtime: score.runtime,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub status: &'static str,
    pub message: String,
}

impl MessageResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: SUCCESS,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub status: &'static str,
    pub message: String,
    pub token: String,
}

impl TokenResponse {
    pub fn new(message: impl Into<String>, token: String) -> Self {
        Self {
            status: SUCCESS,
            message: message.into(),
            token,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            status: SUCCESS,
            message: None,
            data,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// A page of results plus relative links to its neighbours.
#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub status: &'static str,
    pub data: T,
    pub next_page: Option<String>,
    pub prev_page: Option<String>,
}

impl<T> PageResponse<T> {
    pub fn new<U>(data: T, page: &Page<U>, path: &str) -> Self {
        Self {
            status: SUCCESS,
            data,
            next_page: page.next_num().map(|n| format!("{}?page={}", path, n)),
            prev_page: page.prev_num().map(|n| format!("{}?page={}", path, n)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UsersData {
    pub num_users: u64,
    pub users: Vec<UserDto>,
}

#[derive(Debug, Serialize)]
pub struct QuestionsData {
    pub num_questions: u64,
    pub questions: Vec<QuestionDto>,
}

#[derive(Debug, Serialize)]
pub struct ScoresData {
    pub num_scores: u64,
    pub scores: Vec<ScoreDto>,
}
