#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use tokio::sync::RwLock;

use quizdrill::{
    app_state::AppState,
    config::{Config, Profile},
    errors::{AppError, AppResult},
    models::domain::{
        question::{NewQuestion, QuestionChanges},
        score::{NewScore, ScoreChanges},
        user::{NewUser, UserChanges},
        Question, Score, User,
    },
    pagination::{paginate, Page, PageRequest},
    repositories::{QuestionRepository, ScoreRepository, UserRepository},
    services::password::hash_password,
};

pub const PASSWORD: &str = "greaterthaneight";

fn sorted<T: Clone>(items: &HashMap<i64, T>, keep: impl Fn(&T) -> bool, id: impl Fn(&T) -> i64) -> Vec<T> {
    let mut items: Vec<T> = items.values().filter(|item| keep(item)).cloned().collect();
    items.sort_by_key(|item| id(item));
    items
}

pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<i64, User>>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|u| u.username == user.username || u.email == user.email)
        {
            return Err(AppError::AlreadyExists("User already exists".to_string()));
        }

        let user = user.into_user(self.next_id.fetch_add(1, Ordering::SeqCst));
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_username_or_email(&self, username: &str, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.username == username || u.email == email)
            .cloned())
    }

    async fn list(&self, page: PageRequest) -> AppResult<Page<User>> {
        let users = self.users.read().await;
        Ok(paginate(sorted(&users, |_| true, |u| u.id), page))
    }

    async fn update(&self, id: i64, changes: UserChanges) -> AppResult<Option<User>> {
        let mut users = self.users.write().await;
        let clash = users.values().any(|u| {
            u.id != id
                && (changes.username.as_deref() == Some(u.username.as_str())
                    || changes.email.as_deref() == Some(u.email.as_str()))
        });
        if clash {
            return Err(AppError::AlreadyExists("User already exists".to_string()));
        }

        Ok(users.get_mut(&id).map(|user| {
            changes.apply_to(user);
            user.clone()
        }))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.users.write().await.remove(&id).is_some())
    }
}

pub struct InMemoryQuestionRepository {
    questions: Arc<RwLock<HashMap<i64, Question>>>,
    next_id: AtomicI64,
}

impl InMemoryQuestionRepository {
    pub fn new() -> Self {
        Self {
            questions: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn create(&self, question: NewQuestion) -> AppResult<Question> {
        let question = question.into_question(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.questions.write().await.insert(question.id, question.clone());
        Ok(question)
    }

    async fn list(&self, page: PageRequest) -> AppResult<Page<Question>> {
        let questions = self.questions.read().await;
        Ok(paginate(sorted(&questions, |_| true, |q| q.id), page))
    }

    async fn list_by_author(&self, author_id: i64, page: PageRequest) -> AppResult<Page<Question>> {
        let questions = self.questions.read().await;
        Ok(paginate(sorted(&questions, |q| q.author_id == author_id, |q| q.id), page))
    }

    async fn find_by_author(&self, id: i64, author_id: i64) -> AppResult<Option<Question>> {
        let questions = self.questions.read().await;
        Ok(questions.get(&id).filter(|q| q.author_id == author_id).cloned())
    }

    async fn update(&self, id: i64, author_id: i64, changes: QuestionChanges) -> AppResult<Option<Question>> {
        let mut questions = self.questions.write().await;
        Ok(questions
            .get_mut(&id)
            .filter(|q| q.author_id == author_id)
            .map(|question| {
                changes.apply_to(question);
                question.clone()
            }))
    }

    async fn delete(&self, id: i64, author_id: i64) -> AppResult<bool> {
        let mut questions = self.questions.write().await;
        if questions.get(&id).is_some_and(|q| q.author_id == author_id) {
            questions.remove(&id);
            return Ok(true);
        }
        Ok(false)
    }
}

pub struct InMemoryScoreRepository {
    scores: Arc<RwLock<HashMap<i64, Score>>>,
    next_id: AtomicI64,
}

impl InMemoryScoreRepository {
    pub fn new() -> Self {
        Self {
            scores: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl ScoreRepository for InMemoryScoreRepository {
    async fn create(&self, score: NewScore) -> AppResult<Score> {
        let score = score.into_score(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.scores.write().await.insert(score.id, score.clone());
        Ok(score)
    }

    async fn list(&self, page: PageRequest) -> AppResult<Page<Score>> {
        let scores = self.scores.read().await;
        Ok(paginate(sorted(&scores, |_| true, |s| s.id), page))
    }

    async fn list_by_user(&self, user_id: i64, page: PageRequest) -> AppResult<Page<Score>> {
        let scores = self.scores.read().await;
        Ok(paginate(sorted(&scores, |s| s.user_id == user_id, |s| s.id), page))
    }

    async fn find_by_user(&self, id: i64, user_id: i64) -> AppResult<Option<Score>> {
        let scores = self.scores.read().await;
        Ok(scores.get(&id).filter(|s| s.user_id == user_id).cloned())
    }

    async fn update(&self, id: i64, user_id: i64, changes: ScoreChanges) -> AppResult<Option<Score>> {
        let mut scores = self.scores.write().await;
        Ok(scores
            .get_mut(&id)
            .filter(|s| s.user_id == user_id)
            .map(|score| {
                changes.apply_to(score);
                score.clone()
            }))
    }

    async fn delete(&self, id: i64, user_id: i64) -> AppResult<bool> {
        let mut scores = self.scores.write().await;
        if scores.get(&id).is_some_and(|s| s.user_id == user_id) {
            scores.remove(&id);
            return Ok(true);
        }
        Ok(false)
    }
}

/// Application state over in-memory storage, plus a handle on the user
/// store for seeding accounts the HTTP surface cannot create.
pub struct TestContext {
    pub state: AppState,
    pub users: Arc<InMemoryUserRepository>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_page_size(Config::defaults(Profile::Testing).page_size)
    }

    pub fn with_page_size(page_size: u64) -> Self {
        let mut config = Config::defaults(Profile::Testing);
        config.page_size = page_size;
        config.base_url = "http://testserver".to_string();

        let users = Arc::new(InMemoryUserRepository::new());
        let state = AppState::from_repositories(
            config,
            users.clone(),
            Arc::new(InMemoryQuestionRepository::new()),
            Arc::new(InMemoryScoreRepository::new()),
        )
        .unwrap();

        Self { state, users }
    }

    /// Inserts an account directly and returns it with a valid token.
    pub async fn seed_user(&self, username: &str, admin: bool, active: bool) -> (User, String) {
        let password_hash = hash_password(PASSWORD.to_string(), self.state.config.bcrypt_cost)
            .await
            .unwrap();
        let user = self
            .users
            .create(NewUser {
                username: username.to_string(),
                email: format!("{}@test.com", username),
                password_hash,
                active,
                admin,
            })
            .await
            .unwrap();
        let token = self.state.jwt_service.create_token(user.id).unwrap();
        (user, token)
    }
}

/// Builds the service the way `main` does, minus CORS and request logging.
macro_rules! init_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($ctx.state.clone()))
                .app_data(quizdrill::handlers::json_config())
                .wrap(quizdrill::middleware::JsonOnlyMiddleware)
                .configure(quizdrill::handlers::configure),
        )
        .await
    };
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
