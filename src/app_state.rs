use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        MongoQuestionRepository, MongoScoreRepository, MongoUserRepository, QuestionRepository,
        ScoreRepository, UserRepository,
    },
    services::{
        question_service::QuestionService, score_service::ScoreService, user_service::UserService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub question_service: Arc<QuestionService>,
    pub score_service: Arc<ScoreService>,
    pub jwt_service: Arc<JwtService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let user_repository = Arc::new(MongoUserRepository::new(&db));
        user_repository.ensure_indexes().await?;

        let question_repository = Arc::new(MongoQuestionRepository::new(&db));
        question_repository.ensure_indexes().await?;

        let score_repository = Arc::new(MongoScoreRepository::new(&db));
        score_repository.ensure_indexes().await?;

        Self::from_repositories(config, user_repository, question_repository, score_repository)
    }

    /// Wires the services over any storage backend.
    pub fn from_repositories(
        config: Config,
        users: Arc<dyn UserRepository>,
        questions: Arc<dyn QuestionRepository>,
        scores: Arc<dyn ScoreRepository>,
    ) -> AppResult<Self> {
        let jwt_service = JwtService::new(&config.secret_key, config.token_ttl()?)?;

        Ok(Self {
            user_service: Arc::new(UserService::new(users, config.bcrypt_cost)),
            question_service: Arc::new(QuestionService::new(questions)),
            score_service: Arc::new(ScoreService::new(scores)),
            jwt_service: Arc::new(jwt_service),
            config: Arc::new(config),
        })
    }
}
