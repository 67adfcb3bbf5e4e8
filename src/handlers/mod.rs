pub mod auth_handler;
pub mod payload;
pub mod question_handler;
pub mod score_handler;
pub mod user_handler;

use actix_web::{web, HttpResponse, ResponseError};

use crate::errors::AppError;

pub use payload::json_config;

/// Registers every route. Protected routes carry [`crate::auth::AuthMiddleware`]
/// individually, so paths nothing serves fall through to a plain 404.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(user_handler::health_check)
        .service(user_handler::ping)
        .service(auth_handler::register)
        .service(auth_handler::login)
        .service(auth_handler::current_user)
        .service(auth_handler::signout)
        .service(user_handler::create_user)
        .service(user_handler::get_all_users)
        .service(user_handler::get_user)
        .service(user_handler::update_user)
        .service(user_handler::delete_user)
        .service(question_handler::get_all_questions)
        .service(question_handler::create_question)
        .service(question_handler::get_own_questions)
        .service(question_handler::get_question)
        .service(question_handler::update_question)
        .service(question_handler::delete_question)
        .service(score_handler::get_all_scores)
        .service(score_handler::create_score)
        .service(score_handler::get_own_scores)
        .service(score_handler::get_score)
        .service(score_handler::update_score)
        .service(score_handler::delete_score)
        .default_service(web::to(not_found));
}

async fn not_found() -> HttpResponse {
    AppError::NotFound("Not found".to_string()).error_response()
}
