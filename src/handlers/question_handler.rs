use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_json::Value;

use crate::{
    app_state::AppState,
    auth::{require_owner_or_admin, AuthMiddleware, AuthenticatedUser},
    errors::AppResult,
    handlers::payload::{parse_path_id, parse_payload},
    models::{
        domain::Question,
        dto::{
            request::{CreateQuestionRequest, UpdateQuestionRequest},
            response::{DataResponse, MessageResponse, PageResponse, QuestionDto, QuestionsData},
        },
    },
    pagination::{Page, PageQuery},
};

const QUESTION_NOT_FOUND: &str = "Question does not exist";

fn page_response(page: Page<Question>, base_url: &str, path: &str) -> PageResponse<QuestionsData> {
    let page = page.map(|question| QuestionDto::new(question, base_url));
    let data = QuestionsData {
        num_questions: page.total,
        questions: page.items.clone(),
    };
    PageResponse::new(data, &page, path)
}

fn parse_ids(path: &(String, String)) -> AppResult<(i64, i64)> {
    let question_id = parse_path_id(&path.0, QUESTION_NOT_FOUND)?;
    let user_id = parse_path_id(&path.1, QUESTION_NOT_FOUND)?;
    Ok((question_id, user_id))
}

/// Every authenticated caller may browse the full question bank.
#[get("/questions", wrap = "AuthMiddleware")]
pub async fn get_all_questions(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
    _auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let page = state
        .question_service
        .list_questions(query.request(state.config.page_size))
        .await?;
    Ok(HttpResponse::Ok().json(page_response(page, &state.config.base_url, "/questions")))
}

#[post("/questions", wrap = "AuthMiddleware")]
pub async fn create_question(
    state: web::Data<AppState>,
    body: web::Json<Value>,
    auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let request: CreateQuestionRequest = parse_payload(body.into_inner())?;
    state.question_service.create_question(auth.id(), request).await?;

    Ok(HttpResponse::Created().json(MessageResponse::success("Question added")))
}

#[get("/questions/user", wrap = "AuthMiddleware")]
pub async fn get_own_questions(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
    auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let page = state
        .question_service
        .list_by_author(auth.id(), query.request(state.config.page_size))
        .await?;
    Ok(HttpResponse::Ok().json(page_response(page, &state.config.base_url, "/questions/user")))
}

#[get("/questions/{question_id}/user/{user_id}", wrap = "AuthMiddleware")]
pub async fn get_question(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let (question_id, user_id) = parse_ids(&path)?;
    require_owner_or_admin(&auth.0, user_id, "You do not have permission to view this question")?;

    let question = state.question_service.get_question(question_id, user_id).await?;
    Ok(HttpResponse::Ok().json(DataResponse::new(QuestionDto::new(
        question,
        &state.config.base_url,
    ))))
}

#[put("/questions/{question_id}/user/{user_id}", wrap = "AuthMiddleware")]
pub async fn update_question(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    body: web::Json<Value>,
    auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let (question_id, user_id) = parse_ids(&path)?;
    require_owner_or_admin(&auth.0, user_id, "You do not have permission to update this question")?;

    let request: UpdateQuestionRequest = parse_payload(body.into_inner())?;
    let question = state
        .question_service
        .update_question(question_id, user_id, request)
        .await?;
    Ok(HttpResponse::Created().json(DataResponse::new(QuestionDto::new(
        question,
        &state.config.base_url,
    ))))
}

#[delete("/questions/{question_id}/user/{user_id}", wrap = "AuthMiddleware")]
pub async fn delete_question(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let (question_id, user_id) = parse_ids(&path)?;
    require_owner_or_admin(&auth.0, user_id, "You do not have permission to delete this question")?;

    state.question_service.delete_question(question_id, user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
