use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_json::Value;

use crate::{
    app_state::AppState,
    auth::{require_owner_or_admin, AuthMiddleware, AuthenticatedUser},
    errors::AppResult,
    handlers::payload::{parse_path_id, parse_payload},
    models::{
        domain::Score,
        dto::{
            request::{CreateScoreRequest, UpdateScoreRequest},
            response::{DataResponse, MessageResponse, PageResponse, ScoreDto, ScoresData},
        },
    },
    pagination::{Page, PageQuery},
};

const SCORE_NOT_FOUND: &str = "Score does not exist";

fn page_response(page: Page<Score>, base_url: &str, path: &str) -> PageResponse<ScoresData> {
    let page = page.map(|score| ScoreDto::new(score, base_url));
    let data = ScoresData {
        num_scores: page.total,
        scores: page.items.clone(),
    };
    PageResponse::new(data, &page, path)
}

fn parse_ids(path: &(String, String)) -> AppResult<(i64, i64)> {
    let score_id = parse_path_id(&path.0, SCORE_NOT_FOUND)?;
    let user_id = parse_path_id(&path.1, SCORE_NOT_FOUND)?;
    Ok((score_id, user_id))
}

#[get("/scores", wrap = "AuthMiddleware")]
pub async fn get_all_scores(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
    _auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let page = state
        .score_service
        .list_scores(query.request(state.config.page_size))
        .await?;
    Ok(HttpResponse::Ok().json(page_response(page, &state.config.base_url, "/scores")))
}

#[post("/scores", wrap = "AuthMiddleware")]
pub async fn create_score(
    state: web::Data<AppState>,
    body: web::Json<Value>,
    auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let request: CreateScoreRequest = parse_payload(body.into_inner())?;
    require_owner_or_admin(
        &auth.0,
        request.user_id,
        "You do not have permission to add this score",
    )?;

    state.score_service.create_score(request).await?;
    Ok(HttpResponse::Created().json(MessageResponse::success("Score added")))
}

#[get("/scores/user", wrap = "AuthMiddleware")]
pub async fn get_own_scores(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
    auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let page = state
        .score_service
        .list_by_user(auth.id(), query.request(state.config.page_size))
        .await?;
    Ok(HttpResponse::Ok().json(page_response(page, &state.config.base_url, "/scores/user")))
}

#[get("/scores/{score_id}/user/{user_id}", wrap = "AuthMiddleware")]
pub async fn get_score(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let (score_id, user_id) = parse_ids(&path)?;
    require_owner_or_admin(&auth.0, user_id, "You do not have permission to view this score")?;

    let score = state.score_service.get_score(score_id, user_id).await?;
    Ok(HttpResponse::Ok().json(DataResponse::new(ScoreDto::new(score, &state.config.base_url))))
}

#[put("/scores/{score_id}/user/{user_id}", wrap = "AuthMiddleware")]
pub async fn update_score(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    body: web::Json<Value>,
    auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let (score_id, user_id) = parse_ids(&path)?;
    require_owner_or_admin(&auth.0, user_id, "You do not have permission to update this score")?;

    let request: UpdateScoreRequest = parse_payload(body.into_inner())?;
    let score = state
        .score_service
        .update_score(score_id, user_id, request)
        .await?;
    Ok(HttpResponse::Created().json(DataResponse::new(ScoreDto::new(score, &state.config.base_url))))
}

#[delete("/scores/{score_id}/user/{user_id}", wrap = "AuthMiddleware")]
pub async fn delete_score(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let (score_id, user_id) = parse_ids(&path)?;
    require_owner_or_admin(&auth.0, user_id, "You do not have permission to delete this score")?;

    state.score_service.delete_score(score_id, user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
