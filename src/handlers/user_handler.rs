use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_json::Value;

use crate::{
    app_state::AppState,
    auth::{is_admin, require_admin, require_owner_or_admin, AuthMiddleware, AuthenticatedUser},
    errors::{AppError, AppResult},
    handlers::payload::{parse_path_id, parse_payload},
    models::dto::{
        request::{CreateUserRequest, UpdateUserRequest},
        response::{DataResponse, MessageResponse, PageResponse, UserDto, UsersData},
    },
    pagination::PageQuery,
};

const USER_NOT_FOUND: &str = "User does not exist";

#[get("/users/ping")]
pub async fn ping() -> HttpResponse {
    HttpResponse::Ok().json(MessageResponse::success("pong"))
}

#[post("/users", wrap = "AuthMiddleware")]
pub async fn create_user(
    state: web::Data<AppState>,
    body: web::Json<Value>,
    auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    require_admin(&auth.0, "Forbidden")?;

    let request: CreateUserRequest = parse_payload(body.into_inner())?;
    let user = state.user_service.create_user(request).await?;

    Ok(HttpResponse::Created().json(MessageResponse::success(format!("{} added.", user.email))))
}

#[get("/users", wrap = "AuthMiddleware")]
pub async fn get_all_users(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
    auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    require_admin(&auth.0, "You must be an admin to view all users")?;

    let page = state
        .user_service
        .list_users(query.request(state.config.page_size))
        .await?
        .map(|user| UserDto::new(user, &state.config.base_url));

    let data = UsersData {
        num_users: page.total,
        users: page.items.clone(),
    };
    Ok(HttpResponse::Ok().json(PageResponse::new(data, &page, "/users")))
}

#[get("/users/{user_id}", wrap = "AuthMiddleware")]
pub async fn get_user(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let user_id = parse_path_id(&user_id, USER_NOT_FOUND)?;
    require_owner_or_admin(&auth.0, user_id, "You do not have permission to view this user")?;

    let user = state.user_service.get_user(user_id).await?;
    Ok(HttpResponse::Ok().json(DataResponse::new(UserDto::new(user, &state.config.base_url))))
}

#[put("/users/{user_id}", wrap = "AuthMiddleware")]
pub async fn update_user(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
    body: web::Json<Value>,
    auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    const DENIED: &str = "You do not have permission to update this user";

    let user_id = parse_path_id(&user_id, USER_NOT_FOUND)?;
    require_owner_or_admin(&auth.0, user_id, DENIED)?;

    let request: UpdateUserRequest = parse_payload(body.into_inner())?;
    if request.changes_privileges() && !is_admin(&auth.0) {
        return Err(AppError::Forbidden(DENIED.to_string()));
    }

    let user = state.user_service.update_user(user_id, request).await?;
    Ok(HttpResponse::Created().json(DataResponse::new(UserDto::new(user, &state.config.base_url))))
}

#[delete("/users/{user_id}", wrap = "AuthMiddleware")]
pub async fn delete_user(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let user_id = parse_path_id(&user_id, USER_NOT_FOUND)?;
    require_owner_or_admin(&auth.0, user_id, "You do not have permission to delete this user")?;

    state.user_service.delete_user(user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
