use actix_web::{get, post, web, HttpResponse};
use serde_json::Value;

use crate::{
    app_state::AppState,
    auth::{AuthMiddleware, AuthenticatedUser},
    errors::AppResult,
    handlers::payload::parse_payload,
    models::dto::{
        request::{CreateUserRequest, LoginRequest},
        response::{DataResponse, MessageResponse, TokenResponse, UserDto},
    },
};

#[post("/login/register")]
pub async fn register(state: web::Data<AppState>, body: web::Json<Value>) -> AppResult<HttpResponse> {
    let request: CreateUserRequest = parse_payload(body.into_inner())?;
    let user = state.user_service.register(request).await?;

    let token = state.jwt_service.create_token(user.id)?;
    Ok(HttpResponse::Created().json(TokenResponse::new("Registered", token)))
}

#[post("/login/login")]
pub async fn login(state: web::Data<AppState>, body: web::Json<Value>) -> AppResult<HttpResponse> {
    let request: LoginRequest = parse_payload(body.into_inner())?;
    let user = state.user_service.login(request).await?;

    let token = state.jwt_service.create_token(user.id)?;
    log::info!("user {} logged in", user.id);
    Ok(HttpResponse::Ok().json(TokenResponse::new("Logged In", token)))
}

#[get("/login/me", wrap = "AuthMiddleware")]
pub async fn current_user(state: web::Data<AppState>, auth: AuthenticatedUser) -> AppResult<HttpResponse> {
    let user = state.user_service.get_user(auth.id()).await?;
    let dto = UserDto::new(user, &state.config.base_url);
    Ok(HttpResponse::Ok().json(DataResponse::new(dto).with_message("Success")))
}

/// Tokens are stateless, so signing out only confirms the token was valid;
/// the client discards it and it lapses at expiry.
#[get("/login/signout", wrap = "AuthMiddleware")]
pub async fn signout(auth: AuthenticatedUser) -> HttpResponse {
    log::info!("user {} signed out", auth.id());
    HttpResponse::Ok().json(MessageResponse::success("Logged Out"))
}
