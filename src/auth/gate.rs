use actix_web::{
    http::header::{Header, AUTHORIZATION},
    HttpMessage,
};
use actix_web_httpauth::headers::authorization::{Authorization, Bearer};
use chrono::{DateTime, Utc};

use crate::{
    auth::jwt::JwtService,
    errors::{AppError, AppResult},
    models::domain::Identity,
    services::user_service::UserService,
};

/// What a request offered as proof of identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    Missing,
    /// An `Authorization` header that is not a usable bearer token.
    Malformed,
    Bearer(String),
}

impl Credentials {
    pub fn from_message<T: HttpMessage>(message: &T) -> Self {
        if !message.headers().contains_key(AUTHORIZATION) {
            return Credentials::Missing;
        }

        match Authorization::<Bearer>::parse(message) {
            Ok(header) => Credentials::Bearer(header.into_scheme().token().to_string()),
            Err(_) => Credentials::Malformed,
        }
    }
}

/// Resolves request credentials to an active identity.
///
/// - no credentials: `Forbidden`
/// - unparseable header, bad signature or structure: `Unauthorized`
/// - expired token: `Unauthorized` ("Please log in again.")
/// - subject missing or deactivated: `Unauthorized`
///
/// Performs a single read of the credential store and never writes to it.
pub async fn authenticate(
    credentials: Credentials,
    jwt_service: &JwtService,
    users: &UserService,
    now: DateTime<Utc>,
) -> AppResult<Identity> {
    let token = match credentials {
        Credentials::Missing => return Err(AppError::Forbidden("Forbidden".to_string())),
        Credentials::Malformed => return Err(AppError::Unauthorized("Unauthorized".to_string())),
        Credentials::Bearer(token) => token,
    };

    let subject_id = jwt_service.verify(&token, now)?;

    match users.find_identity(subject_id).await? {
        Some(identity) if identity.active => Ok(identity),
        Some(_) => {
            log::warn!("rejected token for deactivated user {}", subject_id);
            Err(AppError::Unauthorized("Unauthorized".to_string()))
        }
        None => {
            log::warn!("rejected token for unknown user {}", subject_id);
            Err(AppError::Unauthorized("Unauthorized".to_string()))
        }
    }
}
