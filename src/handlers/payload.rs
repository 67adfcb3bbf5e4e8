use actix_web::{error::JsonPayloadError, web, HttpRequest};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::{AppError, AppResult};

/// Decodes a JSON body into a request type. An absent or `{}` body is an
/// "Empty payload"; missing, mistyped or unknown fields are an
/// "Invalid payload".
pub fn parse_payload<T: DeserializeOwned>(body: Value) -> AppResult<T> {
    match &body {
        Value::Null => return Err(AppError::empty_payload()),
        Value::Object(map) if map.is_empty() => return Err(AppError::empty_payload()),
        _ => {}
    }

    serde_json::from_value(body).map_err(|e| {
        log::debug!("payload rejected: {}", e);
        AppError::invalid_payload()
    })
}

/// Parses an id taken from the URL. Non-integers are reported with the
/// resource's "does not exist" message.
pub fn parse_path_id(raw: &str, not_found_message: &str) -> AppResult<i64> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::InvalidId(not_found_message.to_string()))
}

/// Renders body-extraction failures in the standard error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        let app_error = match &err {
            JsonPayloadError::ContentType => AppError::NotAcceptable,
            JsonPayloadError::Deserialize(e) if e.is_eof() => AppError::empty_payload(),
            _ => AppError::invalid_payload(),
        };
        log::debug!("json body rejected: {}", err);
        app_error.into()
    })
}
