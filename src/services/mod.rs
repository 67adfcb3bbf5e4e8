pub mod password;
pub mod question_service;
pub mod score_service;
pub mod user_service;
