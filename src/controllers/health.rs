use axum::{http::StatusCode, response::IntoResponse};

pub const BANNER: &str = "The piper will lead us to reason.\n\nWelcome to https://hacpai.com";

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Any unmatched route
pub async fn banner() -> impl IntoResponse {
    (StatusCode::OK, BANNER)
}
