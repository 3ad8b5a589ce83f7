use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::Request;
use thiserror::Error;
use tracing::error;

use crate::models::submission::ConfirmResponse;

/// Anything that stops a confirmation from being stored.
///
/// Messages are the underlying error text, unchanged, since that is what the
/// caller gets to see.
#[derive(Error, Debug)]
pub enum ConfirmError {
    #[error("{0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("{0}")]
    Pool(#[from] r2d2::Error),

    #[error("{0}")]
    Database(#[from] rusqlite::Error),
}

impl<'r> Responder<'r, 'static> for ConfirmError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        error!(error = %self, "confirmation failed");
        (Status::InternalServerError, Json(ConfirmResponse::failed(self.to_string()))).respond_to(request)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {key} value: {reason}")]
    Invalid { key: String, reason: String },
}

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("database pool: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("database schema: {0}")]
    Schema(#[from] rusqlite::Error),

    #[error("server: {0}")]
    Launch(#[from] rocket::Error),
}
