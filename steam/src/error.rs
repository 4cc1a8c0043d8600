use crate::endpoint::Endpoint;
use std::env;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Response error:\nStatusCode: {0}\nText: {1}")]
    Response(reqwest::StatusCode, String),

    #[error("Rate limited on {endpoint} after {attempts} attempts")]
    RateLimited { endpoint: Endpoint, attempts: u32 },

    #[error("Item name id not found on listing page for {0}")]
    ItemNameIdNotFound(String),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("EnvVar error: {0}")]
    EnvVar(#[from] env::VarError),
}
