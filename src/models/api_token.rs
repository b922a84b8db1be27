use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ApiToken {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub api_token: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyTokenQuery {
    pub api_key: String,
}

/// Result of issuing a token for a (name, email) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub is_new: bool,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub status: &'static str,
    pub api_token: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyTokenResponse {
    pub status: &'static str,
}
