use axum::{
    Json,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{TokenRequest, TokenResponse, VerifyTokenQuery, VerifyTokenResponse},
    queries::api_token_queries,
    utils::extractors::{FormBody, QueryParams},
};

/// Issues (or re-issues) the token for a name/email pair and pins it in a session cookie.
pub async fn generate_api_token(
    State(state): State<AppState>,
    FormBody(payload): FormBody<TokenRequest>,
) -> Result<Response> {
    let issued = api_token_queries::issue_or_fetch(&state.db, &payload.name, &payload.email).await?;

    let cookie = HeaderValue::from_str(&format!(
        "api_token={}; HttpOnly; Path=/; SameSite=Lax",
        issued.token
    ))
    .map_err(|e| AppError::InternalError(format!("Invalid session cookie: {}", e)))?;

    let status = if issued.is_new {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    let body = Json(TokenResponse {
        status: "OK",
        api_token: issued.token,
    });

    Ok((status, [(header::SET_COOKIE, cookie)], body).into_response())
}

pub async fn verify_api_token(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<VerifyTokenQuery>,
) -> Result<Json<VerifyTokenResponse>> {
    let valid = api_token_queries::token_exists(&state.db, &query.api_key).await?;

    Ok(Json(VerifyTokenResponse {
        status: if valid { "OK" } else { "NOT OK" },
    }))
}
