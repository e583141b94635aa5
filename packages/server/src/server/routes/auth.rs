//! REST login endpoints

use axum::{
    extract::{rejection::JsonRejection, Extension},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domains::auth::actions;
use crate::server::app::AxumAppState;
use crate::server::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub otp: String,
}

#[derive(Debug, Deserialize)]
pub struct GoogleLoginRequest {
    #[serde(default)]
    pub id_token: String,
    pub client_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub message: String,
}

/// POST /auth/login
pub async fn login_handler(
    Extension(state): Extension<AxumAppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(request) = payload.map_err(|_| ApiError::invalid_payload())?;

    actions::request_otp(&request.email, &state.deps).await?;

    Ok(Json(MessageResponse {
        message: "OTP sent successfully".to_string(),
    }))
}

/// POST /auth/verify
pub async fn verify_handler(
    Extension(state): Extension<AxumAppState>,
    payload: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Json(request) = payload.map_err(|_| ApiError::invalid_payload())?;

    let session = actions::verify_otp(&request.email, &request.otp, &state.deps).await?;

    Ok(Json(TokenResponse {
        token: session.token,
        message: "Login successful".to_string(),
    }))
}

/// POST /auth/google
pub async fn google_login_handler(
    Extension(state): Extension<AxumAppState>,
    payload: Result<Json<GoogleLoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Json(request) = payload.map_err(|_| ApiError::invalid_payload())?;

    let session =
        actions::google_login(&request.id_token, request.client_id.as_deref(), &state.deps).await?;

    Ok(Json(TokenResponse {
        token: session.token,
        message: "Login successful".to_string(),
    }))
}
