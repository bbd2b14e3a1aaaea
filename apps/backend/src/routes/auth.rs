//! Account endpoints
//!
//! Sign-in is deliberately thin: the identity provider is an external
//! collaborator that hands us a stable `external_uid`, and we keep a user
//! record keyed by it. No sessions or tokens are issued here.

use axum::{extract::State, http::StatusCode, Json};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<User>)> {
    if payload.username.trim().is_empty() || payload.email.trim().is_empty() {
        return Err(ApiError::BadRequest("username and email are required".to_string()));
    }
    if state.storage.get_user_by_email(&payload.email).is_some() {
        return Err(ApiError::BadRequest("Email already in use".to_string()));
    }
    if state.storage.get_user_by_username(&payload.username).is_some() {
        return Err(ApiError::BadRequest("Username already taken".to_string()));
    }

    let user = state.storage.create_user(
        payload.username,
        payload.email,
        payload.password,
        payload.display_name,
        payload.photo_url,
        None,
    );

    Ok((StatusCode::CREATED, Json(user.sanitized())))
}

/// POST /api/auth/identity
///
/// Upsert by external uid: returns the existing user or creates one with
/// a username derived from the email local part.
pub async fn identity_sign_in(
    State(state): State<AppState>,
    Json(payload): Json<IdentitySignInRequest>,
) -> Result<Json<User>> {
    if payload.external_uid.trim().is_empty() {
        return Err(ApiError::BadRequest("external_uid is required".to_string()));
    }

    if let Some(user) = state.storage.get_user_by_external_uid(&payload.external_uid) {
        return Ok(Json(user.sanitized()));
    }

    let email = payload
        .email
        .unwrap_or_else(|| format!("{}@example.invalid", payload.external_uid));
    let local_part = email.split('@').next().unwrap_or("user");
    // The suffix keeps derived usernames unique across identities that
    // share an email local part.
    let username = format!("{}-{}", local_part, &Uuid::new_v4().simple().to_string()[..8]);

    let user = state.storage.create_user(
        username.clone(),
        email,
        None,
        payload.display_name.or(Some(username)),
        payload.photo_url,
        Some(payload.external_uid.clone()),
    );

    tracing::info!(external_uid = %payload.external_uid, user_id = user.id, "identity sign-in created user");
    Ok(Json(user.sanitized()))
}
