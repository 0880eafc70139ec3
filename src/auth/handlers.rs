use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, PublicUser, RefreshRequest, RegisterRequest},
        repo::is_unique_violation,
        repo_types::User,
        services::{hash_password, is_valid_email, verify_password, AuthUser, JwtKeys},
    },
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

fn issue_tokens(keys: &JwtKeys, user: &User) -> Result<AuthResponse, (StatusCode, String)> {
    let access_token = keys.sign_access(user.id, user.role()).map_err(|e| {
        error!(error = %e, "jwt sign access failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    let refresh_token = keys.sign_refresh(user.id, user.role()).map_err(|e| {
        error!(error = %e, "jwt sign refresh failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    Ok(AuthResponse {
        access_token,
        refresh_token,
        user: user.to_public(),
    })
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), (StatusCode, String)> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err((StatusCode::BAD_REQUEST, "Invalid email".into()));
    }

    if payload.password.len() < 8 {
        warn!("password too short");
        return Err((StatusCode::BAD_REQUEST, "Password too short".into()));
    }

    // Ensure email is not taken
    match User::find_by_email(&state.db, &payload.email).await {
        Ok(Some(_)) => {
            warn!(email = %payload.email, "email already registered");
            return Err((StatusCode::CONFLICT, "Email already registered".into()));
        }
        Ok(None) => {}
        Err(e) => {
            error!(error = %e, "email lookup failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    }

    let hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "hash_password failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    };

    let user = match User::create(
        &state.db,
        payload.first_name.trim(),
        payload.last_name.trim(),
        &payload.email,
        &hash,
    )
    .await
    {
        Ok(u) => u,
        // Lost a race with a concurrent registration of the same email
        Err(e) if is_unique_violation(&e) => {
            warn!(email = %payload.email, "email already registered");
            return Err((StatusCode::CONFLICT, "Email already registered".into()));
        }
        Err(e) => {
            error!(error = %e, "create user failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    };

    let keys = JwtKeys::from_ref(&state);
    let response = issue_tokens(&keys, &user)?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, String)> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err((StatusCode::BAD_REQUEST, "Invalid email".into()));
    }

    let user = match User::find_by_email(&state.db, &payload.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(email = %payload.email, "login unknown email");
            return Err((StatusCode::UNAUTHORIZED, "Invalid credentials".into()));
        }
        Err(e) => {
            error!(error = %e, "find_by_email failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    };

    let ok = match verify_password(&payload.password, &user.password_hash) {
        Ok(v) => v,
        Err(e) => {
            error!(error = %e, "verify_password failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    };

    if !ok {
        warn!(email = %payload.email, user_id = %user.id, "login invalid password");
        return Err((StatusCode::UNAUTHORIZED, "Invalid credentials".into()));
    }

    let keys = JwtKeys::from_ref(&state);
    let response = issue_tokens(&keys, &user)?;

    info!(user_id = %user.id, email = %user.email, role = user.role().as_str(), "user logged in");
    Ok(Json(response))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, String)> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys
        .verify_refresh(&payload.refresh_token)
        .map_err(|e| (StatusCode::UNAUTHORIZED, format!("{}", e)))?;

    // Re-read the user so a changed role lands in the new pair
    let user = User::find_by_id(&state.db, claims.sub)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .ok_or((StatusCode::UNAUTHORIZED, "User not found".to_string()))?;

    Ok(Json(issue_tokens(&keys, &user)?))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicUser>, (StatusCode, String)> {
    let user = User::find_by_id(&state.db, user_id)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %user_id, "load user failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?
        .ok_or_else(|| {
            warn!(user_id = %user_id, "user not found");
            (StatusCode::UNAUTHORIZED, "User not found".to_string())
        })?;

    Ok(Json(user.to_public()))
}

#[cfg(test)]
mod me_tests {
    use super::*;
    use crate::auth::repo_types::Role;

    #[test]
    fn test_me_response_serialization() {
        let response = PublicUser {
            id: uuid::Uuid::new_v4(),
            email: "test@example.com".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            role: Role::Admin,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("test@example.com"));
        assert!(json.contains("id"));
        assert!(json.contains("\"role\":\"admin\""));
    }

    #[test]
    fn register_request_accepts_camel_case_names() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"firstName":"Ada","lastName":"Lovelace","email":"a@b.co","password":"longenough"}"#,
        )
        .unwrap();
        assert_eq!(req.first_name, "Ada");
        assert_eq!(req.last_name, "Lovelace");
    }
}
