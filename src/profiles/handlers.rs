use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use super::dto::{SaveProfileRequest, SavedProfileResponse};
use super::repo;
use super::repo_types::ProfileRow;
use crate::{auth::AuthUser, state::AppState};

pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/profile", post(save_profile).get(get_profile))
}

#[instrument(skip(state, payload))]
pub async fn save_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<SaveProfileRequest>,
) -> Result<(StatusCode, Json<SavedProfileResponse>), (StatusCode, String)> {
    if let Err(msg) = payload.validate() {
        warn!(%user_id, reason = %msg, "profile rejected");
        return Err((StatusCode::BAD_REQUEST, msg));
    }

    let row = repo::insert(&state.db, user_id, &payload).await.map_err(|e| {
        error!(error = %e, %user_id, "save profile failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Failed to save profile".to_string())
    })?;

    info!(%user_id, profile_id = %row.id, "profile saved");
    Ok((
        StatusCode::CREATED,
        Json(SavedProfileResponse {
            id: row.id,
            message: "Profile saved successfully",
        }),
    ))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ProfileRow>, (StatusCode, String)> {
    match repo::latest_for_user(&state.db, user_id).await {
        Ok(Some(row)) => Ok(Json(row)),
        Ok(None) => Err((StatusCode::NOT_FOUND, "Profile not found".into())),
        Err(e) => {
            error!(error = %e, %user_id, "load profile failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}
