use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, put},
    Json, Router,
};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use super::dto::{DashboardStats, RoleUpdate};
use crate::{
    auth::{dto::PublicUser, repo_types::User, AdminUser},
    meals::{self, dto::Pagination},
    plans,
    state::AppState,
};

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/dashboard", get(dashboard))
        .route("/admin/users", get(list_users))
        .route("/admin/users/:id", delete(delete_user))
        .route("/admin/users/:id/role", put(update_role))
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    error!(error = %e, "admin request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

#[instrument(skip(state))]
pub async fn dashboard(
    State(state): State<AppState>,
    AdminUser(_admin_id): AdminUser,
) -> Result<Json<DashboardStats>, (StatusCode, String)> {
    let total_users = User::count(&state.db).await.map_err(internal)?;
    let total_meals = meals::repo::count(&state.db).await.map_err(internal)?;
    let total_meal_plans = plans::repo::count(&state.db).await.map_err(internal)?;
    Ok(Json(DashboardStats {
        total_users,
        total_meals,
        total_meal_plans,
    }))
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    AdminUser(_admin_id): AdminUser,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<PublicUser>>, (StatusCode, String)> {
    let (limit, offset) = p.clamped();
    let users = User::list_all(&state.db, limit, offset)
        .await
        .map_err(internal)?;
    Ok(Json(users.iter().map(User::to_public).collect()))
}

#[instrument(skip(state))]
pub async fn update_role(
    State(state): State<AppState>,
    AdminUser(admin_id): AdminUser,
    Path(id): Path<Uuid>,
    Json(body): Json<RoleUpdate>,
) -> Result<Json<PublicUser>, (StatusCode, String)> {
    match User::set_role(&state.db, id, body.role).await {
        Ok(Some(user)) => {
            info!(%admin_id, user_id = %id, role = body.role.as_str(), "role updated");
            Ok(Json(user.to_public()))
        }
        Ok(None) => Err((StatusCode::NOT_FOUND, "User not found".into())),
        Err(e) => Err(internal(e)),
    }
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    AdminUser(admin_id): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    if id == admin_id {
        warn!(%admin_id, "admin tried to delete own account");
        return Err((StatusCode::BAD_REQUEST, "Cannot delete your own account".into()));
    }
    match User::delete(&state.db, id).await {
        Ok(true) => {
            info!(%admin_id, user_id = %id, "user deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        Ok(false) => Err((StatusCode::NOT_FOUND, "User not found".into())),
        Err(e) => Err(internal(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{dto::JwtKeys, repo_types::Role};
    use axum::body::Body;
    use axum::http::{header, Request};
    use tower::ServiceExt;

    async fn call(role: Role, uri: &str) -> StatusCode {
        let state = AppState::fake();
        let token = JwtKeys::from_config(&state.config.jwt)
            .sign_access(Uuid::new_v4(), role)
            .unwrap();
        admin_routes()
            .with_state(state)
            .oneshot(
                Request::get(uri)
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn plain_users_are_forbidden() {
        assert_eq!(call(Role::User, "/admin/dashboard").await, StatusCode::FORBIDDEN);
        assert_eq!(call(Role::User, "/admin/users").await, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn self_delete_is_refused() {
        let state = AppState::fake();
        let admin_id = Uuid::new_v4();
        let token = JwtKeys::from_config(&state.config.jwt)
            .sign_access(admin_id, Role::Admin)
            .unwrap();
        let res = admin_routes()
            .with_state(state)
            .oneshot(
                Request::delete(format!("/admin/users/{admin_id}"))
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
