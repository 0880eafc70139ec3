use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, instrument, warn};
use uuid::Uuid;

use super::dto::{GeneratedPlanResponse, GroceryListResponse, LatestPlanResponse, PlanResponse};
use super::services;
use crate::{
    auth::AuthUser,
    planner::{
        nutrients::{DailyNutrientSummary, WeeklyNutrientSummary},
        PlanError,
    },
    state::AppState,
};

pub fn plan_routes() -> Router<AppState> {
    Router::new()
        .route("/meal-plans", post(generate_plan))
        .route("/meal-plans/latest", get(latest_plan))
        .route("/meal-plans/:id", get(get_plan))
        .route("/meal-plans/:id/nutrients", get(week_nutrients))
        .route("/meal-plans/:id/nutrients/:day", get(day_nutrients))
        .route("/meal-plans/:id/grocery-list", get(grocery_list))
}

/// Logs server-side failures before they become a response.
fn reject(user_id: Uuid, e: PlanError) -> (StatusCode, String) {
    if e.status().is_server_error() {
        error!(error = %e, %user_id, "meal plan request failed");
    } else {
        warn!(reason = %e, %user_id, "meal plan request rejected");
    }
    e.into()
}

#[instrument(skip(state))]
pub async fn generate_plan(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<(StatusCode, Json<GeneratedPlanResponse>), (StatusCode, String)> {
    let generated = services::generate_plan(
        state.catalog.as_ref(),
        state.profiles.as_ref(),
        state.plans.as_ref(),
        user_id,
    )
    .await
    .map_err(|e| reject(user_id, e))?;

    Ok((StatusCode::CREATED, Json(generated.into())))
}

#[instrument(skip(state))]
pub async fn latest_plan(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<LatestPlanResponse>, (StatusCode, String)> {
    let stored = services::latest_plan(state.plans.as_ref(), user_id)
        .await
        .map_err(|e| reject(user_id, e))?;
    Ok(Json(LatestPlanResponse { plan_id: stored.id }))
}

#[instrument(skip(state))]
pub async fn get_plan(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<PlanResponse>, (StatusCode, String)> {
    let stored = services::load_plan(state.plans.as_ref(), user_id, id)
        .await
        .map_err(|e| reject(user_id, e))?;
    Ok(Json(stored.into()))
}

#[instrument(skip(state))]
pub async fn week_nutrients(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<WeeklyNutrientSummary>, (StatusCode, String)> {
    services::week_nutrients(state.plans.as_ref(), user_id, id)
        .await
        .map(Json)
        .map_err(|e| reject(user_id, e))
}

#[instrument(skip(state))]
pub async fn day_nutrients(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path((id, day)): Path<(Uuid, String)>,
) -> Result<Json<DailyNutrientSummary>, (StatusCode, String)> {
    services::day_nutrients(state.plans.as_ref(), user_id, id, &day)
        .await
        .map(Json)
        .map_err(|e| reject(user_id, e))
}

#[instrument(skip(state))]
pub async fn grocery_list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<GroceryListResponse>, (StatusCode, String)> {
    let list = services::grocery_list(state.plans.as_ref(), user_id, id)
        .await
        .map_err(|e| reject(user_id, e))?;
    Ok(Json(GroceryListResponse::new(id, list)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{dto::JwtKeys, repo_types::Role};
    use axum::body::Body;
    use axum::http::{header, Request};
    use tower::ServiceExt;

    fn bearer(state: &AppState, user_id: Uuid) -> String {
        let keys = JwtKeys::from_config(&state.config.jwt);
        let token = keys.sign_access(user_id, Role::User).unwrap();
        format!("Bearer {token}")
    }

    #[tokio::test]
    async fn generate_without_profile_is_not_found() {
        let state = AppState::fake();
        let auth = bearer(&state, Uuid::new_v4());
        let app = plan_routes().with_state(state);

        let res = app
            .oneshot(
                Request::post("/meal-plans")
                    .header(header::AUTHORIZATION, auth)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_plan_is_not_found() {
        let state = AppState::fake();
        let auth = bearer(&state, Uuid::new_v4());
        let app = plan_routes().with_state(state);

        let res = app
            .oneshot(
                Request::get(format!("/meal-plans/{}/grocery-list", Uuid::new_v4()))
                    .header(header::AUTHORIZATION, auth)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn anonymous_requests_are_rejected() {
        let app = plan_routes().with_state(AppState::fake());
        let res = app
            .oneshot(Request::get("/meal-plans/latest").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
