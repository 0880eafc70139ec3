use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post, put},
    Json, Router,
};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use super::dto::{MealRequest, Pagination};
use super::repo;
use super::repo_types::MealRow;
use crate::{
    auth::{AdminUser, AuthUser},
    state::AppState,
};

// --- public routers ---

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals))
        .route("/meals/:id", get(get_meal))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/meals", post(create_meal))
        .route("/admin/meals/:id", put(update_meal).delete(delete_meal))
}

// --- handlers ---

#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<MealRow>>, (StatusCode, String)> {
    let (limit, offset) = p.clamped();
    let meals = repo::list_page(&state.db, limit, offset)
        .await
        .map_err(internal)?;
    Ok(Json(meals))
}

#[instrument(skip(state))]
pub async fn get_meal(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MealRow>, (StatusCode, String)> {
    match repo::get(&state.db, id).await {
        Ok(Some(meal)) => Ok(Json(meal)),
        Ok(None) => Err((StatusCode::NOT_FOUND, "Meal not found".into())),
        Err(e) => {
            error!(error = %e, %id, "get_meal failed");
            Err(internal(e))
        }
    }
}

/// POST /admin/meals
#[instrument(skip(state, body))]
pub async fn create_meal(
    State(state): State<AppState>,
    AdminUser(admin_id): AdminUser,
    Json(body): Json<MealRequest>,
) -> Result<(StatusCode, HeaderMap, Json<MealRow>), (StatusCode, String)> {
    if let Err(msg) = body.validate() {
        warn!(%admin_id, reason = %msg, "meal rejected");
        return Err((StatusCode::BAD_REQUEST, msg));
    }

    let meal = repo::create(&state.db, &body).await.map_err(internal)?;

    let mut headers = HeaderMap::new();
    if let Ok(location) = format!("/api/v1/meals/{}", meal.id).parse() {
        headers.insert(axum::http::header::LOCATION, location);
    }

    info!(%admin_id, meal_id = %meal.id, name = %meal.name, "meal created");
    Ok((StatusCode::CREATED, headers, Json(meal)))
}

#[instrument(skip(state, body))]
pub async fn update_meal(
    State(state): State<AppState>,
    AdminUser(admin_id): AdminUser,
    Path(id): Path<Uuid>,
    Json(body): Json<MealRequest>,
) -> Result<Json<MealRow>, (StatusCode, String)> {
    if let Err(msg) = body.validate() {
        warn!(%admin_id, reason = %msg, "meal update rejected");
        return Err((StatusCode::BAD_REQUEST, msg));
    }

    match repo::update(&state.db, id, &body).await {
        Ok(Some(meal)) => {
            info!(%admin_id, meal_id = %id, "meal updated");
            Ok(Json(meal))
        }
        Ok(None) => Err((StatusCode::NOT_FOUND, "Meal not found".into())),
        Err(e) => Err(internal(e)),
    }
}

#[instrument(skip(state))]
pub async fn delete_meal(
    State(state): State<AppState>,
    AdminUser(admin_id): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    match repo::delete(&state.db, id).await {
        Ok(true) => {
            info!(%admin_id, meal_id = %id, "meal deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        Ok(false) => Err((StatusCode::NOT_FOUND, "Meal not found".into())),
        Err(e) => Err(internal(e)),
    }
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
