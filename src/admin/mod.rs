pub mod dto;
pub mod handlers;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::admin_routes()
}
