use axum::http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("No suitable meals found for this profile")]
    NoSuitableMeals,

    #[error("User profile not found")]
    ProfileNotFound,

    #[error("Meal plan not found")]
    PlanNotFound,

    #[error("Day not found in plan: {0}")]
    DayNotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl PlanError {
    pub fn status(&self) -> StatusCode {
        match self {
            PlanError::NoSuitableMeals => StatusCode::UNPROCESSABLE_ENTITY,
            PlanError::ProfileNotFound | PlanError::PlanNotFound | PlanError::DayNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            PlanError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PlanError> for (StatusCode, String) {
    fn from(e: PlanError) -> Self {
        (e.status(), e.to_string())
    }
}
