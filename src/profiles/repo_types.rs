use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::planner::model::PlanningProfile;

/// One saved questionnaire. Profiles are never updated in place; the newest
/// row for a user is the active one.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub goal: Option<String>,
    pub activity_level: Option<String>,
    pub medical_conditions: Option<String>, // comma-separated
    pub diet_type: Option<String>,
    pub cultural_preference: Option<String>,
    pub religious_restrictions: Option<String>,
    pub disliked_foods: Option<String>,     // comma-separated
    pub meals_per_day: Option<i32>,
    pub breakfast_time: Option<String>,
    pub lunch_time: Option<String>,
    pub dinner_time: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<ProfileRow> for PlanningProfile {
    fn from(r: ProfileRow) -> Self {
        Self {
            diet_type: r.diet_type,
            religious_restrictions: r.religious_restrictions,
            disliked_foods: r.disliked_foods,
            meals_per_day: r.meals_per_day,
            goal: r.goal,
            activity_level: r.activity_level,
            medical_conditions: r.medical_conditions,
        }
    }
}
