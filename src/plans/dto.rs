use serde::Serialize;
use std::collections::BTreeMap;
use time::OffsetDateTime;
use uuid::Uuid;

use super::services::GeneratedPlan;
use crate::planner::grocery::{GroceryItem, GroceryList};
use crate::planner::model::WeeklyPlan;
use crate::planner::providers::StoredPlan;

/// Response of `POST /meal-plans`: the new plan plus the preferences it
/// was built from.
#[derive(Debug, Serialize)]
pub struct GeneratedPlanResponse {
    pub id: Uuid,
    pub diet_type: String,
    pub religious_restriction: String,
    pub disliked_foods: Vec<String>,
    pub meals_per_day: usize,
    pub plan: WeeklyPlan,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<GeneratedPlan> for GeneratedPlanResponse {
    fn from(g: GeneratedPlan) -> Self {
        Self {
            id: g.stored.id,
            diet_type: g.preferences.diet_type,
            religious_restriction: g.preferences.religious_restriction,
            disliked_foods: g.preferences.disliked_foods,
            meals_per_day: g.preferences.meals_per_day,
            plan: g.stored.plan,
            created_at: g.stored.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub id: Uuid,
    pub plan: WeeklyPlan,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<StoredPlan> for PlanResponse {
    fn from(s: StoredPlan) -> Self {
        Self {
            id: s.id,
            plan: s.plan,
            created_at: s.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LatestPlanResponse {
    pub plan_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct GroceryListResponse {
    pub plan_id: Uuid,
    pub grocery_list: Vec<GroceryItem>,
    pub categories: BTreeMap<&'static str, Vec<GroceryItem>>,
    pub total_items: usize,
    pub estimated_cost: u32,
}

impl GroceryListResponse {
    pub fn new(plan_id: Uuid, list: GroceryList) -> Self {
        Self {
            plan_id,
            grocery_list: list.items,
            categories: list.categories,
            total_items: list.total_items,
            estimated_cost: list.estimated_cost,
        }
    }
}
