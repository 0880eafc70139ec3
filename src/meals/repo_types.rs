use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::planner::model::{Meal, TextList};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MealRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub calories: Option<i32>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub diet_type: Option<String>,
    pub meal_type: Option<String>,
    pub ingredients: Option<String>, // "name: quantity, ..."
    pub tags: Option<String>,        // comma-separated
    pub suitable_for: Option<String>,
    pub preparation_time: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<MealRow> for Meal {
    fn from(r: MealRow) -> Self {
        Self {
            id: Some(r.id),
            name: r.name,
            description: r.description,
            calories: r.calories.map(i64::from).unwrap_or(0),
            protein: r.protein.unwrap_or(0.0),
            carbs: r.carbs.unwrap_or(0.0),
            fat: r.fat.unwrap_or(0.0),
            diet_type: r.diet_type.unwrap_or_default(),
            meal_type: r.meal_type.unwrap_or_default(),
            ingredients: TextList::Text(r.ingredients.unwrap_or_default()),
            tags: TextList::Text(r.tags.unwrap_or_default()),
            suitable_for: r.suitable_for,
            preparation_time: r.preparation_time,
        }
    }
}
