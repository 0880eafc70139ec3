use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
pub struct MealTimes {
    pub breakfast: Option<String>,
    pub lunch: Option<String>,
    pub dinner: Option<String>,
}

/// Body of `POST /profile`. Field names from the web client are camelCase,
/// so both spellings are accepted.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SaveProfileRequest {
    #[serde(alias = "fullName")]
    pub full_name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub goal: Option<String>,
    #[serde(alias = "activityLevel")]
    pub activity_level: Option<String>,
    #[serde(alias = "medicalConditions")]
    pub medical_conditions: Vec<String>,
    #[serde(alias = "dietType")]
    pub diet_type: Option<String>,
    #[serde(alias = "culturalPreference")]
    pub cultural_preference: Option<String>,
    #[serde(alias = "religiousRestrictions")]
    pub religious_restrictions: Option<String>,
    #[serde(alias = "dislikedFoods")]
    pub disliked_foods: Option<String>,
    #[serde(alias = "mealsPerDay")]
    pub meals_per_day: Option<i32>,
    #[serde(alias = "mealTimes")]
    pub meal_times: MealTimes,
}

impl SaveProfileRequest {
    pub const MAX_MEALS_PER_DAY: i32 = 6;

    pub fn validate(&self) -> Result<(), String> {
        if let Some(n) = self.meals_per_day {
            if !(1..=Self::MAX_MEALS_PER_DAY).contains(&n) {
                return Err(format!(
                    "mealsPerDay must be between 1 and {}",
                    Self::MAX_MEALS_PER_DAY
                ));
            }
        }
        if let Some(age) = self.age {
            if !(1..=130).contains(&age) {
                return Err("age out of range".into());
            }
        }
        for (field, value) in [("height", self.height), ("weight", self.weight)] {
            if matches!(value, Some(v) if !(v.is_finite() && v > 0.0)) {
                return Err(format!("{field} must be positive"));
            }
        }
        Ok(())
    }

    /// Medical conditions as stored: one comma-separated string.
    pub fn medical_conditions_csv(&self) -> Option<String> {
        let joined = self
            .medical_conditions
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .collect::<Vec<_>>()
            .join(",");
        (!joined.is_empty()).then_some(joined)
    }
}

#[derive(Debug, Serialize)]
pub struct SavedProfileResponse {
    pub id: Uuid,
    pub message: &'static str,
}
