use serde::Deserialize;

use crate::planner::model::TextList;

/// Upper bounds for a single catalog meal.
const MAX_CALORIES: i32 = 10_000;
const MAX_MACRO_GRAMS: f64 = 1_000.0;

/// Admin create/update body for a catalog meal.
#[derive(Debug, Deserialize)]
pub struct MealRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub calories: Option<i32>,
    #[serde(default)]
    pub protein: Option<f64>,
    #[serde(default, alias = "carbohydrates")]
    pub carbs: Option<f64>,
    #[serde(default)]
    pub fat: Option<f64>,
    #[serde(default, alias = "dietType")]
    pub diet_type: Option<String>,
    #[serde(default, alias = "mealType")]
    pub meal_type: Option<String>,
    #[serde(default)]
    pub ingredients: TextList,
    #[serde(default)]
    pub tags: TextList,
    #[serde(default, alias = "suitableFor")]
    pub suitable_for: Option<String>,
    #[serde(default, alias = "preparationTime")]
    pub preparation_time: Option<String>,
}

impl MealRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name is required".into());
        }
        if matches!(self.calories, Some(c) if c < 0) {
            return Err("calories must not be negative".into());
        }
        if matches!(self.calories, Some(c) if c > MAX_CALORIES) {
            return Err(format!("calories must be at most {MAX_CALORIES}"));
        }
        for (field, value) in [("protein", self.protein), ("carbs", self.carbs), ("fat", self.fat)] {
            if matches!(value, Some(v) if !(v.is_finite() && v >= 0.0)) {
                return Err(format!("{field} must not be negative"));
            }
            if matches!(value, Some(v) if v > MAX_MACRO_GRAMS) {
                return Err(format!("{field} must be at most {MAX_MACRO_GRAMS} g"));
            }
        }
        Ok(())
    }

    /// List fields are stored as one comma-separated column.
    pub fn ingredients_column(&self) -> String {
        join_entries(&self.ingredients)
    }

    pub fn tags_column(&self) -> String {
        join_entries(&self.tags)
    }
}

fn join_entries(list: &TextList) -> String {
    list.entries()
        .iter()
        .map(|e| e.trim())
        .filter(|e| !e.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}
fn default_limit() -> i64 { 20 }

impl Pagination {
    pub fn clamped(&self) -> (i64, i64) {
        (self.limit.clamp(1, 100), self.offset.max(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingredient_list_is_stored_as_csv() {
        let req: MealRequest = serde_json::from_str(
            r#"{"name":"Bowl","ingredients":["quinoa: 1 cup"," ","kale"],"tags":"vegetarian, halal"}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.ingredients_column(), "quinoa: 1 cup, kale");
        assert_eq!(req.tags_column(), "vegetarian, halal");
    }

    #[test]
    fn validation() {
        let req: MealRequest = serde_json::from_str(r#"{"name":"  "}"#).unwrap();
        assert_eq!(req.validate().unwrap_err(), "name is required");

        let req: MealRequest = serde_json::from_str(r#"{"name":"X","fat":-1}"#).unwrap();
        assert_eq!(req.validate().unwrap_err(), "fat must not be negative");
    }

    #[test]
    fn absurd_macros_are_rejected() {
        let req: MealRequest = serde_json::from_str(r#"{"name":"X","protein":1e300}"#).unwrap();
        assert_eq!(req.validate().unwrap_err(), "protein must be at most 1000 g");

        let req: MealRequest = serde_json::from_str(r#"{"name":"X","calories":2000000}"#).unwrap();
        assert_eq!(req.validate().unwrap_err(), "calories must be at most 10000");

        let req: MealRequest =
            serde_json::from_str(r#"{"name":"X","calories":10000,"carbs":1000}"#).unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn pagination_is_clamped() {
        let p = Pagination { limit: 10_000, offset: -5 };
        assert_eq!(p.clamped(), (100, 0));
    }
}
