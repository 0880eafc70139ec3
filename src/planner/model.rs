use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::lenient;

/// Plan days, always in this order.
pub const WEEK_DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// A free-text list field: either a comma-separated string or a JSON array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TextList {
    List(Vec<String>),
    Text(String),
}

impl Default for TextList {
    fn default() -> Self {
        TextList::Text(String::new())
    }
}

impl TextList {
    /// Entries of the list. Text is split on commas and trimmed; list
    /// entries are returned as they are.
    pub fn entries(&self) -> Vec<String> {
        match self {
            TextList::List(items) => items.clone(),
            TextList::Text(text) => text.split(',').map(|t| t.trim().to_string()).collect(),
        }
    }

    /// The whole field as one string, for substring matching.
    pub fn as_text(&self) -> String {
        match self {
            TextList::List(items) => items.join(", "),
            TextList::Text(text) => text.clone(),
        }
    }
}

impl<'de> Deserialize<'de> for TextList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::String(s)) => TextList::Text(s),
            Some(Value::Array(items)) => TextList::List(
                items
                    .into_iter()
                    .map(|v| match v {
                        Value::String(s) => s,
                        other => other.to_string(),
                    })
                    .collect(),
            ),
            Some(Value::Number(n)) => TextList::Text(n.to_string()),
            _ => TextList::default(),
        })
    }
}

impl From<&str> for TextList {
    fn from(s: &str) -> Self {
        TextList::Text(s.to_string())
    }
}

/// A catalog meal as the planner sees it.
///
/// Deserialization is forgiving so that stored plan documents written by
/// older clients (camelCase keys, `calorie`, `carbohydrates`, numeric
/// strings) still load.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Meal {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "calorie", deserialize_with = "lenient::int")]
    pub calories: i64,
    #[serde(default, deserialize_with = "lenient::float")]
    pub protein: f64,
    #[serde(default, alias = "carbohydrates", deserialize_with = "lenient::float")]
    pub carbs: f64,
    #[serde(default, deserialize_with = "lenient::float")]
    pub fat: f64,
    #[serde(default, alias = "dietType", deserialize_with = "lenient::string")]
    pub diet_type: String,
    #[serde(default, alias = "mealType", deserialize_with = "lenient::string")]
    pub meal_type: String,
    #[serde(default)]
    pub ingredients: TextList,
    #[serde(default)]
    pub tags: TextList,
    #[serde(default, alias = "suitableFor")]
    pub suitable_for: Option<String>,
    #[serde(default, alias = "preparationTime")]
    pub preparation_time: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl Slot {
    pub const ALL: [Slot; 4] = [Slot::Breakfast, Slot::Lunch, Slot::Dinner, Slot::Snack];

    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Breakfast => "breakfast",
            Slot::Lunch => "lunch",
            Slot::Dinner => "dinner",
            Slot::Snack => "snack",
        }
    }

    /// Slots filled for a profile eating `meals_per_day` times a day.
    /// Breakfast, lunch and dinner are always planned; four or more meals
    /// add a snack.
    pub fn for_meals_per_day(meals_per_day: usize) -> &'static [Slot] {
        const MAIN: &[Slot] = &[Slot::Breakfast, Slot::Lunch, Slot::Dinner];
        if meals_per_day >= 4 {
            &Self::ALL
        } else {
            MAIN
        }
    }

    /// Whether a free-text meal type tag belongs to this slot.
    pub fn matches(&self, meal_type: &str) -> bool {
        meal_type.to_lowercase().contains(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DayMeals {
    pub breakfast: Option<Meal>,
    pub lunch: Option<Meal>,
    pub dinner: Option<Meal>,
    #[serde(alias = "snacks")]
    pub snack: Option<Meal>,
}

impl DayMeals {
    pub fn get(&self, slot: Slot) -> Option<&Meal> {
        match slot {
            Slot::Breakfast => self.breakfast.as_ref(),
            Slot::Lunch => self.lunch.as_ref(),
            Slot::Dinner => self.dinner.as_ref(),
            Slot::Snack => self.snack.as_ref(),
        }
    }

    pub fn set(&mut self, slot: Slot, meal: Option<Meal>) {
        let target = match slot {
            Slot::Breakfast => &mut self.breakfast,
            Slot::Lunch => &mut self.lunch,
            Slot::Dinner => &mut self.dinner,
            Slot::Snack => &mut self.snack,
        };
        *target = meal;
    }

    /// Filled slots in breakfast, lunch, dinner, snack order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &Meal)> + '_ {
        Slot::ALL
            .iter()
            .filter_map(move |slot| self.get(*slot).map(|meal| (*slot, meal)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    #[serde(default, deserialize_with = "day_name")]
    pub day: String,
    #[serde(default)]
    pub meals: DayMeals,
}

/// Older documents numbered their days from 1; those map onto [`WEEK_DAYS`].
fn day_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let name = lenient::string(deserializer)?;
    Ok(match name.trim().parse::<usize>() {
        Ok(n @ 1..=7) => WEEK_DAYS[n - 1].to_string(),
        _ => name,
    })
}

impl DayPlan {
    pub fn empty(day: &str) -> Self {
        Self {
            day: day.to_string(),
            meals: DayMeals::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeeklyPlan {
    #[serde(default)]
    pub days: Vec<DayPlan>,
}

impl WeeklyPlan {
    /// Case-insensitive lookup by day name.
    pub fn day(&self, name: &str) -> Option<&DayPlan> {
        let name = name.trim();
        self.days.iter().find(|d| d.day.eq_ignore_ascii_case(name))
    }

    /// Every planned meal of the week, day by day.
    pub fn meals(&self) -> impl Iterator<Item = &Meal> + '_ {
        self.days.iter().flat_map(|d| d.meals.iter().map(|(_, m)| m))
    }
}

/// The profile fields the planner reads. Free text, straight from storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanningProfile {
    pub diet_type: Option<String>,
    pub religious_restrictions: Option<String>,
    pub disliked_foods: Option<String>,
    pub meals_per_day: Option<i32>,
    pub goal: Option<String>,
    pub activity_level: Option<String>,
    pub medical_conditions: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn meal_reads_legacy_field_names() {
        let meal: Meal = serde_json::from_value(json!({
            "name": "Oats",
            "calorie": "310",
            "carbohydrates": 54.5,
            "protein": null,
            "dietType": "Vegetarian",
            "mealType": "Breakfast",
            "ingredients": ["oats: 80g", "milk: 200ml"]
        }))
        .unwrap();

        assert_eq!(meal.calories, 310);
        assert_eq!(meal.carbs, 54.5);
        assert_eq!(meal.protein, 0.0);
        assert_eq!(meal.fat, 0.0);
        assert_eq!(meal.diet_type, "Vegetarian");
        assert_eq!(meal.meal_type, "Breakfast");
        assert_eq!(
            meal.ingredients,
            TextList::List(vec!["oats: 80g".into(), "milk: 200ml".into()])
        );
    }

    #[test]
    fn missing_or_null_text_fields_default_to_empty() {
        let meal: Meal = serde_json::from_value(json!({
            "name": null,
            "ingredients": null
        }))
        .unwrap();
        assert_eq!(meal.name, "");
        assert_eq!(meal.ingredients, TextList::default());
        assert!(meal.tags.entries().iter().all(|t| t.is_empty()));
    }

    #[test]
    fn text_list_splits_and_joins() {
        let text = TextList::from("chicken: 200g , rice: 1 cup");
        assert_eq!(text.entries(), vec!["chicken: 200g", "rice: 1 cup"]);

        let list = TextList::List(vec!["a".into(), "b".into()]);
        assert_eq!(list.as_text(), "a, b");
    }

    #[test]
    fn day_meals_accept_snacks_alias() {
        let day: DayPlan = serde_json::from_value(json!({
            "day": "Friday",
            "meals": { "snacks": { "name": "Almonds", "calories": 160 } }
        }))
        .unwrap();
        assert_eq!(day.meals.snack.as_ref().map(|m| m.name.as_str()), Some("Almonds"));
        assert!(day.meals.breakfast.is_none());
    }

    #[test]
    fn day_lookup_ignores_case_and_whitespace() {
        let plan = WeeklyPlan {
            days: WEEK_DAYS.iter().map(|d| DayPlan::empty(d)).collect(),
        };
        assert_eq!(plan.day("wednesday").map(|d| d.day.as_str()), Some("Wednesday"));
        assert_eq!(plan.day("  SUNDAY ").map(|d| d.day.as_str()), Some("Sunday"));
        assert!(plan.day("Funday").is_none());
    }

    #[test]
    fn slot_matches_by_substring() {
        assert!(Slot::Dinner.matches("Lunch/Dinner"));
        assert!(Slot::Lunch.matches("LUNCH"));
        assert!(!Slot::Breakfast.matches("brunch"));
        assert_eq!(Slot::for_meals_per_day(3).len(), 3);
        assert_eq!(Slot::for_meals_per_day(5), &Slot::ALL);
    }

    #[test]
    fn numbered_days_read_as_names() {
        let plan: WeeklyPlan = serde_json::from_value(json!({
            "days": [
                { "day": 1, "meals": { "lunch": { "name": "Soup" } } },
                { "day": "3" },
                { "day": 12 },
                { "meals": {} }
            ]
        }))
        .unwrap();
        let days: Vec<&str> = plan.days.iter().map(|d| d.day.as_str()).collect();
        assert_eq!(days, vec!["Monday", "Wednesday", "12", ""]);
        assert!(plan.day("monday").and_then(|d| d.meals.lunch.as_ref()).is_some());
    }
}
