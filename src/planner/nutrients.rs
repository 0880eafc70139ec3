use serde::Serialize;

use super::model::{DayPlan, Meal, Slot, WeeklyPlan, WEEK_DAYS};

pub const TARGET_CALORIES: i64 = 2000;
pub const TARGET_PROTEIN: i64 = 150;
pub const TARGET_CARBS: i64 = 250;
pub const TARGET_FAT: i64 = 70;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Macros {
    pub calories: i64,
    pub protein: i64,
    pub carbs: i64,
    pub fat: i64,
}

impl Macros {
    pub const TARGETS: Macros = Macros {
        calories: TARGET_CALORIES,
        protein: TARGET_PROTEIN,
        carbs: TARGET_CARBS,
        fat: TARGET_FAT,
    };

    /// Whole-gram macros of one meal; fractions are dropped.
    pub fn of(meal: &Meal) -> Self {
        Self {
            calories: meal.calories,
            protein: meal.protein.trunc() as i64,
            carbs: meal.carbs.trunc() as i64,
            fat: meal.fat.trunc() as i64,
        }
    }

    /// Saturates instead of overflowing on absurd stored values.
    fn add(self, other: Macros) -> Self {
        Self {
            calories: self.calories.saturating_add(other.calories),
            protein: self.protein.saturating_add(other.protein),
            carbs: self.carbs.saturating_add(other.carbs),
            fat: self.fat.saturating_add(other.fat),
        }
    }

    /// Per-day average over a full week, rounded half up.
    fn weekly_average(self) -> Self {
        let days = WEEK_DAYS.len() as f64;
        let avg = |v: i64| (v as f64 / days).round() as i64;
        Self {
            calories: avg(self.calories),
            protein: avg(self.protein),
            carbs: avg(self.carbs),
            fat: avg(self.fat),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealNutrients {
    pub slot: Slot,
    pub name: String,
    #[serde(flatten)]
    pub macros: Macros,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyNutrientSummary {
    pub day: String,
    pub totals: Macros,
    pub targets: Macros,
    pub meals: Vec<MealNutrients>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyNutrientSummary {
    pub days: Vec<DailyNutrientSummary>,
    pub totals: Macros,
    pub averages: Macros,
    pub targets: Macros,
}

pub fn summarize_day(day: &DayPlan) -> DailyNutrientSummary {
    let meals: Vec<MealNutrients> = day
        .meals
        .iter()
        .map(|(slot, meal)| MealNutrients {
            slot,
            name: meal.name.clone(),
            macros: Macros::of(meal),
        })
        .collect();
    let totals = meals.iter().fold(Macros::default(), |acc, m| acc.add(m.macros));

    DailyNutrientSummary {
        day: day.day.clone(),
        totals,
        targets: Macros::TARGETS,
        meals,
    }
}

/// Day summaries plus week totals. Averages always divide by seven, so
/// empty days pull the average down.
pub fn summarize_week(plan: &WeeklyPlan) -> WeeklyNutrientSummary {
    let days: Vec<DailyNutrientSummary> = plan.days.iter().map(summarize_day).collect();
    let totals = days.iter().fold(Macros::default(), |acc, d| acc.add(d.totals));

    WeeklyNutrientSummary {
        averages: totals.weekly_average(),
        totals,
        targets: Macros::TARGETS,
        days,
    }
}
