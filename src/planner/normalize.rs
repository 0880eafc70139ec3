use serde::Serialize;

use super::model::PlanningProfile;

pub const DEFAULT_MEALS_PER_DAY: usize = 3;

/// Case-folded view of a profile, ready for matching against meals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Preferences {
    pub diet_type: String,
    pub religious_restriction: String,
    pub disliked_foods: Vec<String>,
    pub meals_per_day: usize,
}

impl Preferences {
    pub fn from_profile(profile: &PlanningProfile) -> Self {
        let meals_per_day = profile
            .meals_per_day
            .and_then(|n| usize::try_from(n).ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MEALS_PER_DAY);

        Self {
            diet_type: normalize(profile.diet_type.as_deref().unwrap_or_default()),
            religious_restriction: normalize(
                profile.religious_restrictions.as_deref().unwrap_or_default(),
            ),
            disliked_foods: split_tokens(profile.disliked_foods.as_deref().unwrap_or_default()),
            meals_per_day,
        }
    }
}

pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Comma-separated free text to normalized, non-empty tokens.
pub fn split_tokens(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(normalize)
        .filter(|t| !t.is_empty())
        .collect()
}
