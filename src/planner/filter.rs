use super::model::Meal;
use super::normalize::{normalize, split_tokens, Preferences};

/// Religious restrictions the filter knows how to enforce. Anything else a
/// profile says is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReligiousRestriction {
    NoPork,
    Halal,
    Vegetarian,
}

impl ReligiousRestriction {
    pub fn parse(normalized: &str) -> Option<Self> {
        match normalized {
            "no pork" => Some(Self::NoPork),
            "halal" => Some(Self::Halal),
            "vegetarian" => Some(Self::Vegetarian),
            _ => None,
        }
    }

    fn allows(&self, ingredients: &str, tags: &[String]) -> bool {
        match self {
            Self::NoPork => !ingredients.contains("pork"),
            Self::Halal => tags.iter().any(|t| t == "halal"),
            Self::Vegetarian => tags.iter().any(|t| t == "vegetarian"),
        }
    }
}

/// Meals from `catalog` that satisfy every active preference.
///
/// An empty result is not an error here; plan generation decides what that
/// means.
pub fn filter_meals(catalog: Vec<Meal>, prefs: &Preferences) -> Vec<Meal> {
    let restriction = ReligiousRestriction::parse(&prefs.religious_restriction);
    catalog
        .into_iter()
        .filter(|meal| is_admissible(meal, prefs, restriction))
        .collect()
}

fn is_admissible(meal: &Meal, prefs: &Preferences, restriction: Option<ReligiousRestriction>) -> bool {
    let name = normalize(&meal.name);
    let ingredients = normalize(&meal.ingredients.as_text());

    if prefs
        .disliked_foods
        .iter()
        .any(|token| ingredients.contains(token.as_str()) || name.contains(token.as_str()))
    {
        return false;
    }

    if !prefs.diet_type.is_empty() && prefs.diet_type != normalize(&meal.diet_type) {
        return false;
    }

    match restriction {
        Some(r) => r.allows(&ingredients, &split_tokens(&meal.tags.as_text())),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::model::{PlanningProfile, TextList};

    fn meal(name: &str, diet: &str, ingredients: &str, tags: &str) -> Meal {
        Meal {
            name: name.into(),
            diet_type: diet.into(),
            meal_type: "Dinner".into(),
            ingredients: ingredients.into(),
            tags: tags.into(),
            ..Default::default()
        }
    }

    fn prefs(diet: &str, religious: &str, disliked: &str) -> Preferences {
        Preferences::from_profile(&PlanningProfile {
            diet_type: Some(diet.into()),
            religious_restrictions: Some(religious.into()),
            disliked_foods: Some(disliked.into()),
            ..Default::default()
        })
    }

    fn names(meals: &[Meal]) -> Vec<&str> {
        meals.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn vegetarian_profile_drops_pork_and_keeps_veggie_bowl() {
        let catalog = vec![
            meal("Pork Stir Fry", "Omnivore", "pork: 200g, soy sauce: 2 tbsp", ""),
            meal("Veggie Bowl", "Vegetarian", "quinoa: 1 cup, spinach: 50g", ""),
        ];
        let out = filter_meals(catalog, &prefs("vegetarian", "", "pork,shrimp"));
        assert_eq!(names(&out), vec!["Veggie Bowl"]);
    }

    #[test]
    fn disliked_tokens_match_name_or_ingredients() {
        let catalog = vec![
            meal("Shrimp Tacos", "", "tortilla: 2", ""),
            meal("Paella", "", "rice: 1 cup, Shrimp: 100g", ""),
            meal("Lentil Soup", "", "lentils: 1 cup", ""),
        ];
        let p = prefs("", "", "shrimp");
        let out = filter_meals(catalog, &p);
        assert_eq!(names(&out), vec!["Lentil Soup"]);
        for m in &out {
            for token in &p.disliked_foods {
                assert!(!m.name.to_lowercase().contains(token));
                assert!(!m.ingredients.as_text().to_lowercase().contains(token));
            }
        }
    }

    #[test]
    fn diet_type_must_match_exactly_ignoring_case() {
        let catalog = vec![
            meal("A", "KETO", "", ""),
            meal("B", "keto-friendly", "", ""),
            meal("C", "", "", ""),
        ];
        let out = filter_meals(catalog, &prefs("Keto", "", ""));
        assert_eq!(names(&out), vec!["A"]);
        assert!(out.iter().all(|m| m.diet_type.eq_ignore_ascii_case("keto")));
    }

    #[test]
    fn no_pork_checks_ingredients() {
        let catalog = vec![
            meal("Carbonara", "", "pancetta: 50g, PORK belly: 20g", ""),
            meal("Pesto Pasta", "", "pasta: 100g, basil: 10g", ""),
        ];
        let out = filter_meals(catalog, &prefs("", "No Pork", ""));
        assert_eq!(names(&out), vec!["Pesto Pasta"]);
    }

    #[test]
    fn halal_and_vegetarian_require_explicit_tag() {
        let catalog = vec![
            meal("Lamb Kofta", "", "lamb: 200g", "Halal, grill"),
            meal("Beef Stew", "", "beef: 200g", "comfort"),
            Meal {
                tags: TextList::List(vec!["vegetarian".into()]),
                ..meal("Dal", "", "lentils: 1 cup", "")
            },
        ];

        let halal = filter_meals(catalog.clone(), &prefs("", "halal", ""));
        assert_eq!(names(&halal), vec!["Lamb Kofta"]);

        let veg = filter_meals(catalog, &prefs("", "vegetarian", ""));
        assert_eq!(names(&veg), vec!["Dal"]);
    }

    #[test]
    fn unknown_restriction_is_ignored() {
        let catalog = vec![meal("Anything", "", "pork: 1", "")];
        let out = filter_meals(catalog, &prefs("", "kosher", ""));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn empty_catalog_gives_empty_result() {
        assert!(filter_meals(Vec::new(), &prefs("vegan", "halal", "nuts")).is_empty());
    }
}
