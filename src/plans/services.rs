use tracing::{info, warn};
use uuid::Uuid;

use crate::planner::{
    assemble::assemble_week,
    filter::filter_meals,
    grocery::{build_grocery_list, GroceryList},
    normalize::Preferences,
    nutrients::{summarize_day, summarize_week, DailyNutrientSummary, WeeklyNutrientSummary},
    providers::{MealCatalog, PlanStore, ProfileSource, StoredPlan},
    PlanError,
};

pub struct GeneratedPlan {
    pub stored: StoredPlan,
    pub preferences: Preferences,
}

/// Builds and stores a fresh week for `user_id` from their newest profile.
pub async fn generate_plan(
    catalog: &dyn MealCatalog,
    profiles: &dyn ProfileSource,
    store: &dyn PlanStore,
    user_id: Uuid,
) -> Result<GeneratedPlan, PlanError> {
    let profile = profiles
        .latest_profile(user_id)
        .await?
        .ok_or(PlanError::ProfileNotFound)?;
    let preferences = Preferences::from_profile(&profile);

    let meals = catalog.all_meals().await?;
    let catalog_size = meals.len();
    let admissible = filter_meals(meals, &preferences);
    if admissible.is_empty() {
        warn!(
            %user_id,
            catalog_size,
            diet_type = %preferences.diet_type,
            disliked = preferences.disliked_foods.len(),
            "no suitable meals for profile"
        );
        return Err(PlanError::NoSuitableMeals);
    }

    let plan = {
        let mut rng = rand::thread_rng();
        assemble_week(&admissible, preferences.meals_per_day, &mut rng)?
    };

    let stored = store.save_plan(user_id, &plan).await?;
    info!(
        %user_id,
        plan_id = %stored.id,
        catalog_size,
        admissible = admissible.len(),
        meals_per_day = preferences.meals_per_day,
        "meal plan generated"
    );
    Ok(GeneratedPlan {
        stored,
        preferences,
    })
}

pub async fn load_plan(
    store: &dyn PlanStore,
    user_id: Uuid,
    plan_id: Uuid,
) -> Result<StoredPlan, PlanError> {
    store
        .get_plan(user_id, plan_id)
        .await?
        .ok_or(PlanError::PlanNotFound)
}

pub async fn latest_plan(store: &dyn PlanStore, user_id: Uuid) -> Result<StoredPlan, PlanError> {
    store
        .latest_plan(user_id)
        .await?
        .ok_or(PlanError::PlanNotFound)
}

pub async fn day_nutrients(
    store: &dyn PlanStore,
    user_id: Uuid,
    plan_id: Uuid,
    day: &str,
) -> Result<DailyNutrientSummary, PlanError> {
    let stored = load_plan(store, user_id, plan_id).await?;
    let day_plan = stored
        .plan
        .day(day)
        .ok_or_else(|| PlanError::DayNotFound(day.to_string()))?;
    Ok(summarize_day(day_plan))
}

pub async fn week_nutrients(
    store: &dyn PlanStore,
    user_id: Uuid,
    plan_id: Uuid,
) -> Result<WeeklyNutrientSummary, PlanError> {
    let stored = load_plan(store, user_id, plan_id).await?;
    Ok(summarize_week(&stored.plan))
}

pub async fn grocery_list(
    store: &dyn PlanStore,
    user_id: Uuid,
    plan_id: Uuid,
) -> Result<GroceryList, PlanError> {
    let stored = load_plan(store, user_id, plan_id).await?;
    Ok(build_grocery_list(&stored.plan))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::planner::grocery::Category;
    use crate::planner::model::{Meal, PlanningProfile, WEEK_DAYS};
    use crate::planner::providers::memory::{BrokenCatalog, MemoryCatalog, MemoryPlans, MemoryProfiles};

    fn meal(name: &str, meal_type: &str, diet: &str, calories: i64, ingredients: &str) -> Meal {
        Meal {
            name: name.into(),
            meal_type: meal_type.into(),
            diet_type: diet.into(),
            calories,
            ingredients: ingredients.into(),
            ..Default::default()
        }
    }

    fn catalog() -> MemoryCatalog {
        MemoryCatalog(vec![
            meal("Pork Stir Fry", "Dinner", "omnivore", 700, "pork: 200g, rice: 1 cup"),
            meal("Veggie Bowl", "Lunch", "vegetarian", 520, "quinoa: 1 cup, spinach: 50g"),
            meal("Yogurt Parfait", "Breakfast", "vegetarian", 310, "yogurt: 200g, berries: 80g"),
            meal("Shrimp Pasta", "Dinner", "vegetarian", 650, "pasta: 100g, shrimp: 120g"),
        ])
    }

    fn profiles(user_id: Uuid, profile: PlanningProfile) -> MemoryProfiles {
        MemoryProfiles(HashMap::from([(user_id, profile)]))
    }

    fn vegetarian() -> PlanningProfile {
        PlanningProfile {
            diet_type: Some("Vegetarian".into()),
            disliked_foods: Some("pork,shrimp".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn generates_and_stores_a_filtered_week() {
        let user_id = Uuid::new_v4();
        let store = MemoryPlans::default();

        let generated = generate_plan(&catalog(), &profiles(user_id, vegetarian()), &store, user_id)
            .await
            .expect("plan generated");

        let plan = &generated.stored.plan;
        assert_eq!(plan.days.len(), 7);
        let days: Vec<&str> = plan.days.iter().map(|d| d.day.as_str()).collect();
        assert_eq!(days, WEEK_DAYS);
        for m in plan.meals() {
            assert!(["Veggie Bowl", "Yogurt Parfait"].contains(&m.name.as_str()));
        }
        // Dinner bucket is empty after filtering, so it falls back
        assert!(plan.days.iter().all(|d| d.meals.dinner.is_some()));
        assert_eq!(generated.preferences.disliked_foods, vec!["pork", "shrimp"]);

        let latest = latest_plan(&store, user_id).await.unwrap();
        assert_eq!(latest.id, generated.stored.id);
    }

    #[tokio::test]
    async fn empty_catalog_reports_no_suitable_meals() {
        let user_id = Uuid::new_v4();
        let err = generate_plan(
            &MemoryCatalog::default(),
            &profiles(user_id, PlanningProfile::default()),
            &MemoryPlans::default(),
            user_id,
        )
        .await
        .err()
        .expect("no plan");
        assert!(matches!(err, PlanError::NoSuitableMeals));
    }

    #[tokio::test]
    async fn missing_profile_is_reported() {
        let err = generate_plan(
            &catalog(),
            &MemoryProfiles::default(),
            &MemoryPlans::default(),
            Uuid::new_v4(),
        )
        .await
        .err()
        .expect("no plan");
        assert!(matches!(err, PlanError::ProfileNotFound));
    }

    #[tokio::test]
    async fn catalog_failure_is_a_storage_error() {
        let user_id = Uuid::new_v4();
        let err = generate_plan(
            &BrokenCatalog,
            &profiles(user_id, PlanningProfile::default()),
            &MemoryPlans::default(),
            user_id,
        )
        .await
        .err()
        .expect("no plan");
        assert!(matches!(err, PlanError::Storage(_)));
    }

    #[tokio::test]
    async fn nutrients_and_groceries_come_from_the_stored_plan() {
        let user_id = Uuid::new_v4();
        let store = MemoryPlans::default();
        let only_bowl = MemoryCatalog(vec![meal(
            "Chicken Rice",
            "Lunch",
            "",
            600,
            "chicken: 200g, rice: 1 cup",
        )]);
        let stored = generate_plan(&only_bowl, &profiles(user_id, PlanningProfile::default()), &store, user_id)
            .await
            .unwrap()
            .stored;

        let monday = day_nutrients(&store, user_id, stored.id, "MONDAY").await.unwrap();
        assert_eq!(monday.day, "Monday");
        assert_eq!(monday.totals.calories, 1800);
        assert_eq!(monday.meals.len(), 3);

        let week = week_nutrients(&store, user_id, stored.id).await.unwrap();
        assert_eq!(week.totals.calories, 1800 * 7);
        assert_eq!(week.averages.calories, 1800);

        let list = grocery_list(&store, user_id, stored.id).await.unwrap();
        assert_eq!(list.total_items, 2);
        assert_eq!(list.items[0].category, Category::GrainsAndCarbs);
        assert_eq!(list.items[1].category, Category::Proteins);
        assert!(list.items.iter().all(|i| i.usage_count == 21));
    }

    #[tokio::test]
    async fn unknown_day_and_unknown_plan_differ() {
        let user_id = Uuid::new_v4();
        let store = MemoryPlans::default();
        let stored = generate_plan(&catalog(), &profiles(user_id, vegetarian()), &store, user_id)
            .await
            .unwrap()
            .stored;

        let err = day_nutrients(&store, user_id, stored.id, "Someday").await.unwrap_err();
        assert!(matches!(err, PlanError::DayNotFound(ref d) if d == "Someday"));

        let err = day_nutrients(&store, user_id, Uuid::new_v4(), "Monday").await.unwrap_err();
        assert!(matches!(err, PlanError::PlanNotFound));

        // Plans are private to their owner
        let err = grocery_list(&store, Uuid::new_v4(), stored.id).await.unwrap_err();
        assert!(matches!(err, PlanError::PlanNotFound));
    }
}
