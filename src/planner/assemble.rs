use rand::seq::SliceRandom;
use rand::Rng;

use super::error::PlanError;
use super::model::{DayPlan, Meal, Slot, WeeklyPlan, WEEK_DAYS};

/// Lays admissible meals out over Monday..Sunday.
///
/// Each slot picks uniformly from the meals whose type matches it, or from
/// all of `meals` when none do. Days are independent, so a meal may repeat
/// within the week.
pub fn assemble_week<R>(
    meals: &[Meal],
    meals_per_day: usize,
    rng: &mut R,
) -> Result<WeeklyPlan, PlanError>
where
    R: Rng + ?Sized,
{
    if meals.is_empty() {
        return Err(PlanError::NoSuitableMeals);
    }

    let slots = Slot::for_meals_per_day(meals_per_day);
    let buckets: Vec<(Slot, Vec<&Meal>)> = slots
        .iter()
        .map(|slot| {
            let bucket: Vec<&Meal> = meals.iter().filter(|m| slot.matches(&m.meal_type)).collect();
            (*slot, bucket)
        })
        .collect();

    let days = WEEK_DAYS
        .iter()
        .map(|day| {
            let mut plan = DayPlan::empty(day);
            for (slot, bucket) in &buckets {
                let pick = match bucket.choose(rng) {
                    Some(meal) => Some(*meal),
                    None => meals.choose(rng),
                };
                plan.meals.set(*slot, pick.cloned());
            }
            plan
        })
        .collect();

    Ok(WeeklyPlan { days })
}
