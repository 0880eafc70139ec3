use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::planner::model::WeeklyPlan;
use crate::planner::providers::StoredPlan;

/// `meal_plans` row. The plan itself is an opaque JSONB document.
#[derive(Debug, FromRow)]
pub struct PlanRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan: serde_json::Value,
    pub created_at: OffsetDateTime,
}

impl TryFrom<PlanRow> for StoredPlan {
    type Error = anyhow::Error;

    fn try_from(r: PlanRow) -> Result<Self, Self::Error> {
        let plan: WeeklyPlan = serde_json::from_value(r.plan)
            .map_err(|e| anyhow::anyhow!("malformed plan document {}: {}", r.id, e))?;
        Ok(Self {
            id: r.id,
            user_id: r.user_id,
            plan,
            created_at: r.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn legacy_document_parses() {
        let row = PlanRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            plan: json!({
                "days": [{
                    "day": "Monday",
                    "meals": {
                        "breakfast": {"name": "Oats", "calories": "300"},
                        "snacks": null
                    }
                }]
            }),
            created_at: OffsetDateTime::now_utc(),
        };
        let stored = StoredPlan::try_from(row).unwrap();
        let monday = stored.plan.day("monday").unwrap();
        assert_eq!(monday.meals.breakfast.as_ref().unwrap().calories, 300);
        assert!(monday.meals.snack.is_none());
    }

    #[test]
    fn non_object_document_is_an_error() {
        let row = PlanRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            plan: json!("not a plan"),
            created_at: OffsetDateTime::now_utc(),
        };
        let err = StoredPlan::try_from(row).unwrap_err();
        assert!(err.to_string().contains("malformed plan document"));
    }
}
