use anyhow::Context;
use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use super::repo_types::PlanRow;
use crate::planner::model::WeeklyPlan;
use crate::planner::providers::{PlanStore, StoredPlan};

#[derive(Clone)]
pub struct PgPlanStore {
    db: PgPool,
}

impl PgPlanStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PlanStore for PgPlanStore {
    async fn save_plan(&self, user_id: Uuid, plan: &WeeklyPlan) -> anyhow::Result<StoredPlan> {
        let row = sqlx::query_as::<_, PlanRow>(
            r#"
            INSERT INTO meal_plans (user_id, plan)
            VALUES ($1, $2)
            RETURNING id, user_id, plan, created_at
            "#,
        )
        .bind(user_id)
        .bind(Json(plan))
        .fetch_one(&self.db)
        .await
        .context("insert meal plan")?;
        row.try_into()
    }

    async fn get_plan(&self, user_id: Uuid, plan_id: Uuid) -> anyhow::Result<Option<StoredPlan>> {
        let row = sqlx::query_as::<_, PlanRow>(
            r#"
            SELECT id, user_id, plan, created_at
            FROM meal_plans
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(plan_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .context("get meal plan")?;
        row.map(StoredPlan::try_from).transpose()
    }

    async fn latest_plan(&self, user_id: Uuid) -> anyhow::Result<Option<StoredPlan>> {
        let row = sqlx::query_as::<_, PlanRow>(
            r#"
            SELECT id, user_id, plan, created_at
            FROM meal_plans
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .context("latest meal plan")?;
        row.map(StoredPlan::try_from).transpose()
    }
}

pub async fn count(db: &PgPool) -> anyhow::Result<i64> {
    let (n,) = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM meal_plans")
        .fetch_one(db)
        .await
        .context("count meal plans")?;
    Ok(n)
}
