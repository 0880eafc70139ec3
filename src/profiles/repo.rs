use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::dto::SaveProfileRequest;
use super::repo_types::ProfileRow;
use crate::planner::model::PlanningProfile;
use crate::planner::providers::ProfileSource;

const PROFILE_COLUMNS: &str = r#"
    id, user_id, full_name, age, gender, height, weight, goal, activity_level,
    medical_conditions, diet_type, cultural_preference, religious_restrictions,
    disliked_foods, meals_per_day, breakfast_time, lunch_time, dinner_time, created_at
"#;

pub async fn insert(
    db: &PgPool,
    user_id: Uuid,
    req: &SaveProfileRequest,
) -> anyhow::Result<ProfileRow> {
    let row = sqlx::query_as::<_, ProfileRow>(&format!(
        r#"
        INSERT INTO profiles (
            user_id, full_name, age, gender, height, weight, goal, activity_level,
            medical_conditions, diet_type, cultural_preference, religious_restrictions,
            disliked_foods, meals_per_day, breakfast_time, lunch_time, dinner_time
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
        RETURNING {PROFILE_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(&req.full_name)
    .bind(req.age)
    .bind(&req.gender)
    .bind(req.height)
    .bind(req.weight)
    .bind(&req.goal)
    .bind(&req.activity_level)
    .bind(req.medical_conditions_csv())
    .bind(&req.diet_type)
    .bind(&req.cultural_preference)
    .bind(&req.religious_restrictions)
    .bind(&req.disliked_foods)
    .bind(req.meals_per_day)
    .bind(&req.meal_times.breakfast)
    .bind(&req.meal_times.lunch)
    .bind(&req.meal_times.dinner)
    .fetch_one(db)
    .await
    .context("insert profile")?;
    Ok(row)
}

/// Newest profile of a user, if they ever saved one.
pub async fn latest_for_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<ProfileRow>> {
    let row = sqlx::query_as::<_, ProfileRow>(&format!(
        r#"
        SELECT {PROFILE_COLUMNS}
        FROM profiles
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT 1
        "#
    ))
    .bind(user_id)
    .fetch_optional(db)
    .await
    .context("latest profile")?;
    Ok(row)
}

#[derive(Clone)]
pub struct PgProfileSource {
    db: PgPool,
}

impl PgProfileSource {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileSource for PgProfileSource {
    async fn latest_profile(&self, user_id: Uuid) -> anyhow::Result<Option<PlanningProfile>> {
        Ok(latest_for_user(&self.db, user_id).await?.map(Into::into))
    }
}
