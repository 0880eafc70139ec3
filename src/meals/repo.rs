use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::dto::MealRequest;
use super::repo_types::MealRow;
use crate::planner::model::Meal;
use crate::planner::providers::MealCatalog;

const MEAL_COLUMNS: &str = r#"
    id, name, description, calories, protein, carbs, fat, diet_type, meal_type,
    ingredients, tags, suitable_for, preparation_time, created_at
"#;

pub async fn list_page(db: &PgPool, limit: i64, offset: i64) -> anyhow::Result<Vec<MealRow>> {
    let rows = sqlx::query_as::<_, MealRow>(&format!(
        r#"
        SELECT {MEAL_COLUMNS}
        FROM meals
        ORDER BY name ASC
        LIMIT $1 OFFSET $2
        "#
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
    .context("list meals")?;
    Ok(rows)
}

pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<MealRow>> {
    let rows = sqlx::query_as::<_, MealRow>(&format!("SELECT {MEAL_COLUMNS} FROM meals"))
        .fetch_all(db)
        .await
        .context("list all meals")?;
    Ok(rows)
}

pub async fn get(db: &PgPool, id: Uuid) -> anyhow::Result<Option<MealRow>> {
    let row = sqlx::query_as::<_, MealRow>(&format!(
        "SELECT {MEAL_COLUMNS} FROM meals WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(db)
    .await
    .context("get meal")?;
    Ok(row)
}

pub async fn create(db: &PgPool, req: &MealRequest) -> anyhow::Result<MealRow> {
    let row = sqlx::query_as::<_, MealRow>(&format!(
        r#"
        INSERT INTO meals (
            name, description, calories, protein, carbs, fat, diet_type, meal_type,
            ingredients, tags, suitable_for, preparation_time
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING {MEAL_COLUMNS}
        "#
    ))
    .bind(req.name.trim())
    .bind(&req.description)
    .bind(req.calories)
    .bind(req.protein)
    .bind(req.carbs)
    .bind(req.fat)
    .bind(&req.diet_type)
    .bind(&req.meal_type)
    .bind(req.ingredients_column())
    .bind(req.tags_column())
    .bind(&req.suitable_for)
    .bind(&req.preparation_time)
    .fetch_one(db)
    .await
    .context("insert meal")?;
    Ok(row)
}

pub async fn update(db: &PgPool, id: Uuid, req: &MealRequest) -> anyhow::Result<Option<MealRow>> {
    let row = sqlx::query_as::<_, MealRow>(&format!(
        r#"
        UPDATE meals SET
            name = $2, description = $3, calories = $4, protein = $5, carbs = $6, fat = $7,
            diet_type = $8, meal_type = $9, ingredients = $10, tags = $11,
            suitable_for = $12, preparation_time = $13
        WHERE id = $1
        RETURNING {MEAL_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(req.name.trim())
    .bind(&req.description)
    .bind(req.calories)
    .bind(req.protein)
    .bind(req.carbs)
    .bind(req.fat)
    .bind(&req.diet_type)
    .bind(&req.meal_type)
    .bind(req.ingredients_column())
    .bind(req.tags_column())
    .bind(&req.suitable_for)
    .bind(&req.preparation_time)
    .fetch_optional(db)
    .await
    .context("update meal")?;
    Ok(row)
}

pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM meals WHERE id = $1")
        .bind(id)
        .execute(db)
        .await
        .context("delete meal")?;
    Ok(result.rows_affected() > 0)
}

pub async fn count(db: &PgPool) -> anyhow::Result<i64> {
    let (n,) = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM meals")
        .fetch_one(db)
        .await
        .context("count meals")?;
    Ok(n)
}

/// Postgres-backed catalog handed to the planner.
#[derive(Clone)]
pub struct PgMealCatalog {
    db: PgPool,
}

impl PgMealCatalog {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MealCatalog for PgMealCatalog {
    async fn all_meals(&self) -> anyhow::Result<Vec<Meal>> {
        Ok(list_all(&self.db).await?.into_iter().map(Meal::from).collect())
    }
}
