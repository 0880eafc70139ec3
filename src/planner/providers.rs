use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use super::model::{Meal, PlanningProfile, WeeklyPlan};

/// Read access to the meal catalog.
#[async_trait]
pub trait MealCatalog: Send + Sync {
    async fn all_meals(&self) -> anyhow::Result<Vec<Meal>>;
}

/// Read access to user profiles.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Most recently created profile of the user.
    async fn latest_profile(&self, user_id: Uuid) -> anyhow::Result<Option<PlanningProfile>>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredPlan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan: WeeklyPlan,
    pub created_at: OffsetDateTime,
}

/// Document store for generated plans.
#[async_trait]
pub trait PlanStore: Send + Sync {
    async fn save_plan(&self, user_id: Uuid, plan: &WeeklyPlan) -> anyhow::Result<StoredPlan>;
    async fn get_plan(&self, user_id: Uuid, plan_id: Uuid) -> anyhow::Result<Option<StoredPlan>>;
    async fn latest_plan(&self, user_id: Uuid) -> anyhow::Result<Option<StoredPlan>>;
}

#[cfg(test)]
pub mod memory {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct MemoryCatalog(pub Vec<Meal>);

    #[async_trait]
    impl MealCatalog for MemoryCatalog {
        async fn all_meals(&self) -> anyhow::Result<Vec<Meal>> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    pub struct MemoryProfiles(pub HashMap<Uuid, PlanningProfile>);

    #[async_trait]
    impl ProfileSource for MemoryProfiles {
        async fn latest_profile(&self, user_id: Uuid) -> anyhow::Result<Option<PlanningProfile>> {
            Ok(self.0.get(&user_id).cloned())
        }
    }

    #[derive(Default)]
    pub struct MemoryPlans(pub Mutex<Vec<StoredPlan>>);

    #[async_trait]
    impl PlanStore for MemoryPlans {
        async fn save_plan(&self, user_id: Uuid, plan: &WeeklyPlan) -> anyhow::Result<StoredPlan> {
            // Round-trip through JSON like the real store does.
            let doc = serde_json::to_value(plan)?;
            let stored = StoredPlan {
                id: Uuid::new_v4(),
                user_id,
                plan: serde_json::from_value(doc)?,
                created_at: OffsetDateTime::now_utc(),
            };
            self.0
                .lock()
                .map_err(|_| anyhow::anyhow!("plan store poisoned"))?
                .push(stored.clone());
            Ok(stored)
        }

        async fn get_plan(&self, user_id: Uuid, plan_id: Uuid) -> anyhow::Result<Option<StoredPlan>> {
            let plans = self.0.lock().map_err(|_| anyhow::anyhow!("plan store poisoned"))?;
            Ok(plans
                .iter()
                .find(|p| p.id == plan_id && p.user_id == user_id)
                .cloned())
        }

        async fn latest_plan(&self, user_id: Uuid) -> anyhow::Result<Option<StoredPlan>> {
            let plans = self.0.lock().map_err(|_| anyhow::anyhow!("plan store poisoned"))?;
            Ok(plans.iter().rev().find(|p| p.user_id == user_id).cloned())
        }
    }

    /// A catalog that is always unreachable.
    pub struct BrokenCatalog;

    #[async_trait]
    impl MealCatalog for BrokenCatalog {
        async fn all_meals(&self) -> anyhow::Result<Vec<Meal>> {
            anyhow::bail!("catalog unavailable")
        }
    }
}
