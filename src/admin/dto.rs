use serde::{Deserialize, Serialize};

use crate::auth::repo_types::Role;

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_users: i64,
    pub total_meals: i64,
    pub total_meal_plans: i64,
}

/// Body of `PUT /admin/users/:id/role`.
#[derive(Debug, Deserialize)]
pub struct RoleUpdate {
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn role_update_accepts_known_roles_only() {
        let body: RoleUpdate = serde_json::from_value(json!({ "role": "admin" })).unwrap();
        assert_eq!(body.role, Role::Admin);
        assert!(serde_json::from_value::<RoleUpdate>(json!({ "role": "chef" })).is_err());
    }

    #[test]
    fn stats_serialize_flat() {
        let v = serde_json::to_value(DashboardStats {
            total_users: 3,
            total_meals: 12,
            total_meal_plans: 5,
        })
        .unwrap();
        assert_eq!(v, json!({ "total_users": 3, "total_meals": 12, "total_meal_plans": 5 }));
    }
}
