use axum::Json;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    pub id: &'static str,
    pub name: &'static str,
    pub price: &'static str,
    pub features: Vec<&'static str>,
    pub highlighted: bool,
}

/// The pricing page is served from the backend for now; the catalog is
/// static until a billing integration lands.
#[must_use]
pub fn catalog() -> Vec<Plan> {
    vec![
        Plan {
            id: "free",
            name: "Starter",
            price: "$0",
            features: vec!["Up to 3 projects", "Basic analytics", "Community support"],
            highlighted: false,
        },
        Plan {
            id: "pro",
            name: "Pro",
            price: "$19",
            features: vec![
                "Unlimited projects",
                "Advanced analytics",
                "Priority support",
            ],
            highlighted: true,
        },
        Plan {
            id: "team",
            name: "Team",
            price: "$49",
            features: vec!["Team workspaces", "SSO (SAML)", "Admin controls"],
            highlighted: false,
        },
    ]
}

/// GET /api/plans
pub async fn list_plans() -> Json<Vec<Plan>> {
    Json(catalog())
}
