use serde::Serialize;
use std::collections::HashMap;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyticsResponse {
    pub total_items: i64,
    /// Percentage of all users with at least one allocation, keyed by
    /// distribution id.
    #[schema(value_type = Object)]
    pub participation_rates: HashMap<Uuid, i64>,
    /// Sum of allocated points, keyed by distribution id.
    #[schema(value_type = Object)]
    pub points_used: HashMap<Uuid, i64>,
}
