use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::distribution::DistributionStatus;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(20))")]
#[serde(rename_all = "lowercase")]
pub enum AllocationStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl std::fmt::Display for AllocationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AllocationStatus::Pending => write!(f, "pending"),
            AllocationStatus::Approved => write!(f, "approved"),
            AllocationStatus::Rejected => write!(f, "rejected"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AllocateRequest {
    pub item_id: Uuid,
    #[schema(example = 50)]
    pub points: i64,
    pub distribution_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AllocationResponse {
    pub id: Uuid,
    pub item_id: Uuid,
    pub user_id: Uuid,
    pub distribution_id: Uuid,
    pub points_allocated: i64,
    pub status: AllocationStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<crate::entities::item_allocations::Model> for AllocationResponse {
    fn from(allocation: crate::entities::item_allocations::Model) -> Self {
        Self {
            id: allocation.id,
            item_id: allocation.item_id,
            user_id: allocation.user_id,
            distribution_id: allocation.distribution_id,
            points_allocated: allocation.points_allocated,
            status: allocation.status,
            created_at: allocation.created_at,
            updated_at: allocation.updated_at,
        }
    }
}

/// A caller's allocation joined with the item it targets and the
/// distribution it belongs to.
#[derive(Debug, Serialize, FromQueryResult, ToSchema)]
pub struct AllocationWithContext {
    pub id: Uuid,
    pub item_id: Uuid,
    pub user_id: Uuid,
    pub distribution_id: Uuid,
    pub points_allocated: i64,
    pub status: AllocationStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub item_title: String,
    pub distribution_name: String,
    pub distribution_status: DistributionStatus,
}

/// Compact per-item view used when nesting allocations under items.
#[derive(Debug, Serialize, ToSchema)]
pub struct AllocationSummary {
    pub item_id: Uuid,
    pub user_id: Uuid,
    pub points_allocated: i64,
    pub status: AllocationStatus,
}

impl From<crate::entities::item_allocations::Model> for AllocationSummary {
    fn from(allocation: crate::entities::item_allocations::Model) -> Self {
        Self {
            item_id: allocation.item_id,
            user_id: allocation.user_id,
            points_allocated: allocation.points_allocated,
            status: allocation.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&AllocationStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::from_str::<AllocationStatus>("\"rejected\"").unwrap(),
            AllocationStatus::Rejected
        );
    }
}
