use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::item::ItemWithAllocations;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(20))")]
#[serde(rename_all = "lowercase")]
pub enum DistributionStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "completed")]
    Completed,
}

impl std::fmt::Display for DistributionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DistributionStatus::Draft => write!(f, "draft"),
            DistributionStatus::Pending => write!(f, "pending"),
            DistributionStatus::Active => write!(f, "active"),
            DistributionStatus::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateDistributionRequest {
    #[schema(example = "Q3 hardware round")]
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Defaults to `pending` when omitted.
    pub status: Option<DistributionStatus>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateDistributionRequest {
    pub name: Option<String>,
    pub status: Option<DistributionStatus>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DistributionResponse {
    pub id: Uuid,
    pub name: String,
    pub status: DistributionStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub created_by: Uuid,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<crate::entities::distributions::Model> for DistributionResponse {
    fn from(distribution: crate::entities::distributions::Model) -> Self {
        Self {
            id: distribution.id,
            name: distribution.name,
            status: distribution.status,
            start_date: distribution.start_date,
            end_date: distribution.end_date,
            created_by: distribution.created_by,
            created_at: distribution.created_at,
            updated_at: distribution.updated_at,
        }
    }
}

/// Single-distribution read: the distribution plus its items, each with
/// the allocations committed against it.
#[derive(Debug, Serialize, ToSchema)]
pub struct DistributionDetailResponse {
    #[serde(flatten)]
    pub distribution: DistributionResponse,
    pub items: Vec<ItemWithAllocations>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&DistributionStatus::Active).unwrap(),
            "\"active\""
        );
        assert_eq!(
            serde_json::from_str::<DistributionStatus>("\"draft\"").unwrap(),
            DistributionStatus::Draft
        );
    }
}
