use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::allocation::AllocationSummary;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateItemRequest {
    #[schema(example = "Mechanical keyboard")]
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<i64>,
    pub distribution_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateItemRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ItemListQuery {
    pub distribution_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<i64>,
    pub distribution_id: Uuid,
    pub created_by: Uuid,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<crate::entities::items::Model> for ItemResponse {
    fn from(item: crate::entities::items::Model) -> Self {
        Self {
            id: item.id,
            title: item.title,
            description: item.description,
            image_url: item.image_url,
            price: item.price,
            distribution_id: item.distribution_id,
            created_by: item.created_by,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ItemWithAllocations {
    #[serde(flatten)]
    pub item: ItemResponse,
    pub allocations: Vec<AllocationSummary>,
}
