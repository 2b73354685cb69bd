use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MarkReadRequest {
    pub notification_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MarkReadResponse {
    /// Rows actually flipped to read; ids not owned by the caller are
    /// silently skipped.
    pub updated: u64,
}

#[derive(Debug, Serialize, FromQueryResult, ToSchema)]
pub struct NotificationResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
    pub distribution_id: Option<Uuid>,
    pub item_id: Option<Uuid>,
    pub read: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub distribution_name: Option<String>,
    pub item_title: Option<String>,
}
