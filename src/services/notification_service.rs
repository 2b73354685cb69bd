use crate::entities::{
    distribution_entity as distributions, item_entity as items,
    notification_entity as notifications,
};
use crate::error::AppResult;
use crate::models::NotificationResponse;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait,
};
use uuid::Uuid;

const NOTIFICATION_PAGE_CAP: u64 = 50;

#[derive(Clone)]
pub struct NotificationService {
    pool: DatabaseConnection,
}

impl NotificationService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// The caller's notifications, newest first, capped at 50, joined
    /// with the distribution name and item title where present.
    pub async fn list_notifications(&self, user_id: Uuid) -> AppResult<Vec<NotificationResponse>> {
        let rows = notifications::Entity::find()
            .filter(notifications::Column::UserId.eq(user_id))
            .join(
                JoinType::LeftJoin,
                notifications::Relation::Distribution.def(),
            )
            .join(JoinType::LeftJoin, notifications::Relation::Item.def())
            .select_only()
            .column(notifications::Column::Id)
            .column(notifications::Column::UserId)
            // The column is named `type` in the table; alias it back to
            // the struct field.
            .column_as(notifications::Column::Kind, "kind")
            .column(notifications::Column::Content)
            .column(notifications::Column::DistributionId)
            .column(notifications::Column::ItemId)
            .column(notifications::Column::Read)
            .column(notifications::Column::CreatedAt)
            .column_as(distributions::Column::Name, "distribution_name")
            .column_as(items::Column::Title, "item_title")
            .order_by_desc(notifications::Column::CreatedAt)
            .limit(NOTIFICATION_PAGE_CAP)
            .into_model::<NotificationResponse>()
            .all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Flip `read` for the caller's rows among `ids`. Ids owned by other
    /// users are filtered out by the ownership clause, not an error.
    pub async fn mark_read(&self, user_id: Uuid, ids: Vec<Uuid>) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = notifications::Entity::update_many()
            .col_expr(notifications::Column::Read, Expr::value(true))
            .filter(notifications::Column::Id.is_in(ids))
            .filter(notifications::Column::UserId.eq(user_id))
            .exec(&self.pool)
            .await?;

        Ok(result.rows_affected)
    }
}
