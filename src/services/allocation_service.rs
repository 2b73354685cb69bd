use crate::entities::{
    distribution_entity as distributions, item_allocation_entity as allocations,
    item_entity as items, notification_entity as notifications, user_entity as users,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    AllocateRequest, AllocationResponse, AllocationStatus, AllocationWithContext,
    DistributionStatus,
};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set, TransactionTrait,
};
use uuid::Uuid;

const ALLOCATION_NOTIFICATION_KIND: &str = "point_allocation";

#[derive(Clone)]
pub struct AllocationService {
    pool: DatabaseConnection,
}

impl AllocationService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Commit a point pledge toward an item within an active distribution.
    ///
    /// Resubmitting for the same (item, user, distribution) replaces the
    /// previous pledge: the spent counter moves by the delta between the
    /// old and new amount, never by the full amount twice. The user row
    /// is locked for the duration of the transaction, so concurrent
    /// pledges by the same user serialize and each delta is computed
    /// against the committed allocation, and the counter update is a
    /// conditional `points >= points_spent + delta` that caps the spend
    /// at the budget; a request that would overdraw fails validation.
    pub async fn allocate_points(
        &self,
        user_id: Uuid,
        request: AllocateRequest,
    ) -> AppResult<AllocationResponse> {
        if request.points <= 0 {
            return Err(AppError::ValidationError(
                "Points must be a positive amount".to_string(),
            ));
        }

        let txn = self.pool.begin().await?;

        // Serializes allocations for one user: a later request blocks
        // here until the earlier one commits, then reads the committed
        // allocation rather than a stale snapshot.
        locked_user(user_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let distribution = distributions::Entity::find_by_id(request.distribution_id)
            .one(&txn)
            .await?;
        match distribution {
            Some(d) if d.status == DistributionStatus::Active => {}
            _ => {
                return Err(AppError::ValidationError(
                    "Distribution is not active".to_string(),
                ));
            }
        }

        let item = items::Entity::find_by_id(request.item_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Item not found".to_string()))?;
        if item.distribution_id != request.distribution_id {
            return Err(AppError::ValidationError(
                "Item does not belong to this distribution".to_string(),
            ));
        }

        let existing = allocations::Entity::find()
            .filter(allocations::Column::ItemId.eq(request.item_id))
            .filter(allocations::Column::UserId.eq(user_id))
            .filter(allocations::Column::DistributionId.eq(request.distribution_id))
            .one(&txn)
            .await?;

        let delta = allocation_delta(
            existing.as_ref().map(|a| a.points_allocated),
            request.points,
        );

        if delta != 0 {
            let updated = users::Entity::update_many()
                .col_expr(
                    users::Column::PointsSpent,
                    Expr::col(users::Column::PointsSpent).add(delta),
                )
                .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
                .filter(users::Column::Id.eq(user_id))
                .filter(
                    Expr::col(users::Column::Points)
                        .gte(Expr::col(users::Column::PointsSpent).add(delta)),
                )
                .exec(&txn)
                .await?;

            if updated.rows_affected == 0 {
                return Err(AppError::ValidationError("Insufficient points".to_string()));
            }
        }

        let now = Utc::now();
        let allocation = match existing {
            Some(model) => {
                let mut active = model.into_active_model();
                active.points_allocated = Set(request.points);
                active.status = Set(AllocationStatus::Pending);
                active.updated_at = Set(Some(now));
                active.update(&txn).await?
            }
            None => {
                allocations::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    item_id: Set(request.item_id),
                    user_id: Set(user_id),
                    distribution_id: Set(request.distribution_id),
                    points_allocated: Set(request.points),
                    status: Set(AllocationStatus::Pending),
                    created_at: Set(Some(now)),
                    updated_at: Set(Some(now)),
                }
                .insert(&txn)
                .await?
            }
        };

        notifications::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            kind: Set(ALLOCATION_NOTIFICATION_KIND.to_string()),
            content: Set(format!(
                "You have allocated {} points to {}",
                request.points, item.title
            )),
            distribution_id: Set(Some(request.distribution_id)),
            item_id: Set(Some(request.item_id)),
            read: Set(false),
            created_at: Set(Some(now)),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        Ok(allocation.into())
    }

    /// All of the caller's allocations, joined with the item title and
    /// the distribution name/status, newest first.
    pub async fn list_user_allocations(
        &self,
        user_id: Uuid,
    ) -> AppResult<Vec<AllocationWithContext>> {
        let rows = allocations::Entity::find()
            .filter(allocations::Column::UserId.eq(user_id))
            .join(JoinType::InnerJoin, allocations::Relation::Item.def())
            .join(
                JoinType::InnerJoin,
                allocations::Relation::Distribution.def(),
            )
            .select_only()
            .column(allocations::Column::Id)
            .column(allocations::Column::ItemId)
            .column(allocations::Column::UserId)
            .column(allocations::Column::DistributionId)
            .column(allocations::Column::PointsAllocated)
            .column(allocations::Column::Status)
            .column(allocations::Column::CreatedAt)
            .column_as(items::Column::Title, "item_title")
            .column_as(distributions::Column::Name, "distribution_name")
            .column_as(distributions::Column::Status, "distribution_status")
            .order_by_desc(allocations::Column::CreatedAt)
            .into_model::<AllocationWithContext>()
            .all(&self.pool)
            .await?;

        Ok(rows)
    }
}

/// How far the spent counter moves when a pledge of `requested` points
/// lands on top of an optional previous pledge.
fn allocation_delta(existing: Option<i64>, requested: i64) -> i64 {
    requested - existing.unwrap_or(0)
}

/// The user row, selected `FOR UPDATE`.
fn locked_user(user_id: Uuid) -> Select<users::Entity> {
    users::Entity::find_by_id(user_id).lock_exclusive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    #[test]
    fn test_first_allocation_moves_by_full_amount() {
        assert_eq!(allocation_delta(None, 90), 90);
    }

    #[test]
    fn test_user_read_takes_row_lock() {
        let sql = locked_user(Uuid::nil())
            .build(DbBackend::Postgres)
            .to_string();
        assert!(sql.ends_with("FOR UPDATE"), "{sql}");
    }

    #[test]
    fn test_resubmission_moves_by_delta_only() {
        assert_eq!(allocation_delta(Some(90), 150), 60);
        assert_eq!(allocation_delta(Some(150), 90), -60);
        assert_eq!(allocation_delta(Some(90), 90), 0);
    }
}
