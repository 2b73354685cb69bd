use crate::entities::{
    distribution_entity as distributions, item_allocation_entity as allocations,
    item_entity as items, user_entity as users,
};
use crate::error::AppResult;
use crate::models::AnalyticsResponse;
use sea_orm::sea_query::Expr;
use sea_orm::{DatabaseConnection, EntityTrait, FromQueryResult, PaginatorTrait, QuerySelect};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Clone)]
pub struct AnalyticsService {
    pool: DatabaseConnection,
}

#[derive(Debug, FromQueryResult)]
struct DistributionUsage {
    distribution_id: Uuid,
    participants: i64,
    points_used: i64,
}

impl AnalyticsService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Per-distribution participation and spend, plus the global item
    /// count. One grouped aggregate over the allocations table covers
    /// every distribution at once.
    pub async fn get_overview(&self) -> AppResult<AnalyticsResponse> {
        let total_users = users::Entity::find().count(&self.pool).await? as i64;
        let total_items = items::Entity::find().count(&self.pool).await? as i64;

        let distribution_ids: Vec<Uuid> = distributions::Entity::find()
            .select_only()
            .column(distributions::Column::Id)
            .into_tuple()
            .all(&self.pool)
            .await?;

        let usage = allocations::Entity::find()
            .select_only()
            .column(allocations::Column::DistributionId)
            .column_as(Expr::cust("COUNT(DISTINCT user_id)"), "participants")
            .column_as(
                Expr::cust("CAST(SUM(points_allocated) AS BIGINT)"),
                "points_used",
            )
            .group_by(allocations::Column::DistributionId)
            .into_model::<DistributionUsage>()
            .all(&self.pool)
            .await?;

        let mut participation_rates: HashMap<Uuid, i64> =
            distribution_ids.iter().map(|id| (*id, 0)).collect();
        let mut points_used: HashMap<Uuid, i64> =
            distribution_ids.iter().map(|id| (*id, 0)).collect();

        for row in usage {
            participation_rates.insert(
                row.distribution_id,
                participation_rate(row.participants, total_users),
            );
            points_used.insert(row.distribution_id, row.points_used);
        }

        Ok(AnalyticsResponse {
            total_items,
            participation_rates,
            points_used,
        })
    }
}

/// Percentage of users who pledged at least once, rounded to the nearest
/// whole percent. An empty user table counts as zero participation.
fn participation_rate(participants: i64, total_users: i64) -> i64 {
    if total_users <= 0 {
        return 0;
    }
    ((participants as f64 / total_users as f64) * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participation_rate_rounds() {
        assert_eq!(participation_rate(1, 3), 33);
        assert_eq!(participation_rate(2, 3), 67);
        assert_eq!(participation_rate(3, 3), 100);
        assert_eq!(participation_rate(0, 10), 0);
    }

    #[test]
    fn test_participation_rate_with_no_users() {
        assert_eq!(participation_rate(0, 0), 0);
    }
}
