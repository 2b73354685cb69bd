use crate::entities::{
    distribution_entity as distributions, item_allocation_entity as allocations,
    item_entity as items,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    AllocationSummary, CreateDistributionRequest, DistributionDetailResponse, DistributionResponse,
    DistributionStatus, ItemResponse, ItemWithAllocations, UpdateDistributionRequest,
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Clone)]
pub struct DistributionService {
    pool: DatabaseConnection,
}

impl DistributionService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn create_distribution(
        &self,
        created_by: Uuid,
        request: CreateDistributionRequest,
    ) -> AppResult<DistributionResponse> {
        if request.name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Name, start date, and end date are required".to_string(),
            ));
        }
        check_date_range(request.start_date, request.end_date)?;

        let now = Utc::now();
        let model = distributions::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(request.name),
            status: Set(request.status.unwrap_or(DistributionStatus::Pending)),
            start_date: Set(request.start_date),
            end_date: Set(request.end_date),
            created_by: Set(created_by),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
        }
        .insert(&self.pool)
        .await?;

        Ok(model.into())
    }

    /// Admins see every status; everyone else only distributions that are
    /// running or finished.
    pub async fn list_distributions(&self, is_admin: bool) -> AppResult<Vec<DistributionResponse>> {
        let mut query = distributions::Entity::find();
        if !is_admin {
            query = query.filter(distributions::Column::Status.is_in([
                DistributionStatus::Active,
                DistributionStatus::Completed,
            ]));
        }
        let models = query
            .order_by_desc(distributions::Column::CreatedAt)
            .all(&self.pool)
            .await?;

        Ok(models.into_iter().map(DistributionResponse::from).collect())
    }

    /// One distribution with its items, each carrying the allocations
    /// pledged against it.
    pub async fn get_distribution(&self, id: Uuid) -> AppResult<DistributionDetailResponse> {
        let distribution = distributions::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Distribution not found".to_string()))?;

        let item_models = items::Entity::find()
            .filter(items::Column::DistributionId.eq(id))
            .order_by_asc(items::Column::CreatedAt)
            .all(&self.pool)
            .await?;

        let allocation_models = allocations::Entity::find()
            .filter(allocations::Column::DistributionId.eq(id))
            .all(&self.pool)
            .await?;

        let mut by_item: HashMap<Uuid, Vec<AllocationSummary>> = HashMap::new();
        for allocation in allocation_models {
            by_item
                .entry(allocation.item_id)
                .or_default()
                .push(allocation.into());
        }

        let items = item_models
            .into_iter()
            .map(|item| {
                let allocations = by_item.remove(&item.id).unwrap_or_default();
                ItemWithAllocations {
                    item: ItemResponse::from(item),
                    allocations,
                }
            })
            .collect();

        Ok(DistributionDetailResponse {
            distribution: distribution.into(),
            items,
        })
    }

    pub async fn update_distribution(
        &self,
        id: Uuid,
        request: UpdateDistributionRequest,
    ) -> AppResult<DistributionResponse> {
        let current = distributions::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Distribution not found".to_string()))?;

        // The window must stay valid whichever end of it moves.
        check_date_range(
            request.start_date.unwrap_or(current.start_date),
            request.end_date.unwrap_or(current.end_date),
        )?;

        let mut model = current.into_active_model();

        if let Some(name) = request.name {
            if name.trim().is_empty() {
                return Err(AppError::ValidationError("Name cannot be empty".to_string()));
            }
            model.name = Set(name);
        }
        if let Some(status) = request.status {
            model.status = Set(status);
        }
        if let Some(start_date) = request.start_date {
            model.start_date = Set(start_date);
        }
        if let Some(end_date) = request.end_date {
            model.end_date = Set(end_date);
        }
        model.updated_at = Set(Some(Utc::now()));

        let updated = model.update(&self.pool).await?;
        Ok(updated.into())
    }

    pub async fn delete_distribution(&self, id: Uuid) -> AppResult<()> {
        let result = distributions::Entity::delete_by_id(id)
            .exec(&self.pool)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Distribution not found".to_string()));
        }
        Ok(())
    }
}

fn check_date_range(start: DateTime<Utc>, end: DateTime<Utc>) -> AppResult<()> {
    if end <= start {
        return Err(AppError::ValidationError(
            "End date must be after start date".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_valid_window_passes() {
        let start = Utc::now();
        assert!(check_date_range(start, start + Duration::days(7)).is_ok());
    }

    #[test]
    fn test_inverted_or_empty_window_is_rejected() {
        let start = Utc::now();
        assert!(check_date_range(start, start).is_err());
        assert!(check_date_range(start, start - Duration::hours(1)).is_err());
    }
}
