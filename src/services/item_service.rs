use crate::entities::{
    distribution_entity as distributions, item_allocation_entity as allocations,
    item_entity as items,
};
use crate::error::{AppError, AppResult};
use crate::middlewares::AuthUser;
use crate::models::{
    AllocationSummary, CreateItemRequest, ItemResponse, ItemWithAllocations, UpdateItemRequest,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Clone)]
pub struct ItemService {
    pool: DatabaseConnection,
}

impl ItemService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Any authenticated user may add an item to a distribution.
    pub async fn create_item(
        &self,
        created_by: Uuid,
        request: CreateItemRequest,
    ) -> AppResult<ItemResponse> {
        if request.title.trim().is_empty() {
            return Err(AppError::ValidationError("Title is required".to_string()));
        }

        let distribution = distributions::Entity::find_by_id(request.distribution_id)
            .one(&self.pool)
            .await?;
        if distribution.is_none() {
            return Err(AppError::NotFound("Distribution not found".to_string()));
        }

        let now = Utc::now();
        let model = items::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(request.title),
            description: Set(request.description),
            image_url: Set(request.image_url),
            price: Set(request.price),
            distribution_id: Set(request.distribution_id),
            created_by: Set(created_by),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
        }
        .insert(&self.pool)
        .await?;

        Ok(model.into())
    }

    /// Items of one distribution, each with its allocation summaries.
    pub async fn list_items(&self, distribution_id: Uuid) -> AppResult<Vec<ItemWithAllocations>> {
        let item_models = items::Entity::find()
            .filter(items::Column::DistributionId.eq(distribution_id))
            .order_by_asc(items::Column::CreatedAt)
            .all(&self.pool)
            .await?;

        let allocation_models = allocations::Entity::find()
            .filter(allocations::Column::DistributionId.eq(distribution_id))
            .all(&self.pool)
            .await?;

        let mut by_item: HashMap<Uuid, Vec<AllocationSummary>> = HashMap::new();
        for allocation in allocation_models {
            by_item
                .entry(allocation.item_id)
                .or_default()
                .push(allocation.into());
        }

        Ok(item_models
            .into_iter()
            .map(|item| {
                let allocations = by_item.remove(&item.id).unwrap_or_default();
                ItemWithAllocations {
                    item: ItemResponse::from(item),
                    allocations,
                }
            })
            .collect())
    }

    pub async fn update_item(
        &self,
        caller: &AuthUser,
        id: Uuid,
        request: UpdateItemRequest,
    ) -> AppResult<ItemResponse> {
        let item = items::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Item not found".to_string()))?;

        Self::check_ownership(caller, item.created_by, "modify")?;

        let mut model = item.into_active_model();
        if let Some(title) = request.title {
            if title.trim().is_empty() {
                return Err(AppError::ValidationError("Title is required".to_string()));
            }
            model.title = Set(title);
        }
        if let Some(description) = request.description {
            model.description = Set(Some(description));
        }
        if let Some(image_url) = request.image_url {
            model.image_url = Set(Some(image_url));
        }
        if let Some(price) = request.price {
            model.price = Set(Some(price));
        }
        model.updated_at = Set(Some(Utc::now()));

        let updated = model.update(&self.pool).await?;
        Ok(updated.into())
    }

    pub async fn delete_item(&self, caller: &AuthUser, id: Uuid) -> AppResult<()> {
        let item = items::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Item not found".to_string()))?;

        Self::check_ownership(caller, item.created_by, "delete")?;

        items::Entity::delete_by_id(id).exec(&self.pool).await?;
        Ok(())
    }

    /// Mutations are restricted to the item's creator or an admin.
    fn check_ownership(caller: &AuthUser, created_by: Uuid, action: &str) -> AppResult<()> {
        if caller.id == created_by || caller.is_admin() {
            Ok(())
        } else {
            Err(AppError::PermissionDenied(format!(
                "Not allowed to {action} this item"
            )))
        }
    }
}
