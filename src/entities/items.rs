use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
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

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::distributions::Entity",
        from = "Column::DistributionId",
        to = "super::distributions::Column::Id"
    )]
    Distribution,
    #[sea_orm(has_many = "super::item_allocations::Entity")]
    ItemAllocations,
}

impl Related<super::distributions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Distribution.def()
    }
}

impl Related<super::item_allocations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ItemAllocations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
