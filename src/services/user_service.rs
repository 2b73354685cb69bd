use crate::entities::user_entity as users;
use crate::error::{AppError, AppResult};
use crate::external::IdentityUser;
use crate::models::{UserResponse, UserRole};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder, Set,
};
use uuid::Uuid;

/// Budget granted to a user the first time the identity provider hands
/// them to us.
const INITIAL_POINTS: i64 = 1000;

#[derive(Clone)]
pub struct UserService {
    pool: DatabaseConnection,
}

impl UserService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Load the user row behind a verified identity, provisioning it on
    /// first sight. The provider's role claim wins on creation and can
    /// promote an existing row to admin; it never demotes one.
    pub async fn ensure_user(&self, identity: &IdentityUser) -> AppResult<users::Model> {
        if let Some(user) = users::Entity::find_by_id(identity.id).one(&self.pool).await? {
            if identity.has_role("admin") && user.role != UserRole::Admin {
                let mut model = user.into_active_model();
                model.role = Set(UserRole::Admin);
                model.updated_at = Set(Some(Utc::now()));
                return Ok(model.update(&self.pool).await?);
            }
            return Ok(user);
        }

        let role = if identity.has_role("admin") {
            UserRole::Admin
        } else {
            UserRole::User
        };
        let now = Utc::now();

        let inserted = users::ActiveModel {
            id: Set(identity.id),
            email: Set(identity.email.clone()),
            name: Set(identity.display_name()),
            role: Set(role),
            points: Set(INITIAL_POINTS),
            points_spent: Set(0),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
        }
        .insert(&self.pool)
        .await;

        match inserted {
            Ok(user) => Ok(user),
            // Two first-login requests can race on the insert; the loser
            // picks up the row the winner created.
            Err(err) => {
                if let Some(user) = users::Entity::find_by_id(identity.id).one(&self.pool).await? {
                    Ok(user)
                } else {
                    Err(err.into())
                }
            }
        }
    }

    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<UserResponse> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        Ok(user.into())
    }

    /// Admin view over every user, oldest first.
    pub async fn list_users(&self) -> AppResult<Vec<UserResponse>> {
        let models = users::Entity::find()
            .order_by_asc(users::Column::CreatedAt)
            .all(&self.pool)
            .await?;
        Ok(models.into_iter().map(UserResponse::from).collect())
    }
}
