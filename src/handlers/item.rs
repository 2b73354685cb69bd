use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use uuid::Uuid;

use crate::middlewares::require_user;
use crate::models::*;
use crate::services::ItemService;

#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    request_body = CreateItemRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Item created", body = ItemResponse),
        (status = 400, description = "Title is required"),
        (status = 404, description = "Distribution not found")
    )
)]
pub async fn create_item(
    item_service: web::Data<ItemService>,
    req: HttpRequest,
    request: web::Json<CreateItemRequest>,
) -> Result<HttpResponse> {
    let user = require_user(&req)?;

    match item_service.create_item(user.id, request.into_inner()).await {
        Ok(item) => Ok(HttpResponse::Created().json(item)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    params(
        ("distribution_id" = Uuid, Query, description = "Distribution to list items for")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Items with their allocations", body = [ItemWithAllocations])
    )
)]
pub async fn list_items(
    item_service: web::Data<ItemService>,
    req: HttpRequest,
    query: web::Query<ItemListQuery>,
) -> Result<HttpResponse> {
    let _user = require_user(&req)?;

    match item_service.list_items(query.distribution_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(items)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/items/{id}",
    tag = "items",
    request_body = UpdateItemRequest,
    params(
        ("id" = Uuid, Path, description = "Item id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Updated item", body = ItemResponse),
        (status = 403, description = "Caller is neither the creator nor an admin"),
        (status = 404, description = "Item not found")
    )
)]
pub async fn update_item(
    item_service: web::Data<ItemService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    request: web::Json<UpdateItemRequest>,
) -> Result<HttpResponse> {
    let user = require_user(&req)?;

    match item_service
        .update_item(&user, path.into_inner(), request.into_inner())
        .await
    {
        Ok(item) => Ok(HttpResponse::Ok().json(item)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/items/{id}",
    tag = "items",
    params(
        ("id" = Uuid, Path, description = "Item id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 403, description = "Caller is neither the creator nor an admin"),
        (status = 404, description = "Item not found")
    )
)]
pub async fn delete_item(
    item_service: web::Data<ItemService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let user = require_user(&req)?;

    match item_service.delete_item(&user, path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::NoContent().finish()),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn item_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/items")
            .route(web::post().to(create_item))
            .route(web::get().to(list_items))
            .default_service(web::route().to(super::method_not_allowed)),
    )
    .service(
        web::resource("/items/{id}")
            .route(web::put().to(update_item))
            .route(web::delete().to(delete_item))
            .default_service(web::route().to(super::method_not_allowed)),
    );
}
