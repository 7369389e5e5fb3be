//! # Inventory HTTP Handlers

use actix_web::{web, HttpResponse, get, post};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::auth::authenticated_user::AuthenticatedUser;
use crate::domain::dto::inventory::AdjustItemRequest;
use crate::middlewares::AuthMiddleware;
use crate::services::inventory::InventoryService;

#[get("")]
pub async fn get_my_inventory(auth_user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let service = InventoryService::instance();
    let inventory = service.list_inventory(&auth_user.user_id).await?;

    Ok(HttpResponse::Ok().json(inventory))
}

/// 내 총 전투력을 다시 계산합니다.
#[post("/recalculate")]
pub async fn recalculate_my_power(auth_user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let service = InventoryService::instance();
    let result = service.recalculate(&auth_user.user_id).await?;

    Ok(HttpResponse::Ok().json(result))
}

/// 다른 사용자의 인벤토리 (본인 또는 관리자)
#[get("/users/{user_id}")]
pub async fn get_user_inventory(
    auth_user: AuthenticatedUser,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    auth_user.ensure_self_or_admin(&user_id)?;

    let service = InventoryService::instance();
    let inventory = service.list_inventory(&user_id).await?;

    Ok(HttpResponse::Ok().json(inventory))
}

#[post("/grant", wrap = "AuthMiddleware::admin()")]
pub async fn grant_item(
    payload: web::Json<AdjustItemRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = InventoryService::instance();
    let result = service.grant_item(&payload.user_id, &payload.item_id, payload.quantity).await?;

    Ok(HttpResponse::Ok().json(result))
}

#[post("/remove", wrap = "AuthMiddleware::admin()")]
pub async fn remove_item(
    payload: web::Json<AdjustItemRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = InventoryService::instance();
    let result = service.remove_item(&payload.user_id, &payload.item_id, payload.quantity).await?;

    Ok(HttpResponse::Ok().json(result))
}
