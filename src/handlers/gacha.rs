//! # Gacha HTTP Handlers

use actix_web::{web, HttpResponse, get, post};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::auth::authenticated_user::AuthenticatedUser;
use crate::domain::dto::gacha::{CreateLootBoxRequest, OpenBoxRequest};
use crate::middlewares::AuthMiddleware;
use crate::services::gacha::GachaService;

#[get("/boxes")]
pub async fn list_loot_boxes() -> Result<HttpResponse, AppError> {
    let service = GachaService::instance();
    let boxes = service.list_loot_boxes().await?;

    Ok(HttpResponse::Ok().json(boxes))
}

#[post("/boxes", wrap = "AuthMiddleware::admin()")]
pub async fn create_loot_box(
    payload: web::Json<CreateLootBoxRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = GachaService::instance();
    let loot_box = service.create_loot_box(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(loot_box))
}

/// 본문 생략 시 1회 개봉
#[post("/boxes/{box_id}/open", wrap = "AuthMiddleware::required()")]
pub async fn open_loot_box(
    auth_user: AuthenticatedUser,
    box_id: web::Path<String>,
    payload: Option<web::Json<OpenBoxRequest>>,
) -> Result<HttpResponse, AppError> {
    let request = payload.map(|p| p.into_inner()).unwrap_or_default();
    request.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = GachaService::instance();
    let result = service.open_box(&auth_user.user_id, &box_id, request.count()).await?;

    Ok(HttpResponse::Ok().json(result))
}
