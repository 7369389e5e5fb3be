//! # Item Catalog HTTP Handlers
//!
//! 조회는 공개, 생성/수정/삭제와 이미지 업로드는 관리자 전용입니다.

use actix_web::{web, HttpRequest, HttpResponse, get, post, put, delete};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::items::{CreateItemRequest, ItemListQuery, UpdateItemRequest};
use crate::handlers::images::request_content_type;
use crate::middlewares::AuthMiddleware;
use crate::services::items::ItemService;

/// `GET /api/v1/items?rarity=EPIC`
#[get("")]
pub async fn list_items(
    query: web::Query<ItemListQuery>,
) -> Result<HttpResponse, AppError> {
    let service = ItemService::instance();
    let items = service.list_items(query.rarity.as_deref()).await?;

    Ok(HttpResponse::Ok().json(items))
}

#[get("/{item_id}")]
pub async fn get_item(
    item_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = ItemService::instance();
    let item = service.get_item(&item_id).await?;

    Ok(HttpResponse::Ok().json(item))
}

#[post("", wrap = "AuthMiddleware::admin()")]
pub async fn create_item(
    payload: web::Json<CreateItemRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = ItemService::instance();
    let item = service.create_item(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(item))
}

#[put("/{item_id}", wrap = "AuthMiddleware::admin()")]
pub async fn update_item(
    item_id: web::Path<String>,
    payload: web::Json<UpdateItemRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = ItemService::instance();
    let item = service.update_item(&item_id, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(item))
}

#[delete("/{item_id}", wrap = "AuthMiddleware::admin()")]
pub async fn delete_item(
    item_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = ItemService::instance();
    service.delete_item(&item_id).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// 본문은 이미지 바이너리, `Content-Type`은 이미지 형식
#[post("/{item_id}/image", wrap = "AuthMiddleware::admin()")]
pub async fn upload_item_image(
    req: HttpRequest,
    item_id: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let content_type = request_content_type(&req)?;

    let service = ItemService::instance();
    let response = service.upload_item_image(&item_id, &content_type, &body).await?;

    Ok(HttpResponse::Created().json(response))
}
