//! # Profile HTTP Handlers

use actix_web::{web, HttpRequest, HttpResponse, get, post, put};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::auth::authenticated_user::AuthenticatedUser;
use crate::domain::dto::profiles::UpdateProfileRequest;
use crate::handlers::images::request_content_type;
use crate::middlewares::AuthMiddleware;
use crate::services::profiles::ProfileService;

#[put("/me", wrap = "AuthMiddleware::required()")]
pub async fn update_my_profile(
    auth_user: AuthenticatedUser,
    payload: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = ProfileService::instance();
    let profile = service.update_profile(&auth_user.user_id, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(profile))
}

/// 본문은 이미지 바이너리
#[post("/me/avatar", wrap = "AuthMiddleware::required()")]
pub async fn upload_avatar(
    req: HttpRequest,
    auth_user: AuthenticatedUser,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let content_type = request_content_type(&req)?;

    let service = ProfileService::instance();
    let profile = service.upload_avatar(&auth_user.user_id, &content_type, &body).await?;

    Ok(HttpResponse::Ok().json(profile))
}

#[get("/{user_id}")]
pub async fn get_profile(
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = ProfileService::instance();
    let profile = service.get_profile(&user_id).await?;

    Ok(HttpResponse::Ok().json(profile))
}
