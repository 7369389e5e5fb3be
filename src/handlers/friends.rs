//! # Friend HTTP Handlers
//!
//! 모든 엔드포인트는 로그인이 필요합니다.

use actix_web::{web, HttpResponse, get, post, delete};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::auth::authenticated_user::AuthenticatedUser;
use crate::domain::dto::friends::{RespondFriendRequest, SendFriendRequest};
use crate::services::friends::FriendService;

#[get("")]
pub async fn list_friends(auth_user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let service = FriendService::instance();
    let friends = service.list_friends(&auth_user.user_id).await?;

    Ok(HttpResponse::Ok().json(friends))
}

/// 받은 요청 중 대기 중인 것
#[get("/pending")]
pub async fn list_pending(auth_user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let service = FriendService::instance();
    let pending = service.list_pending(&auth_user.user_id).await?;

    Ok(HttpResponse::Ok().json(pending))
}

#[post("")]
pub async fn send_request(
    auth_user: AuthenticatedUser,
    payload: web::Json<SendFriendRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = FriendService::instance();
    let relation = service.send_request(&auth_user.user_id, &payload.addressee_id).await?;

    Ok(HttpResponse::Created().json(relation))
}

#[post("/{relation_id}/respond")]
pub async fn respond(
    auth_user: AuthenticatedUser,
    relation_id: web::Path<String>,
    payload: web::Json<RespondFriendRequest>,
) -> Result<HttpResponse, AppError> {
    let service = FriendService::instance();
    let relation = service.respond(&relation_id, &auth_user.user_id, payload.accept).await?;

    Ok(HttpResponse::Ok().json(relation))
}

#[delete("/{relation_id}")]
pub async fn remove_friend(
    auth_user: AuthenticatedUser,
    relation_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = FriendService::instance();
    service.remove_friend(&relation_id, &auth_user.user_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
