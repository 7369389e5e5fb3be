//! # User HTTP Handlers
//!
//! | 메서드 | 경로 | 설명 | 권한 |
//! |--------|------|------|------|
//! | `POST` | `/api/v1/users` | 토큰의 uid로 게임 사용자 등록 | 로그인 |
//! | `GET` | `/api/v1/users/me` | 내 정보 | 로그인 |
//! | `GET` | `/api/v1/users/{id}` | 사용자 조회 | 로그인 |
//! | `DELETE` | `/api/v1/users/{id}` | 사용자와 관련 데이터 삭제 | 관리자 |

use actix_web::{web, HttpResponse, get, post, delete};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::auth::authenticated_user::AuthenticatedUser;
use crate::domain::dto::users::CreateUserRequest;
use crate::middlewares::AuthMiddleware;
use crate::services::users::UserService;

#[post("")]
pub async fn create_user(
    auth_user: AuthenticatedUser,
    payload: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = UserService::instance();
    let response = service.create_user(&auth_user, payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}

#[get("/me")]
pub async fn get_me(auth_user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let service = UserService::instance();
    let user = service.get_me(&auth_user).await?;

    Ok(HttpResponse::Ok().json(user))
}

#[get("/{user_id}")]
pub async fn get_user(
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = UserService::instance();
    let user = service.get_user(&user_id).await?;

    Ok(HttpResponse::Ok().json(user))
}

#[delete("/{user_id}", wrap = "AuthMiddleware::admin()")]
pub async fn delete_user(
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = UserService::instance();
    service.delete_user(&user_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
