//! # Ranking HTTP Handlers

use actix_web::{web, HttpResponse, get};
use crate::core::errors::AppError;
use crate::domain::auth::authenticated_user::{AuthenticatedUser, OptionalUser};
use crate::domain::dto::rankings::RankingQuery;
use crate::services::rankings::RankingService;

/// `GET /api/v1/rankings?limit=20`
///
/// 토큰을 보내면 응답의 `me`에 내 순위가 포함됩니다.
#[get("")]
pub async fn global_ranking(
    viewer: OptionalUser,
    query: web::Query<RankingQuery>,
) -> Result<HttpResponse, AppError> {
    let viewer_id = viewer.0.as_ref().map(|user| user.user_id.as_str());

    let service = RankingService::instance();
    let ranking = service.global_ranking(query.limit, viewer_id).await?;

    Ok(HttpResponse::Ok().json(ranking))
}

#[get("/me")]
pub async fn my_rank(auth_user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let service = RankingService::instance();
    let rank = service.user_rank(&auth_user.user_id).await?;

    Ok(HttpResponse::Ok().json(rank))
}

#[get("/friends")]
pub async fn friend_ranking(auth_user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let service = RankingService::instance();
    let ranking = service.friend_ranking(&auth_user.user_id).await?;

    Ok(HttpResponse::Ok().json(ranking))
}
