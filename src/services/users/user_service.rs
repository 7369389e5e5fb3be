//! 사용자 서비스 구현
//!
//! 외부 인증 서비스에서 발급한 uid를 게임 사용자로 등록하고 조회/삭제합니다.
//! 새 사용자는 `total_power = 0`과 시작 코인(`GACHA_STARTING_COINS`)을 받습니다.
//!
//! 사용자를 삭제하면 소유 기록, 친구 관계, 프로필과 아바타 이미지도 함께 정리됩니다.

use std::sync::Arc;
use singleton_macro::service;
use crate::{
    config::GachaConfig,
    core::errors::AppError,
    domain::{
        auth::authenticated_user::AuthenticatedUser,
        dto::users::{CreateUserRequest, UserResponse},
        entities::users::user::User,
    },
    repositories::{
        friends::friend_repo::FriendRepository,
        inventory::user_item_repo::UserItemRepository,
        profiles::profile_repo::ProfileRepository,
        users::user_repo::UserRepository,
    },
    services::images::ImageService,
};

#[service(name = "user")]
pub struct UserService {
    user_repo: Arc<UserRepository>,
    user_item_repo: Arc<UserItemRepository>,
    friend_repo: Arc<FriendRepository>,
    profile_repo: Arc<ProfileRepository>,
    image_service: Arc<ImageService>,
}

impl UserService {
    pub async fn create_user(
        &self,
        auth_user: &AuthenticatedUser,
        request: CreateUserRequest,
    ) -> Result<UserResponse, AppError> {
        let display_name = request.display_name.trim().to_string();
        if display_name.is_empty() {
            return Err(AppError::ValidationError("표시 이름은 비어 있을 수 없습니다".to_string()));
        }

        let email = request.email.or_else(|| auth_user.email.clone());

        let user = User::new(
            auth_user.user_id.clone(),
            display_name,
            email,
            GachaConfig::starting_coins(),
        );

        let created = self.user_repo.create(user).await?;
        self.user_repo.invalidate_ranking_cache().await;

        log::info!("👤 사용자 등록: {} ({})", created.id, created.display_name);

        Ok(UserResponse::from(created))
    }

    pub async fn get_user(&self, user_id: &str) -> Result<UserResponse, AppError> {
        self.find_user(user_id).await.map(UserResponse::from)
    }

    pub async fn get_me(&self, auth_user: &AuthenticatedUser) -> Result<UserResponse, AppError> {
        self.get_user(&auth_user.user_id).await
    }

    /// 엔티티가 필요한 다른 서비스용
    pub async fn find_user(&self, user_id: &str) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", user_id)))
    }

    /// 소유 기록, 친구 관계, 프로필을 먼저 지우고 사용자 문서를 마지막에 지웁니다.
    pub async fn delete_user(&self, user_id: &str) -> Result<(), AppError> {
        self.find_user(user_id).await?;

        let removed_items = self.user_item_repo.delete_by_user(user_id).await?;
        let removed_friends = self.friend_repo.delete_by_user(user_id).await?;

        if let Some(profile) = self.profile_repo.find_by_user(user_id).await? {
            if let Some(avatar_id) = profile.avatar_image_id {
                self.image_service.delete_image(&avatar_id).await;
            }
            self.profile_repo.delete(user_id).await?;
        }

        if !self.user_repo.delete(user_id).await? {
            return Err(AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", user_id)));
        }

        self.user_repo.invalidate_ranking_cache().await;

        log::info!(
            "🗑️ 사용자 삭제: {} (소유 기록 {}건, 친구 관계 {}건)",
            user_id, removed_items, removed_friends
        );

        Ok(())
    }
}
