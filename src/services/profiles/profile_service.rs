//! 프로필 꾸미기 서비스
//!
//! 프로필 문서가 없으면 사용자 정보로 만든 기본 프로필을 보여주고,
//! 처음 수정할 때 upsert로 문서를 만듭니다.

use std::sync::Arc;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use singleton_macro::service;
use crate::{
    core::errors::AppError,
    domain::{
        dto::profiles::{ProfileResponse, UpdateProfileRequest},
        entities::{profiles::profile::UserProfile, users::user::User},
    },
    repositories::{
        inventory::user_item_repo::UserItemRepository,
        profiles::profile_repo::ProfileRepository,
        users::user_repo::UserRepository,
    },
    services::images::ImageService,
    utils::string_utils::{clean_optional_string, parse_object_ids},
};

/// 수정 요청을 `$set` 문서로 바꿉니다. 전시 아이템 id는 미리 파싱해서 넘깁니다.
pub fn build_profile_update(
    request: &UpdateProfileRequest,
    showcase: Option<&[ObjectId]>,
) -> Result<Document, AppError> {
    let mut update = Document::new();

    if let Some(display_name) = clean_optional_string(request.display_name.clone()) {
        update.insert("display_name", display_name);
    }
    if let Some(ref bio) = request.bio {
        update.insert("bio", bio.trim());
    }
    if let Some(ref title) = request.title {
        update.insert("title", title.as_str());
    }
    if let Some(ref accent_color) = request.accent_color {
        update.insert("accent_color", accent_color.to_ascii_lowercase());
    }
    if let Some(showcase) = showcase {
        if showcase.len() > UserProfile::MAX_SHOWCASE_ITEMS {
            return Err(AppError::ValidationError(format!(
                "전시 아이템은 최대 {}개입니다",
                UserProfile::MAX_SHOWCASE_ITEMS
            )));
        }
        let ids: Vec<Bson> = showcase.iter().map(|id| Bson::ObjectId(*id)).collect();
        update.insert("showcase_item_ids", ids);
    }

    if update.is_empty() {
        return Err(AppError::ValidationError("변경할 필드가 없습니다".to_string()));
    }

    Ok(update)
}

/// 순서를 유지하며 중복을 제거합니다.
fn dedupe_preserving_order(ids: Vec<ObjectId>) -> Vec<ObjectId> {
    let mut seen = Vec::with_capacity(ids.len());
    for id in ids {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}

#[service(name = "profile")]
pub struct ProfileService {
    profile_repo: Arc<ProfileRepository>,
    user_repo: Arc<UserRepository>,
    user_item_repo: Arc<UserItemRepository>,
    image_service: Arc<ImageService>,
}

impl ProfileService {
    pub async fn get_profile(&self, user_id: &str) -> Result<ProfileResponse, AppError> {
        let user = self.find_user(user_id).await?;
        let profile = self.load_profile(&user).await?;

        Ok(ProfileResponse::from_profile(profile, user.total_power))
    }

    pub async fn update_profile(&self, user_id: &str, request: UpdateProfileRequest) -> Result<ProfileResponse, AppError> {
        let user = self.find_user(user_id).await?;

        let showcase = match request.showcase_item_ids {
            Some(ref raw_ids) => {
                let ids = dedupe_preserving_order(parse_object_ids(raw_ids, "showcase_item_id")?);
                if !self.user_item_repo.owns_all(user_id, &ids).await? {
                    return Err(AppError::ValidationError("보유하지 않은 아이템은 전시할 수 없습니다".to_string()));
                }
                Some(ids)
            }
            None => None,
        };

        let update = build_profile_update(&request, showcase.as_deref())?;

        if let Ok(display_name) = update.get_str("display_name") {
            if display_name != user.display_name {
                self.user_repo.set_display_name(user_id, display_name).await?;
                self.user_repo.invalidate_ranking_cache().await;
            }
        }

        self.profile_repo
            .upsert_fields(&UserProfile::default_for(&user), update)
            .await?;

        self.get_profile(user_id).await
    }

    /// 아바타를 교체합니다. 이전 아바타 삭제 실패는 로그만 남깁니다.
    pub async fn upload_avatar(&self, user_id: &str, content_type: &str, bytes: &[u8]) -> Result<ProfileResponse, AppError> {
        let user = self.find_user(user_id).await?;
        let current = self.load_profile(&user).await?;

        let stored = self.image_service
            .upload_image("avatars", user_id, content_type, bytes)
            .await?;

        let mut update = Document::new();
        update.insert("avatar_image_id", stored.id);
        update.insert("avatar_url", stored.public_url());

        if let Err(e) = self.profile_repo.upsert_fields(&UserProfile::default_for(&user), update).await {
            self.image_service.delete_image(&stored.id).await;
            return Err(e);
        }

        if let Some(old_avatar) = current.avatar_image_id {
            self.image_service.delete_image(&old_avatar).await;
        }

        log::info!("🖼️ {} 아바타 변경", user_id);

        self.get_profile(user_id).await
    }

    async fn find_user(&self, user_id: &str) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", user_id)))
    }

    async fn load_profile(&self, user: &User) -> Result<UserProfile, AppError> {
        Ok(self.profile_repo
            .find_by_user(&user.id)
            .await?
            .unwrap_or_else(|| UserProfile::default_for(user)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_profile_update_partial() {
        let request = UpdateProfileRequest {
            bio: Some("  gacha enjoyer ".to_string()),
            accent_color: Some("#FFAA00".to_string()),
            ..Default::default()
        };

        let update = build_profile_update(&request, None).unwrap();

        assert_eq!(update.get_str("bio").unwrap(), "gacha enjoyer");
        assert_eq!(update.get_str("accent_color").unwrap(), "#ffaa00");
        assert!(!update.contains_key("display_name"));
        assert!(!update.contains_key("showcase_item_ids"));
    }

    #[test]
    fn test_build_profile_update_showcase() {
        let ids = vec![ObjectId::new(), ObjectId::new()];
        let request = UpdateProfileRequest::default();

        let update = build_profile_update(&request, Some(ids.as_slice())).unwrap();
        assert_eq!(update.get_array("showcase_item_ids").unwrap().len(), 2);

        let cleared = build_profile_update(&request, Some(Vec::new().as_slice())).unwrap();
        assert!(cleared.get_array("showcase_item_ids").unwrap().is_empty());
    }

    #[test]
    fn test_build_profile_update_rejects_empty_and_oversized() {
        assert!(build_profile_update(&UpdateProfileRequest::default(), None).is_err());

        let too_many: Vec<ObjectId> = (0..7).map(|_| ObjectId::new()).collect();
        assert!(build_profile_update(&UpdateProfileRequest::default(), Some(too_many.as_slice())).is_err());
    }

    #[test]
    fn test_dedupe_preserving_order() {
        let a = ObjectId::new();
        let b = ObjectId::new();
        assert_eq!(dedupe_preserving_order(vec![b, a, b, a]), vec![b, a]);
    }
}
