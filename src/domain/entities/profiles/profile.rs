//! 프로필 꾸미기 문서
//!
//! `_id`는 사용자 uid와 같습니다. 문서가 없으면 사용자 정보로 기본 프로필을 만들어 보여줍니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::domain::entities::users::user::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub user_id: String,
    pub display_name: String,
    #[serde(default)]
    pub bio: String,
    /// 칭호 (예: "전설 수집가")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// `#RRGGBB`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_image_id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// 프로필에 전시할 아이템 (소유한 아이템만 가능)
    #[serde(default)]
    pub showcase_item_ids: Vec<ObjectId>,
    pub updated_at: DateTime,
}

impl UserProfile {
    pub const MAX_SHOWCASE_ITEMS: usize = 6;

    /// 프로필 문서가 없는 사용자의 기본 프로필
    pub fn default_for(user: &User) -> Self {
        Self {
            user_id: user.id.clone(),
            display_name: user.display_name.clone(),
            bio: String::new(),
            title: None,
            accent_color: None,
            avatar_image_id: None,
            avatar_url: None,
            showcase_item_ids: Vec::new(),
            updated_at: user.updated_at,
        }
    }
}
