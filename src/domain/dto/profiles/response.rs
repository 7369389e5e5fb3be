use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::domain::entities::profiles::profile::UserProfile;
use crate::utils::string_utils::to_utc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user_id: String,
    pub display_name: String,
    pub bio: String,
    pub title: Option<String>,
    pub accent_color: Option<String>,
    pub avatar_url: Option<String>,
    pub showcase_item_ids: Vec<String>,
    pub total_power: i64,
    pub updated_at: DateTime<Utc>,
}

impl ProfileResponse {
    pub fn from_profile(profile: UserProfile, total_power: i64) -> Self {
        Self {
            user_id: profile.user_id,
            display_name: profile.display_name,
            bio: profile.bio,
            title: profile.title,
            accent_color: profile.accent_color,
            avatar_url: profile.avatar_url,
            showcase_item_ids: profile.showcase_item_ids.iter().map(|id| id.to_hex()).collect(),
            total_power,
            updated_at: to_utc(profile.updated_at),
        }
    }
}
