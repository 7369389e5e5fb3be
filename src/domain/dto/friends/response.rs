use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::domain::entities::friends::friend::{Friend, FriendStatus};
use crate::utils::string_utils::to_utc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendResponse {
    pub id: String,
    pub requester_id: String,
    pub addressee_id: String,
    pub status: FriendStatus,
    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

impl From<Friend> for FriendResponse {
    fn from(friend: Friend) -> Self {
        Self {
            id: friend.id.map(|id| id.to_hex()).unwrap_or_default(),
            requester_id: friend.requester_id,
            addressee_id: friend.addressee_id,
            status: friend.status,
            created_at: to_utc(friend.created_at),
            responded_at: friend.responded_at.map(to_utc),
        }
    }
}

/// 친구 목록의 한 줄
///
/// 상대가 탈퇴했으면 `display_name`이 None입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendSummary {
    pub relation_id: String,
    pub user_id: String,
    pub display_name: Option<String>,
    pub total_power: i64,
    pub since: DateTime<Utc>,
}
