//! Friend Entity Implementation
//!
//! 두 사용자 사이의 친구 관계 문서입니다. 요청을 보낸 쪽이 `requester_id`,
//! 받은 쪽이 `addressee_id`이며 한 쌍의 사용자에게는 문서가 최대 하나만 존재합니다.
//! 방향과 무관한 `pair` 필드에 유니크 인덱스가 걸려 있습니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::core::errors::AppError;

/// 친구 관계 상태
///
/// ```text
/// PENDING ──accept──▶ ACCEPTED
///    │
///    └────reject───▶ REJECTED ──(새 요청)──▶ PENDING
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FriendStatus {
    Pending,
    Accepted,
    Rejected,
}

impl FriendStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FriendStatus::Pending => "PENDING",
            FriendStatus::Accepted => "ACCEPTED",
            FriendStatus::Rejected => "REJECTED",
        }
    }

    /// 요청 응답에 따른 상태 전이
    ///
    /// PENDING에서만 응답할 수 있습니다.
    pub fn respond(self, accept: bool) -> Result<FriendStatus, AppError> {
        match self {
            FriendStatus::Pending if accept => Ok(FriendStatus::Accepted),
            FriendStatus::Pending => Ok(FriendStatus::Rejected),
            other => Err(AppError::ConflictError(format!(
                "이미 처리된 친구 요청입니다 (현재 상태: {})",
                other.as_str()
            ))),
        }
    }
}

/// 정렬된 사용자 쌍. A→B와 B→A가 같은 값이 됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendPair {
    pub low: String,
    pub high: String,
}

impl FriendPair {
    pub fn new(user_a: &str, user_b: &str) -> Self {
        let (low, high) = if user_a <= user_b { (user_a, user_b) } else { (user_b, user_a) };

        Self {
            low: low.to_string(),
            high: high.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Friend {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub requester_id: String,
    pub addressee_id: String,
    pub pair: FriendPair,
    pub status: FriendStatus,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responded_at: Option<DateTime>,
}

impl Friend {
    pub fn new_request(requester_id: String, addressee_id: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            pair: FriendPair::new(&requester_id, &addressee_id),
            requester_id,
            addressee_id,
            status: FriendStatus::Pending,
            created_at: now,
            updated_at: now,
            responded_at: None,
        }
    }

    pub fn involves(&self, user_id: &str) -> bool {
        self.requester_id == user_id || self.addressee_id == user_id
    }

    /// 관계에서 `user_id`가 아닌 쪽의 uid
    pub fn other_party(&self, user_id: &str) -> Option<&str> {
        if self.requester_id == user_id {
            Some(&self.addressee_id)
        } else if self.addressee_id == user_id {
            Some(&self.requester_id)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_transitions() {
        assert_eq!(FriendStatus::Pending.respond(true).unwrap(), FriendStatus::Accepted);
        assert_eq!(FriendStatus::Pending.respond(false).unwrap(), FriendStatus::Rejected);
    }

    #[test]
    fn test_cannot_respond_twice() {
        assert!(matches!(
            FriendStatus::Accepted.respond(false),
            Err(AppError::ConflictError(_))
        ));
        assert!(matches!(
            FriendStatus::Rejected.respond(true),
            Err(AppError::ConflictError(_))
        ));
    }

    #[test]
    fn test_other_party() {
        let relation = Friend::new_request("alice".to_string(), "bob".to_string());

        assert_eq!(relation.status, FriendStatus::Pending);
        assert_eq!(relation.other_party("alice"), Some("bob"));
        assert_eq!(relation.other_party("bob"), Some("alice"));
        assert_eq!(relation.other_party("carol"), None);
        assert!(relation.involves("bob"));
        assert!(!relation.involves("carol"));
    }

    #[test]
    fn test_pair_ignores_direction() {
        let forward = Friend::new_request("bob".to_string(), "alice".to_string());
        let backward = Friend::new_request("alice".to_string(), "bob".to_string());

        assert_eq!(forward.pair, backward.pair);
        assert_eq!(forward.pair.low, "alice");
        assert_eq!(forward.pair.high, "bob");
        assert_ne!(FriendPair::new("alice", "bob"), FriendPair::new("alice", "carol"));
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&FriendStatus::Accepted).unwrap();
        assert_eq!(json, "\"ACCEPTED\"");

        let parsed: FriendStatus = serde_json::from_str("\"PENDING\"").unwrap();
        assert_eq!(parsed, FriendStatus::Pending);
    }
}
