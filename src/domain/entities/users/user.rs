//! User Entity Implementation
//!
//! 가챠 서비스의 사용자 문서입니다. `_id`는 외부 인증 서비스가 발급한 uid를
//! 그대로 사용하므로 ObjectId가 아닌 문자열입니다.

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

/// 사용자 엔티티
///
/// `total_power`는 소유 아이템의 `power * quantity` 합계를 비정규화한 값입니다.
/// 직접 수정하지 않고 항상 `PowerService::recalculate_total_power`로 다시 계산합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// 인증 uid (토큰의 `sub`)
    #[serde(rename = "_id")]
    pub id: String,
    /// 표시 이름
    pub display_name: String,
    /// 연락용 이메일 (선택)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// 비정규화된 전투력 합계
    #[serde(default)]
    pub total_power: i64,
    /// 가챠 재화
    #[serde(default)]
    pub coins: i64,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl User {
    /// 새 사용자 생성
    ///
    /// 전투력은 0, 코인은 가입 보상으로 시작합니다.
    pub fn new(uid: String, display_name: String, email: Option<String>, starting_coins: i64) -> Self {
        let now = DateTime::now();

        Self {
            id: uid,
            display_name,
            email,
            total_power: 0,
            coins: starting_coins,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn can_afford(&self, cost: i64) -> bool {
        self.coins >= cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_starts_with_zero_power() {
        let user = User::new("uid-1".to_string(), "Alice".to_string(), None, 1000);

        assert_eq!(user.id, "uid-1");
        assert_eq!(user.total_power, 0);
        assert_eq!(user.coins, 1000);
        assert!(user.can_afford(1000));
        assert!(!user.can_afford(1001));
    }

    #[test]
    fn test_missing_power_field_defaults_to_zero() {
        let doc = mongodb::bson::doc! {
            "_id": "uid-2",
            "display_name": "Bob",
            "created_at": DateTime::now(),
            "updated_at": DateTime::now(),
        };

        let user: User = mongodb::bson::from_document(doc).unwrap();
        assert_eq!(user.total_power, 0);
        assert_eq!(user.coins, 0);
        assert!(user.email.is_none());
    }
}
