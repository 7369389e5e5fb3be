//! 소유 기록 엔티티
//!
//! 한 사용자가 특정 아이템을 몇 개 가지고 있는지를 나타냅니다.
//! `(user_id, item_id)` 쌍은 유니크 인덱스로 보장됩니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserItem {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 소유자 uid
    pub user_id: String,
    /// `items` 컬렉션 참조
    pub item_id: ObjectId,
    pub quantity: i64,
    pub first_obtained_at: DateTime,
    pub updated_at: DateTime,
}

impl UserItem {
    pub fn new(user_id: String, item_id: ObjectId, quantity: i64) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            user_id,
            item_id,
            quantity,
            first_obtained_at: now,
            updated_at: now,
        }
    }
}
