use serde::{Deserialize, Serialize};
use validator::Validate;

/// 관리자 아이템 지급/회수 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AdjustItemRequest {
    /// 대상 사용자 uid
    #[validate(length(min = 1, message = "user_id는 필수입니다"))]
    pub user_id: String,

    /// 아이템 ObjectId (hex)
    #[validate(length(equal = 24, message = "item_id는 24자리 ObjectId여야 합니다"))]
    pub item_id: String,

    #[serde(default = "default_quantity")]
    #[validate(range(min = 1, max = 9999, message = "수량은 1-9999 사이여야 합니다"))]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}
