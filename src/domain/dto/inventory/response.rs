use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::domain::dto::items::response::ItemResponse;

/// 소유 기록 하나와 아이템 정의
///
/// 아이템 정의가 삭제된 기록은 `item`이 None이고 전투력 기여도는 0입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub item_id: String,
    pub quantity: i64,
    pub item: Option<ItemResponse>,
    /// `item.power * quantity`
    pub power_contribution: i64,
    pub first_obtained_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryResponse {
    pub user_id: String,
    pub total_power: i64,
    pub entries: Vec<InventoryEntry>,
}
