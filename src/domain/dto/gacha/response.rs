use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::domain::dto::items::response::ItemResponse;
use crate::domain::entities::gacha::loot_box::LootBox;
use crate::domain::entities::items::item::Rarity;
use crate::utils::string_utils::to_utc;

/// 공개용 드롭 확률
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropRateView {
    pub rarity: Rarity,
    pub weight: u32,
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LootBoxResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub drop_rates: Vec<DropRateView>,
    pub item_ids: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<LootBox> for LootBoxResponse {
    fn from(loot_box: LootBox) -> Self {
        let drop_rates = loot_box
            .drop_rates
            .iter()
            .zip(loot_box.rate_percentages())
            .map(|(rate, (_, percent))| DropRateView {
                rarity: rate.rarity,
                weight: rate.weight,
                percent,
            })
            .collect();

        Self {
            id: loot_box.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: loot_box.name,
            description: loot_box.description,
            price: loot_box.price,
            drop_rates,
            item_ids: loot_box.item_ids.iter().map(|id| id.to_hex()).collect(),
            is_active: loot_box.is_active,
            created_at: to_utc(loot_box.created_at),
        }
    }
}

/// 박스 개봉 결과
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenBoxResponse {
    pub box_id: String,
    /// 뽑은 순서대로
    pub pulls: Vec<ItemResponse>,
    pub coins_spent: i64,
    pub remaining_coins: i64,
    pub total_power: i64,
}
