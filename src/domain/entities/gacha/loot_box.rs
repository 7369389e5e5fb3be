//! Loot Box Entity Implementation
//!
//! 가챠 박스와 희귀도별 드롭 가중치입니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::domain::entities::items::item::Rarity;

/// 희귀도 하나의 드롭 가중치
///
/// 확률은 `weight / Σweight` 입니다. 가중치 0인 희귀도는 나오지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DropRate {
    pub rarity: Rarity,
    pub weight: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LootBox {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// 1회 개봉 비용 (코인)
    pub price: i64,
    pub drop_rates: Vec<DropRate>,
    /// 뽑기 대상 아이템. 비어 있으면 카탈로그 전체가 대상입니다.
    #[serde(default)]
    pub item_ids: Vec<ObjectId>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: DateTime,
}

fn default_active() -> bool {
    true
}

impl LootBox {
    pub fn new(
        name: String,
        description: String,
        price: i64,
        drop_rates: Vec<DropRate>,
        item_ids: Vec<ObjectId>,
    ) -> Self {
        Self {
            id: None,
            name,
            description,
            price,
            drop_rates,
            item_ids,
            is_active: true,
            created_at: DateTime::now(),
        }
    }

    pub fn total_weight(&self) -> u64 {
        self.drop_rates.iter().map(|rate| u64::from(rate.weight)).sum()
    }

    /// `count`회 개봉 비용. 오버플로우 시 None.
    pub fn cost_for(&self, count: u32) -> Option<i64> {
        self.price.checked_mul(i64::from(count))
    }

    /// 희귀도별 확률 (백분율)
    pub fn rate_percentages(&self) -> Vec<(Rarity, f64)> {
        let total = self.total_weight();
        if total == 0 {
            return Vec::new();
        }

        self.drop_rates
            .iter()
            .map(|rate| (rate.rarity, f64::from(rate.weight) * 100.0 / total as f64))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_box() -> LootBox {
        LootBox::new(
            "Starter".to_string(),
            String::new(),
            100,
            vec![
                DropRate { rarity: Rarity::Common, weight: 75 },
                DropRate { rarity: Rarity::Rare, weight: 20 },
                DropRate { rarity: Rarity::Legendary, weight: 5 },
            ],
            Vec::new(),
        )
    }

    #[test]
    fn test_total_weight_and_percentages() {
        let loot_box = sample_box();
        assert_eq!(loot_box.total_weight(), 100);

        let rates = loot_box.rate_percentages();
        assert_eq!(rates.len(), 3);
        assert_eq!(rates[2], (Rarity::Legendary, 5.0));
    }

    #[test]
    fn test_cost_for_count() {
        let loot_box = sample_box();
        assert_eq!(loot_box.cost_for(10), Some(1000));

        let expensive = LootBox { price: i64::MAX, ..sample_box() };
        assert_eq!(expensive.cost_for(2), None);
    }
}
