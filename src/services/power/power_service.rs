use std::collections::HashMap;
use std::sync::Arc;
use mongodb::bson::oid::ObjectId;
use singleton_macro::service;
use crate::{
    core::errors::AppError,
    domain::entities::items::{item::Item, user_item::UserItem},
    repositories::{
        inventory::user_item_repo::UserItemRepository,
        items::item_repo::ItemRepository,
        users::user_repo::UserRepository,
    },
};

/// 소유 기록과 아이템 정의로 총 전투력을 계산합니다.
///
/// - 기록이 없으면 0
/// - 정의를 찾을 수 없는 아이템은 0으로 취급
/// - 곱셈과 합산은 포화 연산 (i64 범위를 넘지 않음)
pub fn compute_total_power(records: &[UserItem], items: &[Item]) -> i64 {
    let power_by_id: HashMap<ObjectId, i64> = items
        .iter()
        .filter_map(|item| item.id.map(|id| (id, item.power)))
        .collect();

    records.iter().fold(0_i64, |total, record| {
        let power = power_by_id.get(&record.item_id).copied().unwrap_or(0);
        total.saturating_add(power_contribution(power, record.quantity))
    })
}

/// `$in` 조회에 넘길 아이템 id 목록 (정렬, 중복 제거)
pub fn distinct_item_ids(records: &[UserItem]) -> Vec<ObjectId> {
    let mut item_ids: Vec<ObjectId> = records.iter().map(|record| record.item_id).collect();
    item_ids.sort();
    item_ids.dedup();
    item_ids
}

/// 기록 하나의 기여도 `power * quantity`
pub fn power_contribution(power: i64, quantity: i64) -> i64 {
    power.saturating_mul(quantity)
}

#[service(name = "power")]
pub struct PowerService {
    user_repo: Arc<UserRepository>,
    item_repo: Arc<ItemRepository>,
    user_item_repo: Arc<UserItemRepository>,
}

impl PowerService {
    /// 사용자의 총 전투력을 다시 계산해 `users.total_power`에 병합 기록합니다.
    ///
    /// 1. 사용자의 소유 기록 전체 조회
    /// 2. 참조된 아이템 정의를 한 번에 조회 (`$in`)
    /// 3. `power * quantity` 합산
    /// 4. 등록된 사용자 문서에 `$set` (문서를 새로 만들지 않음)
    ///
    /// 저장소 에러는 그대로 호출자에게 전달됩니다.
    pub async fn recalculate_total_power(&self, user_id: &str) -> Result<i64, AppError> {
        let records = self.user_item_repo.find_by_user(user_id).await?;

        let item_ids = distinct_item_ids(&records);

        let items = self.item_repo.find_by_ids(&item_ids).await?;
        if items.len() < item_ids.len() {
            log::warn!(
                "⚠️ 사용자 {}의 소유 기록 중 {}개 아이템 정의를 찾을 수 없습니다",
                user_id,
                item_ids.len() - items.len()
            );
        }

        let total_power = compute_total_power(&records, &items);

        if self.user_repo.set_total_power(user_id, total_power).await? {
            self.user_repo.invalidate_ranking_cache().await;
            log::debug!("사용자 {} 총 전투력 재계산: {}", user_id, total_power);
        } else {
            log::warn!("등록되지 않은 사용자 {}의 총 전투력은 기록하지 않습니다", user_id);
        }

        Ok(total_power)
    }

    /// 여러 사용자를 차례로 재계산합니다. 재계산한 사용자 수를 반환합니다.
    pub async fn recalculate_many(&self, user_ids: &[String]) -> Result<usize, AppError> {
        for user_id in user_ids {
            self.recalculate_total_power(user_id).await?;
        }

        if !user_ids.is_empty() {
            log::info!("🔄 {}명의 총 전투력을 재계산했습니다", user_ids.len());
        }

        Ok(user_ids.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::items::item::Rarity;

    fn item(power: i64) -> Item {
        let mut item = Item::new(format!("item-{}", power), String::new(), power, Rarity::Common);
        item.id = Some(ObjectId::new());
        item
    }

    fn record(item: &Item, quantity: i64) -> UserItem {
        UserItem::new("uid-1".to_string(), item.id.unwrap(), quantity)
    }

    #[test]
    fn test_no_records_is_zero() {
        let items = vec![item(100)];
        assert_eq!(compute_total_power(&[], &items), 0);
        assert_eq!(compute_total_power(&[], &[]), 0);
    }

    #[test]
    fn test_sum_of_power_times_quantity() {
        let sword = item(120);
        let shield = item(45);
        let ring = item(7);

        let records = vec![record(&sword, 1), record(&shield, 3), record(&ring, 10)];
        let items = vec![sword, shield, ring];

        assert_eq!(compute_total_power(&records, &items), 120 + 45 * 3 + 7 * 10);
    }

    #[test]
    fn test_unresolved_item_contributes_zero() {
        let sword = item(120);
        let deleted = item(999);

        let records = vec![record(&sword, 2), record(&deleted, 5)];
        let items = vec![sword];

        assert_eq!(compute_total_power(&records, &items), 240);
    }

    #[test]
    fn test_item_without_id_is_ignored() {
        let mut unsaved = item(50);
        let saved_record = record(&unsaved, 1);
        unsaved.id = None;

        assert_eq!(compute_total_power(&[saved_record], &[unsaved]), 0);
    }

    #[test]
    fn test_total_saturates_instead_of_overflowing() {
        let huge = item(i64::MAX / 2);
        let records = vec![record(&huge, 3), record(&huge, 1)];

        assert_eq!(compute_total_power(&records, &[huge]), i64::MAX);
        assert_eq!(power_contribution(i64::MAX, 2), i64::MAX);
    }

    #[test]
    fn test_distinct_item_ids_removes_duplicates() {
        let sword = item(120);
        let shield = item(45);

        let records = vec![record(&shield, 1), record(&sword, 2), record(&shield, 3)];
        let ids = distinct_item_ids(&records);

        let mut expected = vec![sword.id.unwrap(), shield.id.unwrap()];
        expected.sort();
        assert_eq!(ids, expected);
        assert!(distinct_item_ids(&[]).is_empty());
    }

    #[test]
    fn test_matches_naive_sum_for_many_records() {
        let items: Vec<Item> = (1..=20).map(|p| item(p * 10)).collect();
        let records: Vec<UserItem> = items
            .iter()
            .enumerate()
            .map(|(i, it)| record(it, i as i64 + 1))
            .collect();

        let expected: i64 = items
            .iter()
            .zip(&records)
            .map(|(it, rec)| it.power * rec.quantity)
            .sum();

        assert_eq!(compute_total_power(&records, &items), expected);
    }
}
