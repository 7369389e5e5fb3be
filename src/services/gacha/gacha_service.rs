use std::collections::BTreeMap;
use std::sync::Arc;
use mongodb::bson::oid::ObjectId;
use rand::Rng;
use singleton_macro::service;
use crate::{
    config::GachaConfig,
    core::errors::AppError,
    domain::{
        dto::{
            gacha::{CreateLootBoxRequest, LootBoxResponse, OpenBoxResponse},
            items::ItemResponse,
        },
        entities::{
            gacha::loot_box::{DropRate, LootBox},
            items::item::{Item, Rarity},
        },
    },
    repositories::{
        gacha::loot_box_repo::LootBoxRepository,
        inventory::user_item_repo::UserItemRepository,
        items::item_repo::ItemRepository,
        users::user_repo::UserRepository,
    },
    services::power::PowerService,
    utils::string_utils::{parse_object_id, parse_object_ids, validate_required_string},
};

/// 가중치에 따라 희귀도 하나를 뽑습니다.
///
/// 가중치 합이 0이면 None.
pub fn roll_rarity<R: Rng>(rates: &[DropRate], rng: &mut R) -> Option<Rarity> {
    let total: u64 = rates.iter().map(|rate| u64::from(rate.weight)).sum();
    if total == 0 {
        return None;
    }

    let mut roll = rng.random_range(0..total);
    for rate in rates {
        let weight = u64::from(rate.weight);
        if roll < weight {
            return Some(rate.rarity);
        }
        roll -= weight;
    }

    None
}

/// `rarity` 아이템 중 하나를 균등하게 뽑습니다.
///
/// 해당 희귀도 아이템이 없으면 한 단계씩 낮은 희귀도로 내려가고,
/// 그 아래에도 없으면 위쪽에서 가장 낮은 희귀도를 사용합니다. 풀이 비어 있으면 None.
pub fn pick_item<'a, R: Rng>(pool: &'a [Item], rarity: Rarity, rng: &mut R) -> Option<&'a Item> {
    let lower_tiers = std::iter::successors(Some(rarity), |current| current.lower());
    let upper_tiers = Rarity::ALL.into_iter().filter(|candidate| *candidate > rarity);

    for tier in lower_tiers.chain(upper_tiers) {
        let candidates: Vec<&Item> = pool.iter().filter(|item| item.rarity == tier).collect();
        if !candidates.is_empty() {
            return Some(candidates[rng.random_range(0..candidates.len())]);
        }
    }

    None
}

/// `count`번 뽑은 결과 (순서 유지)
pub fn roll_pulls<R: Rng>(
    loot_box: &LootBox,
    pool: &[Item],
    count: u32,
    rng: &mut R,
) -> Result<Vec<Item>, AppError> {
    (0..count)
        .map(|_| {
            let rarity = roll_rarity(&loot_box.drop_rates, &mut *rng).ok_or_else(|| {
                AppError::ConflictError(format!("박스 {}의 드롭 가중치 합이 0입니다", loot_box.name))
            })?;

            pick_item(pool, rarity, &mut *rng)
                .cloned()
                .ok_or_else(|| AppError::ConflictError(format!("박스 {}에 뽑을 아이템이 없습니다", loot_box.name)))
        })
        .collect()
}

#[service(name = "gacha")]
pub struct GachaService {
    loot_box_repo: Arc<LootBoxRepository>,
    item_repo: Arc<ItemRepository>,
    user_repo: Arc<UserRepository>,
    user_item_repo: Arc<UserItemRepository>,
    power_service: Arc<PowerService>,
}

impl GachaService {
    pub async fn create_loot_box(&self, request: CreateLootBoxRequest) -> Result<LootBoxResponse, AppError> {
        let name = validate_required_string(&request.name, "박스 이름")?;
        let item_ids = parse_object_ids(&request.item_ids, "item_id")?;

        if !item_ids.is_empty() {
            let found = self.item_repo.find_by_ids(&item_ids).await?;
            if found.len() != item_ids.len() {
                return Err(AppError::ValidationError("존재하지 않는 아이템이 포함되어 있습니다".to_string()));
            }
        }

        let loot_box = LootBox::new(name, request.description, request.price, request.drop_rates, item_ids);
        let created = self.loot_box_repo.create(loot_box).await?;

        log::info!("📦 가챠 박스 생성: {} (가격 {})", created.name, created.price);

        Ok(LootBoxResponse::from(created))
    }

    pub async fn list_loot_boxes(&self) -> Result<Vec<LootBoxResponse>, AppError> {
        let boxes = self.loot_box_repo.list_active().await?;
        Ok(boxes.into_iter().map(LootBoxResponse::from).collect())
    }

    /// 박스를 `count`번 엽니다.
    ///
    /// 코인은 조건부 `$inc`로 한 번에 차감되고, 뽑은 아이템을 지급한 뒤 총 전투력을 재계산합니다.
    pub async fn open_box(&self, user_id: &str, box_id: &str, count: u32) -> Result<OpenBoxResponse, AppError> {
        let max_pulls = GachaConfig::max_pulls_per_open();
        if count == 0 || count > max_pulls {
            return Err(AppError::ValidationError(format!("개봉 횟수는 1-{} 사이여야 합니다", max_pulls)));
        }

        let id = parse_object_id(box_id, "box_id")?;
        let loot_box = self.loot_box_repo
            .find_by_id(&id)
            .await?
            .filter(|loot_box| loot_box.is_active)
            .ok_or_else(|| AppError::NotFound(format!("가챠 박스를 찾을 수 없습니다: {}", box_id)))?;

        let cost = loot_box
            .cost_for(count)
            .ok_or_else(|| AppError::ValidationError("개봉 비용이 너무 큽니다".to_string()))?;

        let pool = if loot_box.item_ids.is_empty() {
            self.item_repo.list(None).await?
        } else {
            self.item_repo.find_by_ids(&loot_box.item_ids).await?
        };

        let pulls = {
            let mut rng = rand::rng();
            roll_pulls(&loot_box, &pool, count, &mut rng)?
        };

        let Some(user) = self.user_repo.try_spend_coins(user_id, cost).await? else {
            return match self.user_repo.find_by_id(user_id).await? {
                Some(user) => Err(AppError::InsufficientFunds(format!(
                    "코인이 부족합니다 (필요 {}, 보유 {})",
                    cost, user.coins
                ))),
                None => Err(AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", user_id))),
            };
        };

        for (item_id, quantity) in count_by_item(&pulls) {
            if let Err(e) = self.user_item_repo.add_quantity(user_id, &item_id, quantity).await {
                log::error!("❌ 가챠 보상 지급 실패 ({} / {}): {}", user_id, item_id.to_hex(), e);
                return Err(e);
            }
        }

        let total_power = self.power_service.recalculate_total_power(user_id).await?;

        log::info!(
            "🎰 {} 박스 {} x{} 개봉 (코인 {} 사용)",
            user_id, loot_box.name, count, cost
        );

        Ok(OpenBoxResponse {
            box_id: box_id.to_string(),
            pulls: pulls.into_iter().map(ItemResponse::from).collect(),
            coins_spent: cost,
            remaining_coins: user.coins,
            total_power,
        })
    }
}

/// 같은 아이템은 한 번에 지급하도록 묶습니다.
fn count_by_item(pulls: &[Item]) -> BTreeMap<ObjectId, i64> {
    let mut counts = BTreeMap::new();
    for item in pulls {
        if let Some(id) = item.id {
            *counts.entry(id).or_insert(0_i64) += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn item(name: &str, rarity: Rarity) -> Item {
        let mut item = Item::new(name.to_string(), String::new(), 10, rarity);
        item.id = Some(ObjectId::new());
        item
    }

    fn rates(weights: &[(Rarity, u32)]) -> Vec<DropRate> {
        weights
            .iter()
            .map(|&(rarity, weight)| DropRate { rarity, weight })
            .collect()
    }

    #[test]
    fn test_roll_rarity_zero_weight_is_none() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(roll_rarity(&[], &mut rng), None);
        assert_eq!(roll_rarity(&rates(&[(Rarity::Common, 0)]), &mut rng), None);
    }

    #[test]
    fn test_roll_rarity_never_picks_zero_weight() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let table = rates(&[(Rarity::Common, 0), (Rarity::Epic, 5), (Rarity::Legendary, 0)]);

        for _ in 0..500 {
            assert_eq!(roll_rarity(&table, &mut rng), Some(Rarity::Epic));
        }
    }

    #[test]
    fn test_roll_rarity_follows_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(1234);
        let table = rates(&[(Rarity::Common, 90), (Rarity::Legendary, 10)]);

        let legendary = (0..10_000)
            .filter(|_| roll_rarity(&table, &mut rng) == Some(Rarity::Legendary))
            .count();

        assert!((700..1300).contains(&legendary), "legendary count {}", legendary);
    }

    #[test]
    fn test_pick_item_exact_rarity() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let pool = vec![item("a", Rarity::Common), item("b", Rarity::Epic)];

        for _ in 0..50 {
            assert_eq!(pick_item(&pool, Rarity::Epic, &mut rng).unwrap().name, "b");
        }
    }

    #[test]
    fn test_pick_item_falls_back_to_lower_rarity() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let pool = vec![item("common", Rarity::Common), item("rare", Rarity::Rare)];

        assert_eq!(pick_item(&pool, Rarity::Legendary, &mut rng).unwrap().name, "rare");
        assert_eq!(pick_item(&pool, Rarity::Uncommon, &mut rng).unwrap().name, "common");
    }

    #[test]
    fn test_pick_item_uses_higher_when_nothing_lower() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let pool = vec![item("legend", Rarity::Legendary), item("epic", Rarity::Epic)];

        assert_eq!(pick_item(&pool, Rarity::Common, &mut rng).unwrap().name, "epic");
    }

    #[test]
    fn test_pick_item_empty_pool() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(pick_item(&[], Rarity::Common, &mut rng).is_none());
    }

    #[test]
    fn test_roll_pulls_is_deterministic_with_seed() {
        let loot_box = LootBox::new(
            "Seeded".to_string(),
            String::new(),
            100,
            rates(&[(Rarity::Common, 60), (Rarity::Rare, 30), (Rarity::Legendary, 10)]),
            Vec::new(),
        );
        let pool = vec![
            item("c1", Rarity::Common),
            item("c2", Rarity::Common),
            item("r1", Rarity::Rare),
            item("l1", Rarity::Legendary),
        ];

        let first = roll_pulls(&loot_box, &pool, 10, &mut ChaCha8Rng::seed_from_u64(99)).unwrap();
        let second = roll_pulls(&loot_box, &pool, 10, &mut ChaCha8Rng::seed_from_u64(99)).unwrap();

        assert_eq!(first.len(), 10);
        let first_names: Vec<&str> = first.iter().map(|i| i.name.as_str()).collect();
        let second_names: Vec<&str> = second.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(first_names, second_names);
    }

    #[test]
    fn test_roll_pulls_empty_pool_is_conflict() {
        let loot_box = LootBox::new(
            "Empty".to_string(),
            String::new(),
            100,
            rates(&[(Rarity::Common, 1)]),
            Vec::new(),
        );

        let result = roll_pulls(&loot_box, &[], 1, &mut ChaCha8Rng::seed_from_u64(1));
        assert!(matches!(result, Err(AppError::ConflictError(_))));
    }

    #[test]
    fn test_count_by_item_groups_duplicates() {
        let sword = item("sword", Rarity::Rare);
        let shield = item("shield", Rarity::Common);
        let pulls = vec![sword.clone(), shield.clone(), sword.clone()];

        let counts = count_by_item(&pulls);
        assert_eq!(counts[&sword.id.unwrap()], 2);
        assert_eq!(counts[&shield.id.unwrap()], 1);
    }
}
