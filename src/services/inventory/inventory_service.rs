//! 인벤토리(소유 기록) 서비스
//!
//! 지급/회수 같은 모든 변경은 총 전투력 재계산으로 끝납니다.

use std::collections::HashMap;
use std::sync::Arc;
use mongodb::bson::oid::ObjectId;
use singleton_macro::service;
use crate::{
    core::errors::AppError,
    domain::{
        dto::{
            inventory::{InventoryEntry, InventoryResponse},
            items::ItemResponse,
            users::TotalPowerResponse,
        },
        entities::{
            items::{item::Item, user_item::UserItem},
            users::user::User,
        },
    },
    repositories::{
        inventory::user_item_repo::UserItemRepository,
        items::item_repo::ItemRepository,
        users::user_repo::UserRepository,
    },
    services::power::{compute_total_power, power_contribution, PowerService},
    utils::string_utils::{parse_object_id, to_utc},
};

#[service(name = "inventory")]
pub struct InventoryService {
    user_repo: Arc<UserRepository>,
    item_repo: Arc<ItemRepository>,
    user_item_repo: Arc<UserItemRepository>,
    power_service: Arc<PowerService>,
}

impl InventoryService {
    /// 소유 기록과 아이템 정의를 합쳐 보여줍니다.
    pub async fn list_inventory(&self, user_id: &str) -> Result<InventoryResponse, AppError> {
        let records = self.user_item_repo.find_by_user(user_id).await?;

        let item_ids: Vec<ObjectId> = records.iter().map(|record| record.item_id).collect();
        let items = self.item_repo.find_by_ids(&item_ids).await?;

        Ok(build_inventory(user_id, records, items))
    }

    /// 관리자 지급. 아이템 정의가 있어야 합니다.
    pub async fn grant_item(&self, user_id: &str, item_id: &str, quantity: i64) -> Result<TotalPowerResponse, AppError> {
        ensure_positive(quantity)?;
        let id = parse_object_id(item_id, "item_id")?;

        self.ensure_user(user_id).await?;
        if self.item_repo.find_by_id(&id).await?.is_none() {
            return Err(AppError::NotFound(format!("아이템을 찾을 수 없습니다: {}", item_id)));
        }

        let record = self.user_item_repo.add_quantity(user_id, &id, quantity).await?;
        log::info!("🎁 {}에게 아이템 {} x{} 지급 (보유 {})", user_id, item_id, quantity, record.quantity);

        self.refresh_power(user_id).await
    }

    /// 관리자 회수. 수량이 0이 되면 소유 기록이 사라집니다.
    pub async fn remove_item(&self, user_id: &str, item_id: &str, quantity: i64) -> Result<TotalPowerResponse, AppError> {
        ensure_positive(quantity)?;
        let id = parse_object_id(item_id, "item_id")?;

        let remaining = self.user_item_repo.remove_quantity(user_id, &id, quantity).await?;
        log::info!("↩️ {}에게서 아이템 {} x{} 회수 (남은 수량 {})", user_id, item_id, quantity, remaining);

        self.refresh_power(user_id).await
    }

    /// 등록된 사용자만 재계산할 수 있습니다. 미등록 uid는 404입니다.
    pub async fn recalculate(&self, user_id: &str) -> Result<TotalPowerResponse, AppError> {
        self.ensure_user(user_id).await?;
        self.refresh_power(user_id).await
    }

    async fn refresh_power(&self, user_id: &str) -> Result<TotalPowerResponse, AppError> {
        let total_power = self.power_service.recalculate_total_power(user_id).await?;

        Ok(TotalPowerResponse {
            user_id: user_id.to_string(),
            total_power,
        })
    }

    async fn ensure_user(&self, user_id: &str) -> Result<(), AppError> {
        ensure_registered(user_id, self.user_repo.find_by_id(user_id).await?.as_ref())
    }
}

/// 사용자 문서가 없으면 404
fn ensure_registered(user_id: &str, user: Option<&User>) -> Result<(), AppError> {
    match user {
        Some(_) => Ok(()),
        None => Err(AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", user_id))),
    }
}

fn ensure_positive(quantity: i64) -> Result<(), AppError> {
    if quantity <= 0 {
        return Err(AppError::ValidationError("수량은 1 이상이어야 합니다".to_string()));
    }
    Ok(())
}

/// 기록 순서를 유지한 채 아이템 정의를 붙입니다.
pub fn build_inventory(user_id: &str, records: Vec<UserItem>, items: Vec<Item>) -> InventoryResponse {
    let total_power = compute_total_power(&records, &items);

    let items_by_id: HashMap<ObjectId, Item> = items
        .into_iter()
        .filter_map(|item| item.id.map(|id| (id, item)))
        .collect();

    let entries = records
        .into_iter()
        .map(|record| {
            let item = items_by_id.get(&record.item_id).cloned();
            let power = item.as_ref().map(|item| item.power).unwrap_or(0);

            InventoryEntry {
                item_id: record.item_id.to_hex(),
                quantity: record.quantity,
                power_contribution: power_contribution(power, record.quantity),
                item: item.map(ItemResponse::from),
                first_obtained_at: to_utc(record.first_obtained_at),
            }
        })
        .collect();

    InventoryResponse {
        user_id: user_id.to_string(),
        total_power,
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::items::item::Rarity;

    fn saved_item(name: &str, power: i64) -> Item {
        let mut item = Item::new(name.to_string(), String::new(), power, Rarity::Rare);
        item.id = Some(ObjectId::new());
        item
    }

    #[test]
    fn test_unregistered_user_cannot_recalculate() {
        assert!(matches!(
            ensure_registered("uid-unregistered", None),
            Err(AppError::NotFound(_))
        ));

        let user = User::new("uid-1".to_string(), "Aria".to_string(), None, 1000);
        assert!(ensure_registered("uid-1", Some(&user)).is_ok());
    }

    #[test]
    fn test_build_inventory_joins_items() {
        let bow = saved_item("Bow", 30);
        let records = vec![UserItem::new("uid-1".to_string(), bow.id.unwrap(), 4)];

        let inventory = build_inventory("uid-1", records, vec![bow]);

        assert_eq!(inventory.total_power, 120);
        assert_eq!(inventory.entries.len(), 1);
        assert_eq!(inventory.entries[0].power_contribution, 120);
        assert_eq!(inventory.entries[0].item.as_ref().unwrap().name, "Bow");
    }

    #[test]
    fn test_build_inventory_keeps_dangling_records() {
        let records = vec![UserItem::new("uid-1".to_string(), ObjectId::new(), 2)];

        let inventory = build_inventory("uid-1", records, Vec::new());

        assert_eq!(inventory.total_power, 0);
        assert_eq!(inventory.entries.len(), 1);
        assert!(inventory.entries[0].item.is_none());
        assert_eq!(inventory.entries[0].power_contribution, 0);
    }

    #[test]
    fn test_ensure_positive() {
        assert!(ensure_positive(1).is_ok());
        assert!(ensure_positive(0).is_err());
        assert!(ensure_positive(-3).is_err());
    }
}
