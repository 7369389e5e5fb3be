//! 아이템 카탈로그 서비스
//!
//! 아이템 전투력이 바뀌거나 아이템이 삭제되면 그 아이템을 가진 모든 사용자의
//! 총 전투력을 다시 계산합니다. 삭제된 아이템의 소유 기록은 남아 있어도 0으로 계산됩니다.

use std::sync::Arc;
use mongodb::bson::{doc, Document};
use singleton_macro::service;
use crate::{
    core::errors::AppError,
    domain::{
        dto::items::{CreateItemRequest, ItemImageResponse, ItemResponse, UpdateItemRequest},
        entities::items::item::{Item, Rarity},
    },
    repositories::{
        inventory::user_item_repo::UserItemRepository,
        items::item_repo::ItemRepository,
    },
    services::{images::{upload_response, ImageService}, power::PowerService},
    utils::string_utils::{parse_object_id, validate_required_string},
};

#[service(name = "item")]
pub struct ItemService {
    item_repo: Arc<ItemRepository>,
    user_item_repo: Arc<UserItemRepository>,
    power_service: Arc<PowerService>,
    image_service: Arc<ImageService>,
}

impl ItemService {
    pub async fn create_item(&self, request: CreateItemRequest) -> Result<ItemResponse, AppError> {
        let name = validate_required_string(&request.name, "아이템 이름")?;

        let item = Item::new(name, request.description.trim().to_string(), request.power, request.rarity);
        let created = self.item_repo.create(item).await?;

        log::info!("🗡️ 아이템 생성: {} ({}, 전투력 {})", created.name, created.rarity.as_str(), created.power);

        Ok(ItemResponse::from(created))
    }

    pub async fn get_item(&self, item_id: &str) -> Result<ItemResponse, AppError> {
        let id = parse_object_id(item_id, "item_id")?;

        self.item_repo
            .find_by_id(&id)
            .await?
            .map(ItemResponse::from)
            .ok_or_else(|| AppError::NotFound(format!("아이템을 찾을 수 없습니다: {}", item_id)))
    }

    pub async fn list_items(&self, rarity: Option<&str>) -> Result<Vec<ItemResponse>, AppError> {
        let rarity = rarity
            .filter(|value| !value.trim().is_empty())
            .map(Rarity::from_str)
            .transpose()
            .map_err(AppError::ValidationError)?;

        let items = self.item_repo.list(rarity).await?;

        Ok(items.into_iter().map(ItemResponse::from).collect())
    }

    pub async fn update_item(&self, item_id: &str, request: UpdateItemRequest) -> Result<ItemResponse, AppError> {
        let id = parse_object_id(item_id, "item_id")?;

        let current = self.item_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("아이템을 찾을 수 없습니다: {}", item_id)))?;

        let update_doc = build_item_update(&request)?;
        let updated = self.item_repo
            .update(&id, update_doc)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("아이템을 찾을 수 없습니다: {}", item_id)))?;

        if updated.power != current.power {
            let owners = self.user_item_repo.find_owner_ids(&id).await?;
            log::info!(
                "⚡ 아이템 {} 전투력 변경 {} → {}, 보유자 {}명 재계산",
                item_id, current.power, updated.power, owners.len()
            );
            self.power_service.recalculate_many(&owners).await?;
        }

        Ok(ItemResponse::from(updated))
    }

    pub async fn delete_item(&self, item_id: &str) -> Result<(), AppError> {
        let id = parse_object_id(item_id, "item_id")?;

        let owners = self.user_item_repo.find_owner_ids(&id).await?;

        let deleted = self.item_repo
            .delete(&id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("아이템을 찾을 수 없습니다: {}", item_id)))?;

        if let Some(image_id) = deleted.image_id {
            self.image_service.delete_image(&image_id).await;
        }

        self.power_service.recalculate_many(&owners).await?;

        log::info!("🗑️ 아이템 삭제: {} ({})", deleted.name, item_id);

        Ok(())
    }

    /// 아이템 이미지를 교체합니다. 이전 이미지는 삭제됩니다.
    pub async fn upload_item_image(
        &self,
        item_id: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<ItemImageResponse, AppError> {
        let id = parse_object_id(item_id, "item_id")?;

        let current = self.item_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("아이템을 찾을 수 없습니다: {}", item_id)))?;

        let stored = self.image_service
            .upload_image("items", item_id, content_type, bytes)
            .await?;

        let updated = self.item_repo
            .update(&id, doc! { "image_id": stored.id, "image_url": stored.public_url() })
            .await?;

        let Some(updated) = updated else {
            self.image_service.delete_image(&stored.id).await;
            return Err(AppError::NotFound(format!("아이템을 찾을 수 없습니다: {}", item_id)));
        };

        if let Some(old_image) = current.image_id {
            self.image_service.delete_image(&old_image).await;
        }

        Ok(ItemImageResponse {
            item: ItemResponse::from(updated),
            image: upload_response(&stored),
        })
    }
}

/// 수정 요청을 `$set` 문서로 바꿉니다.
fn build_item_update(request: &UpdateItemRequest) -> Result<Document, AppError> {
    let mut update = Document::new();

    if let Some(ref name) = request.name {
        update.insert("name", validate_required_string(name, "아이템 이름")?);
    }
    if let Some(ref description) = request.description {
        update.insert("description", description.trim());
    }
    if let Some(power) = request.power {
        if power < 0 {
            return Err(AppError::ValidationError("전투력은 0 이상이어야 합니다".to_string()));
        }
        update.insert("power", power);
    }
    if let Some(rarity) = request.rarity {
        update.insert("rarity", rarity.as_str());
    }

    if update.is_empty() {
        return Err(AppError::ValidationError("변경할 필드가 없습니다".to_string()));
    }

    Ok(update)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_item_update_only_sent_fields() {
        let request = UpdateItemRequest {
            power: Some(300),
            rarity: Some(Rarity::Legendary),
            ..Default::default()
        };

        let update = build_item_update(&request).unwrap();
        assert_eq!(update.get_i64("power").unwrap(), 300);
        assert_eq!(update.get_str("rarity").unwrap(), "LEGENDARY");
        assert!(!update.contains_key("name"));
        assert!(!update.contains_key("description"));
    }

    #[test]
    fn test_build_item_update_rejects_empty_and_negative() {
        assert!(build_item_update(&UpdateItemRequest::default()).is_err());

        let negative = UpdateItemRequest {
            power: Some(-5),
            ..Default::default()
        };
        assert!(build_item_update(&negative).is_err());
    }

    #[test]
    fn test_build_item_update_trims_name() {
        let request = UpdateItemRequest {
            name: Some("  Moon Blade ".to_string()),
            ..Default::default()
        };

        let update = build_item_update(&request).unwrap();
        assert_eq!(update.get_str("name").unwrap(), "Moon Blade");
    }
}
