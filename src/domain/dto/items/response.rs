use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::domain::dto::images::ImageUploadResponse;
use crate::domain::entities::items::item::{Item, Rarity};
use crate::utils::string_utils::to_utc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub power: i64,
    pub rarity: Rarity,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: item.name,
            description: item.description,
            power: item.power,
            rarity: item.rarity,
            image_url: item.image_url,
            created_at: to_utc(item.created_at),
            updated_at: to_utc(item.updated_at),
        }
    }
}

/// 아이템 이미지 업로드 결과
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemImageResponse {
    pub item: ItemResponse,
    pub image: ImageUploadResponse,
}
