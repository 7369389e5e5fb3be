use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::IndexOptions,
    IndexModel,
};
use crate::{
    caching::redis::RedisClient,
    core::{errors::AppError, registry::Repository},
    db::Database,
    domain::entities::gacha::loot_box::LootBox,
};
use singleton_macro::repository;

#[repository(name = "lootbox", collection = "loot_boxes")]
pub struct LootBoxRepository {
    db: Arc<Database>,

    redis: Arc<RedisClient>,
}

impl LootBoxRepository {
    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<LootBox>, AppError> {
        let cache_key = self.cache_key(&id.to_hex());

        if let Ok(Some(cached)) = self.redis.get::<LootBox>(&cache_key).await {
            return Ok(Some(cached));
        }

        let loot_box = self.collection::<LootBox>()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref loot_box) = loot_box {
            let _ = self.redis
                .set_with_expiry(&cache_key, loot_box, 600)
                .await;
        }

        Ok(loot_box)
    }

    pub async fn list_active(&self) -> Result<Vec<LootBox>, AppError> {
        self.collection::<LootBox>()
            .find(doc! { "is_active": true })
            .sort(doc! { "price": 1, "created_at": -1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn create(&self, mut loot_box: LootBox) -> Result<LootBox, AppError> {
        let result = self.collection::<LootBox>()
            .insert_one(&loot_box)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        loot_box.id = result.inserted_id.as_object_id();

        let _ = self.invalidate_collection_cache(None).await;

        Ok(loot_box)
    }

    /// `list_active`의 필터/정렬 순서와 같은 복합 인덱스
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let active_index = IndexModel::builder()
            .keys(doc! { "is_active": 1, "price": 1, "created_at": -1 })
            .options(IndexOptions::builder()
                .name("active_price".to_string())
                .build())
            .build();

        self.collection::<LootBox>()
            .create_indexes([active_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
