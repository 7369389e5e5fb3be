use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime, Document},
    options::{IndexOptions, ReturnDocument},
    IndexModel,
};
use crate::{
    caching::redis::RedisClient,
    core::{errors::AppError, registry::Repository},
    db::Database,
    domain::entities::items::item::{Item, Rarity},
};
use singleton_macro::repository;

#[repository(name = "item", collection = "items")]
pub struct ItemRepository {
    db: Arc<Database>,

    redis: Arc<RedisClient>,
}

impl ItemRepository {
    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Item>, AppError> {
        let cache_key = self.cache_key(&id.to_hex());

        if let Ok(Some(cached)) = self.redis.get::<Item>(&cache_key).await {
            return Ok(Some(cached));
        }

        let item = self.collection::<Item>()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref item) = item {
            let _ = self.redis
                .set_with_expiry(&cache_key, item, 600)
                .await;
        }

        Ok(item)
    }

    /// 아이템 정의 일괄 조회 (`$in` 한 번)
    ///
    /// 존재하지 않는 id는 결과에 포함되지 않습니다.
    pub async fn find_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<Item>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        self.collection::<Item>()
            .find(doc! { "_id": { "$in": ids } })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 카탈로그 조회. 전투력 내림차순, 같으면 이름순
    pub async fn list(&self, rarity: Option<Rarity>) -> Result<Vec<Item>, AppError> {
        let filter = match rarity {
            Some(rarity) => doc! { "rarity": rarity.as_str() },
            None => doc! {},
        };

        self.collection::<Item>()
            .find(filter)
            .sort(doc! { "power": -1, "name": 1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn create(&self, mut item: Item) -> Result<Item, AppError> {
        let result = self.collection::<Item>()
            .insert_one(&item)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        item.id = result.inserted_id.as_object_id();
        if item.id.is_none() {
            return Err(AppError::InternalError("삽입된 아이템 id를 읽을 수 없습니다".to_string()));
        }

        let _ = self.invalidate_collection_cache(None).await;

        Ok(item)
    }

    /// 부분 수정 후 변경된 문서를 반환합니다.
    pub async fn update(&self, id: &ObjectId, mut update_doc: Document) -> Result<Option<Item>, AppError> {
        update_doc.insert("updated_at", DateTime::now());

        let updated = self.collection::<Item>()
            .find_one_and_update(doc! { "_id": *id }, doc! { "$set": update_doc })
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if updated.is_some() {
            let _ = self.invalidate_cache(&id.to_hex()).await;
        }

        Ok(updated)
    }

    /// 삭제된 문서를 반환합니다. 이미지 정리에 필요합니다.
    pub async fn delete(&self, id: &ObjectId) -> Result<Option<Item>, AppError> {
        let deleted = self.collection::<Item>()
            .find_one_and_delete(doc! { "_id": *id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if deleted.is_some() {
            let _ = self.invalidate_cache(&id.to_hex()).await;
            let _ = self.invalidate_collection_cache(None).await;
        }

        Ok(deleted)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let rarity_index = IndexModel::builder()
            .keys(doc! { "rarity": 1, "power": -1 })
            .options(IndexOptions::builder()
                .name("rarity_power".to_string())
                .build())
            .build();

        self.collection::<Item>()
            .create_indexes([rarity_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
