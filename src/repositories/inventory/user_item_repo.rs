use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime},
    options::{IndexOptions, ReturnDocument},
    IndexModel,
};
use crate::{
    caching::redis::RedisClient,
    core::{errors::AppError, registry::Repository},
    db::Database,
    domain::entities::items::user_item::UserItem,
};
use singleton_macro::repository;

#[repository(name = "useritem", collection = "user_items")]
pub struct UserItemRepository {
    db: Arc<Database>,

    redis: Arc<RedisClient>,
}

impl UserItemRepository {
    /// 사용자의 모든 소유 기록 (처음 얻은 순)
    pub async fn find_by_user(&self, user_id: &str) -> Result<Vec<UserItem>, AppError> {
        self.collection::<UserItem>()
            .find(doc! { "user_id": user_id })
            .sort(doc! { "first_obtained_at": 1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn find_one(&self, user_id: &str, item_id: &ObjectId) -> Result<Option<UserItem>, AppError> {
        self.collection::<UserItem>()
            .find_one(doc! { "user_id": user_id, "item_id": *item_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 주어진 아이템을 모두 보유하고 있는지 확인합니다.
    pub async fn owns_all(&self, user_id: &str, item_ids: &[ObjectId]) -> Result<bool, AppError> {
        if item_ids.is_empty() {
            return Ok(true);
        }

        let mut distinct = item_ids.to_vec();
        distinct.sort();
        distinct.dedup();

        let owned = self.collection::<UserItem>()
            .count_documents(doc! {
                "user_id": user_id,
                "item_id": { "$in": distinct.clone() },
                "quantity": { "$gt": 0_i64 },
            })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(owned == distinct.len() as u64)
    }

    /// 수량을 더합니다. 기록이 없으면 새로 만듭니다.
    pub async fn add_quantity(&self, user_id: &str, item_id: &ObjectId, quantity: i64) -> Result<UserItem, AppError> {
        let now = DateTime::now();

        self.collection::<UserItem>()
            .find_one_and_update(
                doc! { "user_id": user_id, "item_id": *item_id },
                doc! {
                    "$inc": { "quantity": quantity },
                    "$set": { "updated_at": now },
                    "$setOnInsert": { "first_obtained_at": now },
                },
            )
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .ok_or_else(|| AppError::InternalError("소유 기록 갱신 결과가 없습니다".to_string()))
    }

    /// 수량을 뺍니다. 보유 수량보다 많이 뺄 수 없고, 0이 되면 기록을 지웁니다.
    ///
    /// 남은 수량을 반환합니다.
    pub async fn remove_quantity(&self, user_id: &str, item_id: &ObjectId, quantity: i64) -> Result<i64, AppError> {
        let updated = self.collection::<UserItem>()
            .find_one_and_update(
                doc! { "user_id": user_id, "item_id": *item_id, "quantity": { "$gte": quantity } },
                doc! {
                    "$inc": { "quantity": -quantity },
                    "$set": { "updated_at": DateTime::now() },
                },
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let Some(record) = updated else {
            return match self.find_one(user_id, item_id).await? {
                Some(record) => Err(AppError::ConflictError(format!(
                    "보유 수량({})보다 많이 회수할 수 없습니다",
                    record.quantity
                ))),
                None => Err(AppError::NotFound("보유하지 않은 아이템입니다".to_string())),
            };
        };

        if record.quantity <= 0 {
            self.collection::<UserItem>()
                .delete_one(doc! { "user_id": user_id, "item_id": *item_id, "quantity": { "$lte": 0_i64 } })
                .await
                .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        }

        Ok(record.quantity.max(0))
    }

    /// 아이템을 보유한 사용자 uid 목록
    pub async fn find_owner_ids(&self, item_id: &ObjectId) -> Result<Vec<String>, AppError> {
        let records: Vec<UserItem> = self.collection::<UserItem>()
            .find(doc! { "item_id": *item_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let mut owners: Vec<String> = records.into_iter().map(|record| record.user_id).collect();
        owners.sort();
        owners.dedup();

        Ok(owners)
    }

    pub async fn delete_by_user(&self, user_id: &str) -> Result<u64, AppError> {
        let result = self.collection::<UserItem>()
            .delete_many(doc! { "user_id": user_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let ownership_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "item_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("user_item_unique".to_string())
                .build())
            .build();

        let item_index = IndexModel::builder()
            .keys(doc! { "item_id": 1 })
            .options(IndexOptions::builder()
                .name("item_id".to_string())
                .build())
            .build();

        self.collection::<UserItem>()
            .create_indexes([ownership_index, item_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
