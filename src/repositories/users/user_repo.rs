//! User Repository Implementation
//!
//! `users` 컬렉션 접근을 담당합니다. `_id`는 외부 인증 서비스의 uid 문자열이고,
//! `total_power`는 소유 기록에서 계산해 저장해 두는 비정규화 필드입니다.

use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, DateTime, Document},
    options::{IndexOptions, ReturnDocument},
    IndexModel,
};
use crate::{
    caching::redis::RedisClient,
    core::{errors::AppError, registry::Repository},
    db::Database,
    domain::entities::users::user::User,
};
use singleton_macro::repository;

#[repository(name = "user", collection = "users")]
pub struct UserRepository {
    db: Arc<Database>,

    redis: Arc<RedisClient>,
}

impl UserRepository {
    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let cache_key = self.cache_key(id);

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self.collection::<User>()
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref user) = user {
            let _ = self.redis
                .set_with_expiry(&cache_key, user, 600)
                .await;
        }

        Ok(user)
    }

    /// 여러 사용자를 한 번에 조회합니다. 없는 id는 결과에서 빠집니다.
    pub async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<User>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        self.collection::<User>()
            .find(doc! { "_id": { "$in": ids } })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn create(&self, user: User) -> Result<User, AppError> {
        if self.find_by_id(&user.id).await?.is_some() {
            return Err(AppError::ConflictError("이미 등록된 사용자입니다".to_string()));
        }

        self.collection::<User>()
            .insert_one(&user)
            .await
            .map_err(|e| AppError::from_write(e, "이미 등록된 사용자입니다"))?;

        let _ = self.invalidate_collection_cache(None).await;

        Ok(user)
    }

    /// `total_power`를 병합 기록합니다.
    ///
    /// 다른 필드는 건드리지 않고, 문서가 없으면 아무것도 만들지 않습니다
    /// (사용자 문서는 `create`만 만듭니다). 갱신할 문서가 있었는지 반환합니다.
    pub async fn set_total_power(&self, id: &str, total_power: i64) -> Result<bool, AppError> {
        let result = self.collection::<User>()
            .update_one(doc! { "_id": id }, total_power_update(total_power, DateTime::now()))
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let _ = self.invalidate_cache(id).await;

        Ok(result.matched_count > 0)
    }

    pub async fn set_display_name(&self, id: &str, display_name: &str) -> Result<(), AppError> {
        self.collection::<User>()
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "display_name": display_name, "updated_at": DateTime::now() } },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let _ = self.invalidate_cache(id).await;

        Ok(())
    }

    /// 잔액이 충분할 때만 코인을 차감합니다.
    ///
    /// 조건부 `$inc` 한 번으로 처리하므로 동시에 여러 번 개봉해도 잔액이 음수가 되지 않습니다.
    /// 사용자가 없거나 잔액이 부족하면 `None`을 반환합니다.
    pub async fn try_spend_coins(&self, id: &str, cost: i64) -> Result<Option<User>, AppError> {
        let updated = self.collection::<User>()
            .find_one_and_update(
                doc! { "_id": id, "coins": { "$gte": cost } },
                doc! {
                    "$inc": { "coins": -cost },
                    "$set": { "updated_at": DateTime::now() },
                },
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if updated.is_some() {
            let _ = self.invalidate_cache(id).await;
        }

        Ok(updated)
    }

    /// 전투력 내림차순, 같으면 uid 오름차순
    pub async fn top_by_power(&self, limit: u32) -> Result<Vec<User>, AppError> {
        self.collection::<User>()
            .find(doc! {})
            .sort(doc! { "total_power": -1, "_id": 1 })
            .limit(i64::from(limit))
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 전역 랭킹용 상위 사용자 목록을 `ttl_seconds` 동안 캐시합니다.
    pub async fn top_by_power_cached(&self, limit: u32, ttl_seconds: u64) -> Result<Vec<User>, AppError> {
        let cache_key = format!("ranking:global:{}", limit);

        if let Ok(Some(cached)) = self.redis.get::<Vec<User>>(&cache_key).await {
            return Ok(cached);
        }

        let users = self.top_by_power(limit).await?;

        if ttl_seconds > 0 {
            let _ = self.redis
                .set_with_expiry(&cache_key, &users, ttl_seconds)
                .await;
        }

        Ok(users)
    }

    /// 전투력이 바뀌면 모든 랭킹 스냅샷을 버립니다.
    pub async fn invalidate_ranking_cache(&self) {
        if let Err(e) = self.redis.del_pattern("ranking:*").await {
            log::warn!("랭킹 캐시 무효화 실패: {}", e);
        }
    }

    pub async fn count_with_power_greater_than(&self, total_power: i64) -> Result<u64, AppError> {
        self.collection::<User>()
            .count_documents(doc! { "total_power": { "$gt": total_power } })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn count_all(&self) -> Result<u64, AppError> {
        self.collection::<User>()
            .count_documents(doc! {})
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let result = self.collection::<User>()
            .delete_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if result.deleted_count > 0 {
            let _ = self.invalidate_cache(id).await;
            let _ = self.invalidate_collection_cache(None).await;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let collection = self.collection::<User>();

        let ranking_index = IndexModel::builder()
            .keys(doc! { "total_power": -1, "_id": 1 })
            .options(IndexOptions::builder()
                .name("total_power_ranking".to_string())
                .build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        collection
            .create_indexes([ranking_index, created_at_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

/// `total_power` 병합 갱신 문서. `$set`만 사용합니다.
pub fn total_power_update(total_power: i64, now: DateTime) -> Document {
    doc! { "$set": { "total_power": total_power, "updated_at": now } }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_power_update_only_sets_power() {
        let now = DateTime::from_millis(1_700_000_000_000);
        let update = total_power_update(640, now);

        assert_eq!(update.keys().collect::<Vec<_>>(), vec!["$set"]);

        let set = update.get_document("$set").unwrap();
        assert_eq!(set.get_i64("total_power").unwrap(), 640);
        assert_eq!(set.get_datetime("updated_at").unwrap(), &now);
        assert!(!set.contains_key("display_name"));
        assert!(!set.contains_key("coins"));
    }
}
