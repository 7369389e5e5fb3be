use std::sync::Arc;
use mongodb::bson::{doc, DateTime, Document};
use crate::{
    caching::redis::RedisClient,
    core::{errors::AppError, registry::Repository},
    db::Database,
    domain::entities::profiles::profile::UserProfile,
};
use singleton_macro::repository;

#[repository(name = "profile", collection = "profiles")]
pub struct ProfileRepository {
    db: Arc<Database>,

    redis: Arc<RedisClient>,
}

impl ProfileRepository {
    pub async fn find_by_user(&self, user_id: &str) -> Result<Option<UserProfile>, AppError> {
        let cache_key = self.cache_key(user_id);

        if let Ok(Some(cached)) = self.redis.get::<UserProfile>(&cache_key).await {
            return Ok(Some(cached));
        }

        let profile = self.collection::<UserProfile>()
            .find_one(doc! { "_id": user_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref profile) = profile {
            let _ = self.redis
                .set_with_expiry(&cache_key, profile, 600)
                .await;
        }

        Ok(profile)
    }

    /// 주어진 필드만 병합 기록합니다.
    ///
    /// 문서가 없으면 `defaults`의 나머지 필드로 새로 만듭니다.
    pub async fn upsert_fields(
        &self,
        defaults: &UserProfile,
        mut fields: Document,
    ) -> Result<(), AppError> {
        fields.insert("updated_at", DateTime::now());

        let mut on_insert = mongodb::bson::to_document(defaults)
            .map_err(|e| AppError::InternalError(format!("프로필 직렬화 실패: {}", e)))?;
        on_insert.remove("_id");
        for key in fields.keys() {
            on_insert.remove(key);
        }

        let mut update = doc! { "$set": fields };
        if !on_insert.is_empty() {
            update.insert("$setOnInsert", on_insert);
        }

        self.collection::<UserProfile>()
            .update_one(doc! { "_id": defaults.user_id.as_str() }, update)
            .upsert(true)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let _ = self.invalidate_cache(&defaults.user_id).await;

        Ok(())
    }

    pub async fn delete(&self, user_id: &str) -> Result<bool, AppError> {
        let result = self.collection::<UserProfile>()
            .delete_one(doc! { "_id": user_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let _ = self.invalidate_cache(user_id).await;

        Ok(result.deleted_count > 0)
    }
}
