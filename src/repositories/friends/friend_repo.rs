//! Friend Repository Implementation
//!
//! 친구 관계는 사용자 쌍마다 문서 하나입니다. 쌍 조회와 중복 방지는 정렬된 `pair`
//! 필드(유니크 인덱스)로, 한 사용자의 관계 목록은 `requester_id`/`addressee_id` `$or`로 찾습니다.

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
    domain::entities::friends::friend::{Friend, FriendPair, FriendStatus},
};
use singleton_macro::repository;

#[repository(name = "friend", collection = "friends")]
pub struct FriendRepository {
    db: Arc<Database>,

    redis: Arc<RedisClient>,
}

impl FriendRepository {
    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Friend>, AppError> {
        self.collection::<Friend>()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 두 사용자 사이의 관계 (방향 무관)
    pub async fn find_between(&self, user_a: &str, user_b: &str) -> Result<Option<Friend>, AppError> {
        self.collection::<Friend>()
            .find_one(pair_filter(&FriendPair::new(user_a, user_b)))
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 같은 쌍의 관계가 이미 있으면 (반대 방향 포함) `ConflictError`
    pub async fn create(&self, mut friend: Friend) -> Result<Friend, AppError> {
        let result = self.collection::<Friend>()
            .insert_one(&friend)
            .await
            .map_err(|e| AppError::from_write(e, "두 사용자 사이에 이미 친구 관계가 있습니다"))?;

        friend.id = result.inserted_id.as_object_id();

        Ok(friend)
    }

    /// 거절된 관계를 새 요청으로 되살립니다. 요청 방향은 새로 보낸 쪽 기준입니다.
    pub async fn reopen(&self, id: &ObjectId, requester_id: &str, addressee_id: &str) -> Result<Option<Friend>, AppError> {
        let now = DateTime::now();

        self.collection::<Friend>()
            .find_one_and_update(
                doc! { "_id": *id, "status": FriendStatus::Rejected.as_str() },
                doc! {
                    "$set": {
                        "requester_id": requester_id,
                        "addressee_id": addressee_id,
                        "status": FriendStatus::Pending.as_str(),
                        "created_at": now,
                        "updated_at": now,
                    },
                    "$unset": { "responded_at": "" },
                },
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// `expected` 상태일 때만 `next`로 바꿉니다. 이미 다른 요청이 처리했다면 None.
    pub async fn transition(
        &self,
        id: &ObjectId,
        expected: FriendStatus,
        next: FriendStatus,
    ) -> Result<Option<Friend>, AppError> {
        let now = DateTime::now();

        self.collection::<Friend>()
            .find_one_and_update(
                doc! { "_id": *id, "status": expected.as_str() },
                doc! {
                    "$set": {
                        "status": next.as_str(),
                        "updated_at": now,
                        "responded_at": now,
                    }
                },
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let result = self.collection::<Friend>()
            .delete_one(doc! { "_id": *id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count > 0)
    }

    /// 수락된 친구 관계 전체
    pub async fn find_accepted(&self, user_id: &str) -> Result<Vec<Friend>, AppError> {
        self.collection::<Friend>()
            .find(doc! {
                "status": FriendStatus::Accepted.as_str(),
                "$or": [ { "requester_id": user_id }, { "addressee_id": user_id } ],
            })
            .sort(doc! { "responded_at": -1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 받은 요청 중 아직 응답하지 않은 것
    pub async fn find_pending_for(&self, addressee_id: &str) -> Result<Vec<Friend>, AppError> {
        self.collection::<Friend>()
            .find(doc! {
                "addressee_id": addressee_id,
                "status": FriendStatus::Pending.as_str(),
            })
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn delete_by_user(&self, user_id: &str) -> Result<u64, AppError> {
        let result = self.collection::<Friend>()
            .delete_many(doc! {
                "$or": [ { "requester_id": user_id }, { "addressee_id": user_id } ]
            })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let pair_index = IndexModel::builder()
            .keys(doc! { "pair.low": 1, "pair.high": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("friend_pair_unique".to_string())
                .build())
            .build();

        let requester_index = IndexModel::builder()
            .keys(doc! { "requester_id": 1, "status": 1 })
            .options(IndexOptions::builder()
                .name("requester_status".to_string())
                .build())
            .build();

        let inbox_index = IndexModel::builder()
            .keys(doc! { "addressee_id": 1, "status": 1 })
            .options(IndexOptions::builder()
                .name("addressee_status".to_string())
                .build())
            .build();

        self.collection::<Friend>()
            .create_indexes([pair_index, requester_index, inbox_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

/// 방향과 무관한 쌍 조회 필터
pub fn pair_filter(pair: &FriendPair) -> Document {
    doc! { "pair.low": pair.low.as_str(), "pair.high": pair.high.as_str() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_filter_is_direction_independent() {
        let forward = pair_filter(&FriendPair::new("u2", "u1"));
        let backward = pair_filter(&FriendPair::new("u1", "u2"));

        assert_eq!(forward, backward);
        assert_eq!(forward, doc! { "pair.low": "u1", "pair.high": "u2" });
    }
}
