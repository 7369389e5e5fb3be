//! 친구 관계 서비스
//!
//! 관계 상태 전이는 `FriendStatus::respond`가, 동시성은 리포지토리의 조건부 갱신이 맡습니다.

use std::collections::HashMap;
use std::sync::Arc;
use mongodb::bson::oid::ObjectId;
use singleton_macro::service;
use crate::{
    core::errors::AppError,
    domain::{
        dto::friends::{FriendResponse, FriendSummary},
        entities::{
            friends::friend::{Friend, FriendStatus},
            users::user::User,
        },
    },
    repositories::{
        friends::friend_repo::FriendRepository,
        users::user_repo::UserRepository,
    },
    utils::string_utils::{parse_object_id, to_utc},
};

/// 친구 요청을 보냈을 때 할 일
#[derive(Debug, Clone, PartialEq)]
pub enum RequestAction {
    Create,
    /// 거절된 관계를 PENDING으로 되살림
    Reopen(ObjectId),
}

/// 기존 관계를 보고 새 요청을 어떻게 처리할지 정합니다.
pub fn decide_request(existing: Option<&Friend>, from: &str, to: &str) -> Result<RequestAction, AppError> {
    if from == to {
        return Err(AppError::ValidationError("자기 자신에게 친구 요청을 보낼 수 없습니다".to_string()));
    }

    let Some(relation) = existing else {
        return Ok(RequestAction::Create);
    };

    match relation.status {
        FriendStatus::Accepted => Err(AppError::ConflictError("이미 친구입니다".to_string())),
        FriendStatus::Pending if relation.requester_id == from => {
            Err(AppError::ConflictError("이미 보낸 친구 요청이 있습니다".to_string()))
        }
        FriendStatus::Pending => Err(AppError::ConflictError(
            "상대가 보낸 친구 요청이 있습니다. 받은 요청에 응답해주세요".to_string(),
        )),
        FriendStatus::Rejected => relation
            .id
            .map(RequestAction::Reopen)
            .ok_or_else(|| AppError::InternalError("친구 관계 id가 없습니다".to_string())),
    }
}

#[service(name = "friend")]
pub struct FriendService {
    friend_repo: Arc<FriendRepository>,
    user_repo: Arc<UserRepository>,
}

impl FriendService {
    pub async fn send_request(&self, from: &str, to: &str) -> Result<FriendResponse, AppError> {
        let to = to.trim();
        if from != to && self.user_repo.find_by_id(to).await?.is_none() {
            return Err(AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", to)));
        }

        let existing = self.friend_repo.find_between(from, to).await?;

        let relation = match decide_request(existing.as_ref(), from, to)? {
            RequestAction::Create => self.friend_repo.create(Friend::new_request(from.to_string(), to.to_string())).await?,
            RequestAction::Reopen(id) => self.friend_repo
                .reopen(&id, from, to)
                .await?
                .ok_or_else(|| AppError::ConflictError("친구 관계가 동시에 변경되었습니다".to_string()))?,
        };

        log::info!("🤝 친구 요청: {} → {}", from, to);

        Ok(FriendResponse::from(relation))
    }

    /// 받은 요청에 응답합니다. 요청을 받은 사람만 응답할 수 있습니다.
    pub async fn respond(&self, relation_id: &str, actor: &str, accept: bool) -> Result<FriendResponse, AppError> {
        let id = parse_object_id(relation_id, "relation_id")?;
        let relation = self.find_relation(&id).await?;

        if relation.addressee_id != actor {
            return Err(AppError::AuthorizationError("요청을 받은 사용자만 응답할 수 있습니다".to_string()));
        }

        let next = relation.status.respond(accept)?;

        let updated = self.friend_repo
            .transition(&id, FriendStatus::Pending, next)
            .await?
            .ok_or_else(|| AppError::ConflictError("이미 처리된 친구 요청입니다".to_string()))?;

        log::info!("🤝 친구 요청 {} → {}", relation_id, next.as_str());

        Ok(FriendResponse::from(updated))
    }

    /// 관계 삭제 (친구 끊기, 보낸 요청 취소). 양쪽 누구나 가능
    pub async fn remove_friend(&self, relation_id: &str, actor: &str) -> Result<(), AppError> {
        let id = parse_object_id(relation_id, "relation_id")?;
        let relation = self.find_relation(&id).await?;

        if !relation.involves(actor) {
            return Err(AppError::AuthorizationError("본인의 친구 관계만 삭제할 수 있습니다".to_string()));
        }

        self.friend_repo.delete(&id).await?;

        Ok(())
    }

    pub async fn list_friends(&self, user_id: &str) -> Result<Vec<FriendSummary>, AppError> {
        let relations = self.friend_repo.find_accepted(user_id).await?;

        let friend_ids: Vec<String> = relations
            .iter()
            .filter_map(|relation| relation.other_party(user_id).map(str::to_string))
            .collect();

        let users = self.user_repo.find_by_ids(&friend_ids).await?;

        Ok(summarize_friends(user_id, &relations, users))
    }

    pub async fn list_pending(&self, user_id: &str) -> Result<Vec<FriendResponse>, AppError> {
        let pending = self.friend_repo.find_pending_for(user_id).await?;
        Ok(pending.into_iter().map(FriendResponse::from).collect())
    }

    /// 수락된 친구들의 uid
    pub async fn friend_ids(&self, user_id: &str) -> Result<Vec<String>, AppError> {
        let relations = self.friend_repo.find_accepted(user_id).await?;

        Ok(relations
            .iter()
            .filter_map(|relation| relation.other_party(user_id).map(str::to_string))
            .collect())
    }

    async fn find_relation(&self, id: &ObjectId) -> Result<Friend, AppError> {
        self.friend_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("친구 관계를 찾을 수 없습니다: {}", id.to_hex())))
    }
}

fn summarize_friends(user_id: &str, relations: &[Friend], users: Vec<User>) -> Vec<FriendSummary> {
    let users_by_id: HashMap<String, User> = users
        .into_iter()
        .map(|user| (user.id.clone(), user))
        .collect();

    relations
        .iter()
        .filter_map(|relation| {
            let other = relation.other_party(user_id)?;
            let user = users_by_id.get(other);

            Some(FriendSummary {
                relation_id: relation.id.map(|id| id.to_hex()).unwrap_or_default(),
                user_id: other.to_string(),
                display_name: user.map(|user| user.display_name.clone()),
                total_power: user.map(|user| user.total_power).unwrap_or(0),
                since: to_utc(relation.responded_at.unwrap_or(relation.created_at)),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relation(requester: &str, addressee: &str, status: FriendStatus) -> Friend {
        let mut friend = Friend::new_request(requester.to_string(), addressee.to_string());
        friend.id = Some(ObjectId::new());
        friend.status = status;
        friend
    }

    #[test]
    fn test_cannot_befriend_self() {
        assert!(matches!(
            decide_request(None, "alice", "alice"),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_new_relation_is_created() {
        assert_eq!(decide_request(None, "alice", "bob").unwrap(), RequestAction::Create);
    }

    #[test]
    fn test_duplicate_requests_conflict_in_both_directions() {
        let pending = relation("alice", "bob", FriendStatus::Pending);
        assert!(matches!(
            decide_request(Some(&pending), "alice", "bob"),
            Err(AppError::ConflictError(_))
        ));
        assert!(matches!(
            decide_request(Some(&pending), "bob", "alice"),
            Err(AppError::ConflictError(_))
        ));

        let accepted = relation("alice", "bob", FriendStatus::Accepted);
        assert!(matches!(
            decide_request(Some(&accepted), "bob", "alice"),
            Err(AppError::ConflictError(_))
        ));
    }

    #[test]
    fn test_rejected_relation_is_reopened() {
        let rejected = relation("alice", "bob", FriendStatus::Rejected);
        let id = rejected.id.unwrap();

        assert_eq!(decide_request(Some(&rejected), "bob", "alice").unwrap(), RequestAction::Reopen(id));
        assert_eq!(decide_request(Some(&rejected), "alice", "bob").unwrap(), RequestAction::Reopen(id));
    }

    #[test]
    fn test_summarize_friends_handles_deleted_users() {
        let relations = vec![
            relation("alice", "bob", FriendStatus::Accepted),
            relation("carol", "alice", FriendStatus::Accepted),
        ];
        let bob = User::new("bob".to_string(), "Bob".to_string(), None, 0);

        let summaries = summarize_friends("alice", &relations, vec![bob]);

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].user_id, "bob");
        assert_eq!(summaries[0].display_name.as_deref(), Some("Bob"));
        assert_eq!(summaries[1].user_id, "carol");
        assert!(summaries[1].display_name.is_none());
        assert_eq!(summaries[1].total_power, 0);
    }
}
