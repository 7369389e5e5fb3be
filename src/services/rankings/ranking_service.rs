//! 랭킹 서비스
//!
//! 랭킹은 별도 컬렉션 없이 `users.total_power`에서 바로 계산합니다.
//! 순위는 표준 경쟁 방식입니다. 전투력이 같으면 같은 순위를 받고 다음 순위는 건너뜁니다 (1, 1, 3).
//! 같은 순위 안에서는 uid 오름차순으로 정렬합니다.

use std::sync::Arc;
use chrono::Utc;
use singleton_macro::service;
use crate::{
    config::GachaConfig,
    core::errors::AppError,
    domain::{
        dto::rankings::{RankingEntry, RankingResponse, UserRankResponse},
        entities::users::user::User,
    },
    repositories::users::user_repo::UserRepository,
    services::friends::FriendService,
};

/// 전투력 내림차순, uid 오름차순으로 정렬하고 순위를 매깁니다.
pub fn assign_ranks(mut users: Vec<User>) -> Vec<RankingEntry> {
    users.sort_by(|a, b| b.total_power.cmp(&a.total_power).then_with(|| a.id.cmp(&b.id)));

    let mut entries: Vec<RankingEntry> = Vec::with_capacity(users.len());
    for (index, user) in users.into_iter().enumerate() {
        let rank = match entries.last() {
            Some(prev) if prev.total_power == user.total_power => prev.rank,
            _ => index as u64 + 1,
        };

        entries.push(RankingEntry {
            rank,
            user_id: user.id,
            display_name: user.display_name,
            total_power: user.total_power,
        });
    }

    entries
}

/// 요청 limit을 1..=100으로 맞춥니다. 없으면 `RANKING_LIMIT`.
pub fn resolve_limit(requested: Option<i64>) -> u32 {
    match requested {
        Some(limit) => GachaConfig::clamp_ranking_limit(limit.clamp(0, i64::from(u32::MAX)) as u32),
        None => GachaConfig::ranking_limit(),
    }
}

#[service(name = "ranking")]
pub struct RankingService {
    user_repo: Arc<UserRepository>,
    friend_service: Arc<FriendService>,
}

impl RankingService {
    /// 상위 랭킹. `viewer`가 등록된 사용자면 그 순위도 함께 돌려줍니다.
    pub async fn global_ranking(&self, limit: Option<i64>, viewer: Option<&str>) -> Result<RankingResponse, AppError> {
        let limit = resolve_limit(limit);

        let users = self.user_repo
            .top_by_power_cached(limit, GachaConfig::ranking_cache_seconds())
            .await?;

        let me = match viewer {
            Some(user_id) => match self.user_rank(user_id).await {
                Ok(rank) => Some(rank),
                Err(AppError::NotFound(_)) => None,
                Err(e) => return Err(e),
            },
            None => None,
        };

        Ok(RankingResponse {
            entries: assign_ranks(users),
            generated_at: Utc::now(),
            me,
        })
    }

    /// `1 + (나보다 전투력이 높은 사용자 수)`
    pub async fn user_rank(&self, user_id: &str) -> Result<UserRankResponse, AppError> {
        let user = self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", user_id)))?;

        let higher = self.user_repo.count_with_power_greater_than(user.total_power).await?;
        let total_users = self.user_repo.count_all().await?;

        Ok(UserRankResponse {
            user_id: user.id,
            rank: higher + 1,
            total_power: user.total_power,
            total_users,
        })
    }

    /// 나와 수락된 친구들만으로 만든 순위표
    pub async fn friend_ranking(&self, user_id: &str) -> Result<RankingResponse, AppError> {
        let mut ids = self.friend_service.friend_ids(user_id).await?;
        ids.push(user_id.to_string());

        let users = self.user_repo.find_by_ids(&ids).await?;

        Ok(RankingResponse {
            entries: assign_ranks(users),
            generated_at: Utc::now(),
            me: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, power: i64) -> User {
        let mut user = User::new(id.to_string(), id.to_uppercase(), None, 0);
        user.total_power = power;
        user
    }

    #[test]
    fn test_assign_ranks_orders_by_power() {
        let entries = assign_ranks(vec![user("a", 10), user("b", 30), user("c", 20)]);

        let order: Vec<(&str, u64)> = entries.iter().map(|e| (e.user_id.as_str(), e.rank)).collect();
        assert_eq!(order, vec![("b", 1), ("c", 2), ("a", 3)]);
    }

    #[test]
    fn test_assign_ranks_ties_share_rank_and_skip() {
        let entries = assign_ranks(vec![user("d", 5), user("b", 50), user("a", 50), user("c", 10)]);

        let order: Vec<(&str, u64)> = entries.iter().map(|e| (e.user_id.as_str(), e.rank)).collect();
        assert_eq!(order, vec![("a", 1), ("b", 1), ("c", 3), ("d", 4)]);
    }

    #[test]
    fn test_assign_ranks_all_zero() {
        let entries = assign_ranks(vec![user("x", 0), user("y", 0)]);
        assert!(entries.iter().all(|e| e.rank == 1));
        assert!(assign_ranks(Vec::new()).is_empty());
    }

    #[test]
    fn test_resolve_limit_clamps() {
        assert_eq!(resolve_limit(Some(0)), 1);
        assert_eq!(resolve_limit(Some(-20)), 1);
        assert_eq!(resolve_limit(Some(10)), 10);
        assert_eq!(resolve_limit(Some(10_000)), GachaConfig::MAX_RANKING_LIMIT);
    }
}
