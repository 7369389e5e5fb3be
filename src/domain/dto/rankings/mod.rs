//! 랭킹 DTO
//!
//! 랭킹은 `users.total_power`에서 계산한 읽기 전용 투영입니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 순위표의 한 줄
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    /// 1부터 시작, 동점은 같은 순위
    pub rank: u64,
    pub user_id: String,
    pub display_name: String,
    pub total_power: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingResponse {
    pub entries: Vec<RankingEntry>,
    pub generated_at: DateTime<Utc>,
    /// 로그인한 조회자의 순위 (전역 랭킹에서만)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub me: Option<UserRankResponse>,
}

/// 내 순위
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRankResponse {
    pub user_id: String,
    pub rank: u64,
    pub total_power: i64,
    pub total_users: u64,
}

/// `GET /rankings?limit=20`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RankingQuery {
    pub limit: Option<i64>,
}
