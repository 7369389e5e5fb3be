use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::domain::entities::users::user::User;
use crate::utils::string_utils::to_utc;

/// 사용자 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub display_name: String,
    pub email: Option<String>,

    /// 보유 아이템 전투력 합계
    pub total_power: i64,
    pub coins: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            display_name,
            email,
            total_power,
            coins,
            created_at,
            updated_at,
        } = user;

        Self {
            id,
            display_name,
            email,
            total_power,
            coins,
            created_at: to_utc(created_at),
            updated_at: to_utc(updated_at),
        }
    }
}

/// 전투력 재계산 결과
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TotalPowerResponse {
    pub user_id: String,
    pub total_power: i64,
}
