use serde::{Deserialize, Serialize};
use validator::Validate;

/// 친구 요청 보내기
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendFriendRequest {
    /// 요청을 받을 사용자 uid
    #[validate(length(min = 1, max = 128, message = "대상 사용자 id가 올바르지 않습니다"))]
    pub addressee_id: String,
}

/// 받은 친구 요청에 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RespondFriendRequest {
    pub accept: bool,
}
