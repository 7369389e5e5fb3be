//! 사용자 등록 요청 DTO
//!
//! uid는 외부 인증 서비스가 발급한 토큰의 `sub`에서 가져오므로 본문에 포함하지 않습니다.

use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::utils::string_utils::deserialize_optional_string;

/// 게임 사용자 등록 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// 표시 이름 (1-30자)
    #[validate(length(
        min = 1,
        max = 30,
        message = "표시 이름은 1-30자 사이여야 합니다"
    ))]
    pub display_name: String,

    /// 연락용 이메일 (선택)
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_request_validation() {
        let valid: CreateUserRequest =
            serde_json::from_str(r#"{"display_name": "Alice", "email": "alice@example.com"}"#).unwrap();
        assert!(valid.validate().is_ok());

        let no_email: CreateUserRequest =
            serde_json::from_str(r#"{"display_name": "Alice", "email": "  "}"#).unwrap();
        assert!(no_email.email.is_none());
        assert!(no_email.validate().is_ok());

        let bad_email: CreateUserRequest =
            serde_json::from_str(r#"{"display_name": "Alice", "email": "nope"}"#).unwrap();
        assert!(bad_email.validate().is_err());

        let empty_name: CreateUserRequest =
            serde_json::from_str(r#"{"display_name": ""}"#).unwrap();
        assert!(empty_name.validate().is_err());
    }
}
