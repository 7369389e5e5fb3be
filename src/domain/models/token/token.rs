use serde::{Deserialize, Serialize};

/// 외부 인증 서비스가 발급한 액세스 토큰의 클레임
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 사용자 uid
    pub sub: String,
    #[serde(default)]
    pub roles: Vec<String>,
    pub iat: i64,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
