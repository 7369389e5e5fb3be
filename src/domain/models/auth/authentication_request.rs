//! 미들웨어 인증 모드와 역할 요구사항

#[derive(Debug, Clone, PartialEq)]
pub enum AuthMode {
    /// 토큰이 없거나 유효하지 않으면 401
    Required,
    /// 토큰이 있으면 검증하고, 없으면 익명으로 진행
    Optional,
}

#[derive(Debug, Clone)]
pub enum RequiredRole {
    Single(String),
}

impl RequiredRole {
    pub fn is_satisfied(&self, user_roles: &[String]) -> bool {
        match self {
            RequiredRole::Single(required_role) => user_roles.contains(required_role),
        }
    }
}
