//! 인증된 요청 주체
//!
//! `AuthMiddleware`가 토큰 검증 후 Request Extensions에 넣어 두면,
//! 핸들러에서 `AuthenticatedUser` 인자로 바로 꺼내 쓸 수 있습니다.

use std::future::{ready, Ready};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};
use crate::config::ADMIN_ROLE;
use crate::core::errors::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// 토큰의 `sub` (사용자 uid)
    pub user_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ADMIN_ROLE)
    }

    /// 본인 또는 관리자만 허용
    pub fn ensure_self_or_admin(&self, user_id: &str) -> Result<(), AppError> {
        if self.user_id == user_id || self.is_admin() {
            Ok(())
        } else {
            Err(AppError::AuthorizationError("다른 사용자의 리소스에 접근할 수 없습니다".to_string()))
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "인증되지 않은 요청입니다"
            ))),
        }
    }
}

/// 선택적 인증 주체 (`AuthMiddleware::optional()` 스코프용)
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<AuthenticatedUser>);

impl FromRequest for OptionalUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        ready(Ok(OptionalUser(user)))
    }
}
