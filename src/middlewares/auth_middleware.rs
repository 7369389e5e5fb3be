//! Bearer 토큰 인증 미들웨어
//!
//! 스코프 단위로 감싸서 사용합니다. 검증에 성공하면 [`AuthenticatedUser`]가
//! Request Extensions에 들어가고, 핸들러는 인자로 바로 받을 수 있습니다.
//!
//! ```rust,ignore
//! web::scope("/inventory")
//!     .wrap(AuthMiddleware::required())
//!     .route("", web::get().to(get_my_inventory))
//! ```
//!
//! [`AuthenticatedUser`]: crate::domain::auth::authenticated_user::AuthenticatedUser

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::config::ADMIN_ROLE;
use crate::domain::auth::authentication_request::{AuthMode, RequiredRole};
use crate::middlewares::auth_inner::AuthMiddlewareService;

pub struct AuthMiddleware {
    mode: AuthMode,
    /// 접근에 필요한 역할 (선택사항)
    required_role: Option<RequiredRole>,
}

impl AuthMiddleware {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            required_role: None,
        }
    }

    pub fn new_with_role(mode: AuthMode, required_role: RequiredRole) -> Self {
        Self {
            mode,
            required_role: Some(required_role),
        }
    }

    /// 토큰 필수
    pub fn required() -> Self {
        Self::new(AuthMode::Required)
    }

    /// 토큰이 있으면 검증, 없으면 익명으로 통과
    pub fn optional() -> Self {
        Self::new(AuthMode::Optional)
    }

    pub fn required_with_role(role: &str) -> Self {
        Self::new_with_role(
            AuthMode::Required,
            RequiredRole::Single(role.to_string())
        )
    }

    /// 관리자 전용 (아이템/박스 관리, 아이템 지급)
    pub fn admin() -> Self {
        Self::required_with_role(ADMIN_ROLE)
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode.clone(),
            required_role: self.required_role.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::auth::authenticated_user::AuthenticatedUser;
    use super::*;

    fn user_with_roles(roles: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: "uid-1".to_string(),
            email: None,
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn test_required_role_single() {
        let required = RequiredRole::Single("admin".to_string());
        let admin_roles = vec!["admin".to_string(), "user".to_string()];
        let user_roles = vec!["user".to_string()];

        assert!(required.is_satisfied(&admin_roles));
        assert!(!required.is_satisfied(&user_roles));
    }

    #[test]
    fn test_admin_middleware_requires_admin_role() {
        let middleware = AuthMiddleware::admin();

        assert_eq!(middleware.mode, AuthMode::Required);
        match middleware.required_role {
            Some(RequiredRole::Single(ref role)) => assert_eq!(role, ADMIN_ROLE),
            ref other => panic!("unexpected role requirement: {:?}", other),
        }
    }

    #[test]
    fn test_authenticated_user_roles() {
        let admin = user_with_roles(&["user", "admin"]);
        assert!(admin.is_admin());
        assert!(admin.ensure_self_or_admin("someone-else").is_ok());

        let player = user_with_roles(&["user"]);
        assert!(!player.is_admin());
        assert!(player.ensure_self_or_admin("uid-1").is_ok());
        assert!(player.ensure_self_or_admin("uid-2").is_err());
    }
}
