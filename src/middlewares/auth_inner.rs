//! AuthMiddleware가 감싼 실제 서비스
//!
//! 요청마다 Authorization 헤더를 검증하고, 모드/역할에 따라 통과시키거나 401/403으로 끊습니다.

use std::rc::Rc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage, HttpResponse};
use futures_util::future::LocalBoxFuture;
use crate::core::AppError;
use crate::domain::auth::authenticated_user::AuthenticatedUser;
use crate::domain::auth::authentication_request::{AuthMode, RequiredRole};
use crate::services::auth::TokenService;

pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub mode: AuthMode,
    pub required_role: Option<RequiredRole>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let mode = self.mode.clone();
        let required_role = self.required_role.clone();

        Box::pin(async move {
            let token_service = TokenService::instance();

            let auth_result = authenticate_request(&req, &token_service);

            match (&mode, auth_result) {
                (AuthMode::Required, Err(err)) => {
                    log::warn!("인증 실패: {} {} - {}", req.method(), req.path(), err);
                    let response = HttpResponse::Unauthorized()
                        .json(serde_json::json!({
                            "error": "authentication_required",
                            "message": "유효한 인증 토큰이 필요합니다"
                        }));
                    return Ok(reject(req, response));
                },
                (AuthMode::Required, Ok(user)) => {
                    if let Some(ref required) = required_role {
                        if !required.is_satisfied(&user.roles) {
                            log::warn!("권한 부족: 사용자 {} ({:?}), 필요 권한: {:?}",
                                user.user_id, user.roles, required);
                            let response = HttpResponse::Forbidden()
                                .json(serde_json::json!({
                                    "error": "insufficient_permissions",
                                    "message": "접근 권한이 부족합니다"
                                }));
                            return Ok(reject(req, response));
                        }
                    }

                    log::debug!("인증 성공: 사용자 {}", user.user_id);
                    req.extensions_mut().insert(user);
                },
                (AuthMode::Optional, Ok(user)) => {
                    let allowed = required_role
                        .as_ref()
                        .map_or(true, |required| required.is_satisfied(&user.roles));

                    if allowed {
                        log::debug!("선택적 인증 성공: 사용자 {}", user.user_id);
                        req.extensions_mut().insert(user);
                    } else {
                        log::debug!("선택적 인증: 권한 부족, 익명으로 진행");
                    }
                },
                (AuthMode::Optional, Err(_)) => {
                    log::debug!("선택적 인증: 토큰 없음, 요청 진행");
                },
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

fn reject<B>(req: ServiceRequest, response: HttpResponse) -> ServiceResponse<EitherBody<B>> {
    let (req, _) = req.into_parts();
    ServiceResponse::new(req, response).map_into_right_body()
}

fn authenticate_request(
    req: &ServiceRequest,
    token_service: &TokenService,
) -> Result<AuthenticatedUser, AppError> {
    let auth_header = req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("Authorization 헤더가 없습니다".to_string()))?;

    let token = token_service.extract_bearer_token(auth_header)?;

    token_service.authenticate(token)
}
