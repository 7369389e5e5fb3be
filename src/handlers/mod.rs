//! # HTTP Handlers
//!
//! 핸들러는 요청을 검증하고 서비스 싱글톤(`XxxService::instance()`)을 호출한 뒤
//! 결과를 JSON으로 돌려줍니다. 에러는 `AppError`의 `ResponseError` 구현이 상태 코드로 바꿉니다.
//!
//! 인증이 필요한 핸들러는 `AuthenticatedUser`를 인자로 받습니다. 스코프 단위 인증은
//! `routes`에서, 엔드포인트 단위 인증은 라우트 매크로의 `wrap` 인자로 지정합니다.

pub mod users;
pub mod items;
pub mod inventory;
pub mod gacha;
pub mod friends;
pub mod rankings;
pub mod profiles;
pub mod images;
