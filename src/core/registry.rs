//! # Service Registry
//!
//! `#[service]` / `#[repository]` 매크로가 생성하는 싱글톤 컴포넌트를 보관하고,
//! `Arc<T>` 필드 기반의 의존성 주입을 해결하는 전역 레지스트리입니다.
//!
//! ## 동작 방식
//!
//! ```text
//! 컴파일 타임
//!   #[repository(name = "item", collection = "items")]  → RepositoryRegistration
//!   #[service(name = "power")]                           → ServiceRegistration
//!   inventory::collect!                                  → 전역 목록
//!
//! 런타임
//!   ServiceLocator::set(Arc<Database>)      인프라 컴포넌트 수동 등록
//!   ServiceLocator::set(Arc<RedisClient>)
//!   ServiceLocator::initialize_all()        리포지토리 → 서비스 순서로 생성
//!   PowerService::instance()                캐시된 Arc 반환
//! ```
//!
//! ## 이름 규칙
//!
//! 타입 이름에서 `Repository` / `Service` 접미사를 떼고 소문자로 바꾼 값이
//! 등록 이름과 같아야 합니다. 예를 들어 `UserItemRepository`는 `"useritem"`,
//! `LootBoxRepository`는 `"lootbox"`로 등록합니다.
//!
//! ## 순환 참조
//!
//! 생성 중인 타입을 다시 요청하면 즉시 패닉합니다.
//! 서비스 간 의존성은 항상 단방향이어야 합니다
//! (예: `GachaService → InventoryService → PowerService`).

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use async_trait::async_trait;
use once_cell::sync::Lazy;

/// 비즈니스 로직 서비스 공통 인터페이스
///
/// `#[service]` 매크로가 자동 구현합니다.
#[async_trait]
pub trait Service: Send + Sync {
    /// 레지스트리 등록 이름
    fn name(&self) -> &str;

    /// 생성 직후 1회 호출되는 초기화 훅
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 데이터 액세스 리포지토리 공통 인터페이스
///
/// `#[repository]` 매크로가 자동 구현합니다.
#[async_trait]
pub trait Repository: Send + Sync {
    /// 레지스트리 등록 이름
    fn name(&self) -> &str;

    /// 연결된 MongoDB 컬렉션 이름
    fn collection_name(&self) -> &str;

    /// 인덱스 생성 등 초기화 훅
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// `#[service]` 매크로가 생성하는 등록 정보
pub struct ServiceRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

/// `#[repository]` 매크로가 생성하는 등록 정보
pub struct RepositoryRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

inventory::collect!(ServiceRegistration);
inventory::collect!(RepositoryRegistration);

static SERVICE_NAME_CACHE: Lazy<HashMap<String, &'static ServiceRegistration>> = Lazy::new(|| {
    let cache: HashMap<String, &'static ServiceRegistration> = inventory::iter::<ServiceRegistration>()
        .map(|registration| (normalize_registration_name(registration.name), registration))
        .collect();

    log::debug!("서비스 이름 캐시 구성: {}개", cache.len());
    cache
});

static REPOSITORY_NAME_CACHE: Lazy<HashMap<String, &'static RepositoryRegistration>> = Lazy::new(|| {
    let cache: HashMap<String, &'static RepositoryRegistration> = inventory::iter::<RepositoryRegistration>()
        .map(|registration| (normalize_registration_name(registration.name), registration))
        .collect();

    log::debug!("리포지토리 이름 캐시 구성: {}개", cache.len());
    cache
});

/// 등록 이름에서 `_service` / `_repository` 접미사를 제거합니다.
fn normalize_registration_name(name: &str) -> String {
    name.strip_suffix("_service")
        .or_else(|| name.strip_suffix("_repository"))
        .unwrap_or(name)
        .to_string()
}

/// `crate::services::power::PowerService` → `PowerService`
fn short_type_name(type_name: &str) -> &str {
    type_name.rsplit("::").next().unwrap_or(type_name)
}

/// 타입 이름을 레지스트리 조회 키로 변환합니다.
///
/// `UserItemRepository` → `("useritem", Kind::Repository)`
fn lookup_key(short_name: &str) -> Option<(String, ComponentKind)> {
    if let Some(entity) = short_name.strip_suffix("Repository") {
        return Some((entity.to_lowercase(), ComponentKind::Repository));
    }
    if let Some(entity) = short_name.strip_suffix("Service") {
        return Some((entity.to_lowercase(), ComponentKind::Service));
    }
    None
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ComponentKind {
    Repository,
    Service,
}

/// 전역 싱글톤 컨테이너
pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    initializing: RwLock<HashSet<TypeId>>,
}

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            initializing: RwLock::new(HashSet::new()),
        }
    }

    fn read_instances(&self) -> RwLockReadGuard<'_, HashMap<TypeId, Arc<dyn Any + Send + Sync>>> {
        self.instances.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_instances(&self) -> RwLockWriteGuard<'_, HashMap<TypeId, Arc<dyn Any + Send + Sync>>> {
        self.instances.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_initializing(&self) -> RwLockWriteGuard<'_, HashSet<TypeId>> {
        self.initializing.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// 등록된 인스턴스가 있으면 반환합니다. 생성은 하지 않습니다.
    pub fn try_get<T: 'static + Send + Sync>() -> Option<Arc<T>> {
        LOCATOR
            .read_instances()
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|instance| instance.downcast::<T>().ok())
    }

    /// 타입 `T`의 싱글톤을 반환하고, 없으면 등록 정보로 생성합니다.
    ///
    /// # Panics
    ///
    /// * 순환 의존성이 감지된 경우
    /// * 매크로 등록도, `set()` 등록도 되지 않은 타입인 경우
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        if let Some(instance) = Self::try_get::<T>() {
            return instance;
        }

        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        // 순환 참조 감지: 이미 생성 중인 타입을 다시 요청
        if !LOCATOR.write_initializing().insert(type_id) {
            log::error!("❌ 순환 의존성 감지: {}", type_name);
            panic!("Circular dependency detected: {} is already being initialized", type_name);
        }

        let created = Self::construct::<T>(type_name);
        LOCATOR.write_initializing().remove(&type_id);

        match created {
            Some(instance) => {
                // 생성 도중 다른 경로에서 먼저 등록되었다면 그 인스턴스를 유지
                let mut instances = LOCATOR.write_instances();
                let stored = instances
                    .entry(type_id)
                    .or_insert_with(|| instance.clone() as Arc<dyn Any + Send + Sync>)
                    .clone();
                drop(instances);
                stored.downcast::<T>().unwrap_or(instance)
            }
            None => panic!(
                "Service not found: {}. Register it with #[service] / #[repository] or ServiceLocator::set()",
                type_name
            ),
        }
    }

    fn construct<T: 'static + Send + Sync>(type_name: &str) -> Option<Arc<T>> {
        let (entity, kind) = lookup_key(short_type_name(type_name))?;

        let constructor = match kind {
            ComponentKind::Repository => REPOSITORY_NAME_CACHE.get(&entity).map(|r| r.constructor),
            ComponentKind::Service => SERVICE_NAME_CACHE.get(&entity).map(|r| r.constructor),
        }?;

        match constructor().downcast::<Arc<T>>() {
            Ok(instance) => Some(*instance),
            Err(_) => {
                log::error!("타입 불일치: {} ({:?} '{}')", type_name, kind, entity);
                None
            }
        }
    }

    /// 매크로로 관리되지 않는 인프라 컴포넌트를 직접 등록합니다.
    ///
    /// ```rust,ignore
    /// ServiceLocator::set(Arc::new(Database::new().await?));
    /// ServiceLocator::set(Arc::new(RedisClient::new().await?));
    /// ```
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        log::info!("📦 Registering: {}", short_type_name(std::any::type_name::<T>()));

        LOCATOR
            .write_instances()
            .insert(TypeId::of::<T>(), instance as Arc<dyn Any + Send + Sync>);
    }

    /// 모든 리포지토리와 서비스를 미리 생성합니다.
    ///
    /// 리포지토리를 먼저, 서비스를 나중에 생성합니다.
    pub async fn initialize_all() -> Result<(), Box<dyn std::error::Error>> {
        log::info!("🔄 서비스 레지스트리 초기화 시작");

        let mut repo_count = 0;
        for registration in inventory::iter::<RepositoryRegistration>() {
            let _instance = (registration.constructor)();
            log::debug!("  ✓ repository: {}", registration.name);
            repo_count += 1;
        }

        let mut service_count = 0;
        for registration in inventory::iter::<ServiceRegistration>() {
            let _instance = (registration.constructor)();
            log::debug!("  ✓ service: {}", registration.name);
            service_count += 1;
        }

        log::info!(
            "✅ 레지스트리 초기화 완료: 리포지토리 {}개, 서비스 {}개",
            repo_count,
            service_count
        );

        Ok(())
    }
}

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);

#[cfg(test)]
mod tests {
    use super::*;

    struct ManualComponent {
        value: u32,
    }

    #[test]
    fn test_normalize_registration_name() {
        assert_eq!(normalize_registration_name("power_service"), "power");
        assert_eq!(normalize_registration_name("useritem_repository"), "useritem");
        assert_eq!(normalize_registration_name("gacha"), "gacha");
    }

    #[test]
    fn test_lookup_key_from_type_name() {
        let short = short_type_name("gacha_service_backend::repositories::inventory::UserItemRepository");
        assert_eq!(short, "UserItemRepository");
        assert_eq!(
            lookup_key(short),
            Some(("useritem".to_string(), ComponentKind::Repository))
        );
        assert_eq!(
            lookup_key("RankingService"),
            Some(("ranking".to_string(), ComponentKind::Service))
        );
        assert_eq!(lookup_key("Database"), None);
    }

    #[test]
    fn test_set_then_get_returns_same_instance() {
        ServiceLocator::set(Arc::new(ManualComponent { value: 7 }));

        let first = ServiceLocator::get::<ManualComponent>();
        let second = ServiceLocator::get::<ManualComponent>();

        assert_eq!(first.value, 7);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_try_get_unregistered_is_none() {
        struct NeverRegistered;
        assert!(ServiceLocator::try_get::<NeverRegistered>().is_none());
    }
}
