//! 아이템 생성/수정 요청 DTO
//!
//! 아이템 정의는 관리자만 변경할 수 있습니다. 전투력이 바뀌면 소유자들의
//! 총 전투력이 다시 계산됩니다.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::domain::entities::items::item::Rarity;
use crate::utils::string_utils::deserialize_optional_string;

/// 아이템 생성 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateItemRequest {
    #[validate(length(min = 1, max = 50, message = "아이템 이름은 1-50자 사이여야 합니다"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 500, message = "설명은 500자를 넘을 수 없습니다"))]
    pub description: String,

    /// 개당 전투력 (0 이상)
    #[validate(range(min = 0, message = "전투력은 0 이상이어야 합니다"))]
    pub power: i64,

    pub rarity: Rarity,
}

/// 아이템 수정 요청
///
/// 보낸 필드만 변경합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_has_changes"))]
pub struct UpdateItemRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(min = 1, max = 50, message = "아이템 이름은 1-50자 사이여야 합니다"))]
    pub name: Option<String>,

    #[serde(default)]
    #[validate(length(max = 500, message = "설명은 500자를 넘을 수 없습니다"))]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0, message = "전투력은 0 이상이어야 합니다"))]
    pub power: Option<i64>,

    #[serde(default)]
    pub rarity: Option<Rarity>,
}

fn validate_has_changes(req: &UpdateItemRequest) -> Result<(), ValidationError> {
    if req.name.is_none() && req.description.is_none() && req.power.is_none() && req.rarity.is_none() {
        return Err(ValidationError::new("empty_update")
            .with_message("변경할 필드가 없습니다".into()));
    }
    Ok(())
}

/// `GET /items?rarity=EPIC`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemListQuery {
    pub rarity: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_item_rejects_negative_power() {
        let req: CreateItemRequest = serde_json::from_str(
            r#"{"name": "Flame Sword", "power": -1, "rarity": "EPIC"}"#
        ).unwrap();
        assert!(req.validate().is_err());

        let req: CreateItemRequest = serde_json::from_str(
            r#"{"name": "Flame Sword", "power": 120, "rarity": "EPIC"}"#
        ).unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.rarity, Rarity::Epic);
        assert!(req.description.is_empty());
    }

    #[test]
    fn test_update_item_requires_some_field() {
        assert!(UpdateItemRequest::default().validate().is_err());

        let req = UpdateItemRequest {
            power: Some(10),
            ..Default::default()
        };
        assert!(req.validate().is_ok());
    }
}
