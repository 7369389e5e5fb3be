use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::utils::string_utils::{deserialize_optional_string, is_hex_color};

/// 프로필 부분 수정 요청
///
/// 빠진 필드는 그대로 둡니다. `showcase_item_ids`를 보내면 목록 전체를 교체합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(min = 1, max = 30, message = "표시 이름은 1-30자 사이여야 합니다"))]
    pub display_name: Option<String>,

    #[serde(default)]
    #[validate(length(max = 200, message = "소개는 200자를 넘을 수 없습니다"))]
    pub bio: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 30, message = "칭호는 30자를 넘을 수 없습니다"))]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(custom(function = "validate_accent_color"))]
    pub accent_color: Option<String>,

    #[serde(default)]
    #[validate(length(max = 6, message = "전시 아이템은 최대 6개입니다"))]
    pub showcase_item_ids: Option<Vec<String>>,
}

fn validate_accent_color(color: &str) -> Result<(), ValidationError> {
    if !is_hex_color(color) {
        return Err(ValidationError::new("invalid_color")
            .with_message("색상은 #RGB 또는 #RRGGBB 형식이어야 합니다".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::profiles::profile::UserProfile;

    #[test]
    fn test_update_profile_validation() {
        let req: UpdateProfileRequest = serde_json::from_str(
            r##"{"bio": "hello", "accent_color": "#ff8800", "showcase_item_ids": []}"##
        ).unwrap();
        assert!(req.validate().is_ok());

        let req: UpdateProfileRequest =
            serde_json::from_str(r#"{"accent_color": "orange"}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_profile_limits_showcase() {
        let ids: Vec<String> = (0..7).map(|i| format!("{:024x}", i)).collect();
        let req = UpdateProfileRequest {
            showcase_item_ids: Some(ids),
            ..Default::default()
        };
        assert!(req.validate().is_err());
        assert_eq!(UserProfile::MAX_SHOWCASE_ITEMS, 6);
    }
}
