//! 문자열/식별자 처리 유틸리티
//!
//! 요청 DTO 정리, ObjectId 파싱, BSON 시간 변환을 담당합니다.

use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use crate::core::errors::AppError;

/// 앞뒤 공백을 제거하고, 비어 있으면 ValidationError를 반환합니다.
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(
            format!("{}은(는) 필수입니다", field_name)
        ));
    }
    Ok(trimmed.to_string())
}

/// 공백 문자열은 None으로 취급합니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// `#[serde(deserialize_with = "...")]`용 선택 문자열 정리
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// 24자리 16진수 문자열을 ObjectId로 변환합니다.
pub fn parse_object_id(id: &str, field_name: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id.trim())
        .map_err(|_| AppError::ValidationError(format!("유효하지 않은 {} 형식입니다: {}", field_name, id)))
}

/// 여러 id를 한 번에 변환합니다. 하나라도 잘못되면 실패합니다.
pub fn parse_object_ids(ids: &[String], field_name: &str) -> Result<Vec<ObjectId>, AppError> {
    ids.iter().map(|id| parse_object_id(id, field_name)).collect()
}

/// BSON 시간을 JSON 응답용 chrono 시간으로 변환합니다.
pub fn to_utc(value: BsonDateTime) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(value.timestamp_millis()).unwrap_or_default()
}

/// `#RGB` 또는 `#RRGGBB` 형식인지 확인합니다.
pub fn is_hex_color(value: &str) -> bool {
    let Some(hex) = value.strip_prefix('#') else {
        return false;
    };

    matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_string() {
        assert_eq!(validate_required_string("  Sword  ", "name").unwrap(), "Sword");
        assert!(validate_required_string("", "name").is_err());
        assert!(validate_required_string("\t\n", "name").is_err());
    }

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some("  bio ".to_string())), Some("bio".to_string()));
        assert_eq!(clean_optional_string(Some("   ".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_deserialize_optional_string() {
        #[derive(Deserialize)]
        struct TestStruct {
            #[serde(default, deserialize_with = "deserialize_optional_string")]
            title: Option<String>,
        }

        let result: TestStruct = serde_json::from_str(r#"{"title": "  Collector  "}"#).unwrap();
        assert_eq!(result.title, Some("Collector".to_string()));

        let result: TestStruct = serde_json::from_str(r#"{"title": "   "}"#).unwrap();
        assert_eq!(result.title, None);

        let result: TestStruct = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(result.title, None);
    }

    #[test]
    fn test_parse_object_id() {
        let id = ObjectId::new();
        assert_eq!(parse_object_id(&id.to_hex(), "item_id").unwrap(), id);
        assert!(matches!(
            parse_object_id("not-an-id", "item_id"),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_parse_object_ids_fails_on_any_invalid() {
        let ids = vec![ObjectId::new().to_hex(), "bad".to_string()];
        assert!(parse_object_ids(&ids, "item_id").is_err());
    }

    #[test]
    fn test_to_utc_keeps_millis() {
        let bson_time = BsonDateTime::from_millis(1_700_000_000_123);
        assert_eq!(to_utc(bson_time).timestamp_millis(), 1_700_000_000_123);
    }

    #[test]
    fn test_is_hex_color() {
        assert!(is_hex_color("#fff"));
        assert!(is_hex_color("#12AbEf"));
        assert!(!is_hex_color("12abef"));
        assert!(!is_hex_color("#12abeg"));
        assert!(!is_hex_color("#1234"));
    }
}
