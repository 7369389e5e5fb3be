//! 가챠 박스 생성/개봉 요청 DTO

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::domain::entities::gacha::loot_box::DropRate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_drop_table"))]
pub struct CreateLootBoxRequest {
    #[validate(length(min = 1, max = 50, message = "박스 이름은 1-50자 사이여야 합니다"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 500, message = "설명은 500자를 넘을 수 없습니다"))]
    pub description: String,

    /// 1회 개봉 비용
    #[validate(range(min = 0, message = "가격은 0 이상이어야 합니다"))]
    pub price: i64,

    #[validate(length(min = 1, message = "드롭 테이블이 비어 있습니다"))]
    pub drop_rates: Vec<DropRate>,

    /// 뽑기 대상 아이템 id. 비우면 전체 카탈로그
    #[serde(default)]
    pub item_ids: Vec<String>,
}

/// 가중치 합이 0이거나 같은 희귀도가 두 번 나오면 거부합니다.
fn validate_drop_table(req: &CreateLootBoxRequest) -> Result<(), ValidationError> {
    if req.drop_rates.iter().all(|rate| rate.weight == 0) {
        return Err(ValidationError::new("zero_weight")
            .with_message("드롭 가중치의 합은 0보다 커야 합니다".into()));
    }

    for (index, rate) in req.drop_rates.iter().enumerate() {
        if req.drop_rates[..index].iter().any(|prev| prev.rarity == rate.rarity) {
            return Err(ValidationError::new("duplicate_rarity")
                .with_message(format!("희귀도 {}가 중복되었습니다", rate.rarity.as_str()).into()));
        }
    }

    Ok(())
}

/// 박스 개봉 요청
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct OpenBoxRequest {
    /// 개봉 횟수 (기본 1)
    #[serde(default)]
    #[validate(range(min = 1, message = "개봉 횟수는 1 이상이어야 합니다"))]
    pub count: Option<u32>,
}

impl OpenBoxRequest {
    pub fn count(&self) -> u32 {
        self.count.unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> CreateLootBoxRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_drop_table_validation() {
        let ok = request(r#"{
            "name": "Starter", "price": 100,
            "drop_rates": [{"rarity": "COMMON", "weight": 90}, {"rarity": "RARE", "weight": 10}]
        }"#);
        assert!(ok.validate().is_ok());

        let zero = request(r#"{
            "name": "Broken", "price": 100,
            "drop_rates": [{"rarity": "COMMON", "weight": 0}]
        }"#);
        assert!(zero.validate().is_err());

        let duplicate = request(r#"{
            "name": "Twice", "price": 100,
            "drop_rates": [{"rarity": "EPIC", "weight": 1}, {"rarity": "EPIC", "weight": 2}]
        }"#);
        assert!(duplicate.validate().is_err());

        let empty = request(r#"{"name": "Empty", "price": 100, "drop_rates": []}"#);
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_open_box_count_defaults_to_one() {
        let req: OpenBoxRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.count(), 1);
        assert!(req.validate().is_ok());

        let req: OpenBoxRequest = serde_json::from_str(r#"{"count": 0}"#).unwrap();
        assert!(req.validate().is_err());
    }
}
