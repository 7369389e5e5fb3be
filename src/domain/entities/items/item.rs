//! Item Entity Implementation
//!
//! 가챠에서 뽑을 수 있는 아이템 정의와 희귀도입니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 아이템 희귀도
///
/// MongoDB에는 `"COMMON"`, `"LEGENDARY"` 같은 대문자 문자열로 저장됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// 낮은 등급부터 높은 등급 순서
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "COMMON",
            Rarity::Uncommon => "UNCOMMON",
            Rarity::Rare => "RARE",
            Rarity::Epic => "EPIC",
            Rarity::Legendary => "LEGENDARY",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_ascii_uppercase().as_str() {
            "COMMON" => Ok(Rarity::Common),
            "UNCOMMON" => Ok(Rarity::Uncommon),
            "RARE" => Ok(Rarity::Rare),
            "EPIC" => Ok(Rarity::Epic),
            "LEGENDARY" => Ok(Rarity::Legendary),
            other => Err(format!("지원하지 않는 희귀도입니다: {}", other)),
        }
    }

    /// 1(COMMON) ~ 5(LEGENDARY)
    pub fn tier(&self) -> u8 {
        match self {
            Rarity::Common => 1,
            Rarity::Uncommon => 2,
            Rarity::Rare => 3,
            Rarity::Epic => 4,
            Rarity::Legendary => 5,
        }
    }

    /// 한 단계 낮은 희귀도 (COMMON이면 None)
    pub fn lower(&self) -> Option<Rarity> {
        match self {
            Rarity::Common => None,
            Rarity::Uncommon => Some(Rarity::Common),
            Rarity::Rare => Some(Rarity::Uncommon),
            Rarity::Epic => Some(Rarity::Rare),
            Rarity::Legendary => Some(Rarity::Epic),
        }
    }
}

/// 아이템 정의
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// 개당 전투력
    pub power: i64,
    pub rarity: Rarity,
    /// GridFS에 저장된 이미지 id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_id: Option<ObjectId>,
    /// 이미지 공개 URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Item {
    pub fn new(name: String, description: String, power: i64, rarity: Rarity) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            name,
            description,
            power,
            rarity,
            image_id: None,
            image_url: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_from_string() {
        assert_eq!(Rarity::from_str("legendary").unwrap(), Rarity::Legendary);
        assert_eq!(Rarity::from_str(" Rare ").unwrap(), Rarity::Rare);
        assert!(Rarity::from_str("mythic").is_err());
    }

    #[test]
    fn test_rarity_order_and_lower() {
        assert!(Rarity::Common < Rarity::Legendary);
        assert_eq!(Rarity::Epic.lower(), Some(Rarity::Rare));
        assert_eq!(Rarity::Common.lower(), None);

        for pair in Rarity::ALL.windows(2) {
            assert_eq!(pair[1].lower(), Some(pair[0]));
            assert_eq!(pair[0].tier() + 1, pair[1].tier());
        }
    }

    #[test]
    fn test_rarity_serializes_uppercase() {
        let json = serde_json::to_string(&Rarity::Uncommon).unwrap();
        assert_eq!(json, "\"UNCOMMON\"");
        assert_eq!(Rarity::Uncommon.as_str(), "UNCOMMON");
    }
}
