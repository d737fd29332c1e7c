//! Optimization recommendation domain models.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// A single optimization recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(alias = "resourceType")]
    pub resource_type: String,
    #[serde(alias = "resourceId")]
    pub resource_id: String,
    #[serde(alias = "currentConfig")]
    pub current_config: String,
    #[serde(alias = "recommendedConfig")]
    pub recommended_config: String,
    #[serde(alias = "potentialSavings", alias = "estimated_savings")]
    pub potential_savings: f64,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub status: String,
}

impl Recommendation {
    pub fn is_applied(&self) -> bool {
        self.status.eq_ignore_ascii_case("applied")
    }
}

/// Sum of potential savings over a collection.
pub fn total_potential_savings(items: &[Recommendation]) -> f64 {
    items.iter().map(|r| r.potential_savings).sum()
}

/// Savings forecast derived from the open recommendations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavingsForecast {
    pub total_potential_savings: f64,
    pub recommendations_count: u32,
    #[serde(default)]
    pub breakdown_by_service: BTreeMap<String, f64>,
    #[serde(default)]
    pub implementation_timeline: BTreeMap<String, f64>,
}

/// Accepts both `"id": "r-1"` and `"id": 7`.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_camel_case_numeric_id() {
        let json = r#"{
            "id": 7,
            "resourceType": "EC2",
            "resourceId": "i-123",
            "currentConfig": "m5.xlarge",
            "recommendedConfig": "m5.large",
            "potentialSavings": 120.5,
            "priority": "High",
            "status": "Pending"
        }"#;
        let rec: Recommendation = serde_json::from_str(json).unwrap();
        assert_eq!(rec.id, "7");
        assert_eq!(rec.recommended_config, "m5.large");
        assert!(!rec.is_applied());
    }

    #[test]
    fn test_decode_snake_case_string_id() {
        let json = r#"{
            "id": "rec-1",
            "resource_type": "RDS",
            "resource_id": "db-1",
            "current_config": "db.r5.2xlarge",
            "recommended_config": "db.r5.xlarge",
            "potential_savings": 300,
            "status": "Applied"
        }"#;
        let rec: Recommendation = serde_json::from_str(json).unwrap();
        assert_eq!(rec.id, "rec-1");
        assert!(rec.priority.is_empty());
        assert!(rec.is_applied());
        assert_eq!(total_potential_savings(&[rec.clone(), rec]), 600.0);
    }
}
