use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Analyzer self-assessment of its estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Macros {
    pub protein: f64, // grams
    pub carbs: f64,
    pub fat: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLink {
    pub title: String,
    pub url: String,
}

/// One nutrition estimate as returned by the analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub name: String,
    pub calories: f64, // kcal
    pub macros: Macros,
    pub confidence: Confidence,
    pub description: String,
    pub portion_size: String, // e.g. "1 cup", "200g"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_urls: Vec<SourceLink>,
}

/// One saved food event. Mutable only through note edits; deleted
/// individually or by a history reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedMeal {
    pub id: Uuid, // v7, creation-time-ordered
    #[serde(with = "time::serde::rfc3339")]
    pub logged_at: OffsetDateTime,
    pub item: FoodItem,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>, // captured-image reference (data URL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl LoggedMeal {
    pub fn new(item: FoodItem, image_uri: Option<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            logged_at: OffsetDateTime::now_utc(),
            item,
            image_uri,
            note: None,
        }
    }
}
