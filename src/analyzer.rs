//! Seam to the external AI analysis service. Everything here is opaque and
//! fallible; call sites convert failures into non-fatal, user-visible
//! outcomes and leave persisted state untouched.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::accounts::Profile;
use crate::meals::FoodItem;

/// A once-per-day motivational message generated from the profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyInsight {
    pub title: String,
    pub message: String,
}

#[async_trait]
pub trait NutritionAnalyzer: Send + Sync {
    async fn analyze_image(&self, image: Bytes) -> anyhow::Result<FoodItem>;
    async fn analyze_query(&self, query: &str) -> anyhow::Result<FoodItem>;
    async fn analyze_recipe(&self, recipe: &str) -> anyhow::Result<FoodItem>;
    async fn suggest_meal_note(&self, item: &FoodItem) -> anyhow::Result<String>;
    async fn generate_daily_insight(&self, profile: &Profile) -> anyhow::Result<DailyInsight>;
}
