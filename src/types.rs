use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One news card as served to the front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub summary: String,
    pub source: String,
    pub region: String,
    pub url: String,
    pub timestamp: DateTime<Utc>,
}

/// Activity quantities entered by the user.
///
/// Fields left empty in the form arrive as absent JSON keys and
/// deserialize to zero; values are sanitized again before use.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ActivityInput {
    #[serde(default)]
    pub car_km: f64,
    #[serde(default)]
    pub flight_hours: f64,
    #[serde(default)]
    pub electricity_kwh: f64,
    #[serde(default)]
    pub meat_meals: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Car,
    Flight,
    Electricity,
    Meat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateResponse {
    pub total_kg: f64,
    pub annual_tonnes: f64,
    pub advice: Vec<String>,
}

/// Scenario-selector variant: a single category plus one value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScenarioRequest {
    pub category: Category,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Bot,
}

/// One transcript entry. Display-only, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub transcript: Vec<ChatTurn>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    pub transcript: Vec<ChatTurn>,
}
