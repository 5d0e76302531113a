use serde::{Deserialize, Serialize};

/// Raw response envelope from the insights service. Field names mirror the
/// API's camelCase payload; nothing here is trusted past the normalization
/// step in `fetch`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiInsightResponse {
    pub period: String, // "day" | "week" | "month" | "year" (echoed back)
    #[serde(default)]
    pub records: Vec<ApiInsightRecord>,
}

/// One raw analytic row. Every field is optional: the service has shipped
/// rows missing weights, scores, even category names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiInsightRecord {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, rename = "timeUnit")]
    pub time_unit: Option<String>,
    #[serde(default, rename = "sentimentScore")]
    pub sentiment_score: Option<f32>,
    #[serde(default)]
    pub intensity: Option<String>, // "low" | "medium" | "high" (free text)
    #[serde(default)]
    pub weight: Option<f32>,
}
