use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Reporting window recognized by every entry point. Anything else is
/// rejected at the CLI boundary before it reaches the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        };
        f.write_str(s)
    }
}

/// Which family of analytic records the insights service should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Theme,
    Emotion,
    Entity,
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InsightKind::Theme => "theme",
            InsightKind::Emotion => "emotion",
            InsightKind::Entity => "entity",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low,
    Medium,
    High,
}

impl Intensity {
    /// Numeric form on the service's 1–3 scale.
    pub fn score(self) -> f32 {
        match self {
            Intensity::Low => 1.0,
            Intensity::Medium => 2.0,
            Intensity::High => 3.0,
        }
    }
}

/// One analytic observation about a journal entry, already normalized at the
/// service boundary. Immutable; consumed read-only by every projector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightRecord {
    pub category: String,             // theme, emotion, or entity name
    pub time_unit: String,            // bucketed period label, e.g. "2026-W31"
    pub sentiment_score: Option<f32>, // [-1.0, 1.0]
    pub intensity: Option<Intensity>,
    pub weight: f32, // frequency/count, >= 0 after normalization
}

/// Canonical color token plus label. Derived by the classifier, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassificationBucket {
    pub label: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Neutral,
}

#[derive(Debug, Clone, Serialize)]
pub struct Trend {
    pub direction: TrendDirection,
    pub magnitude_percent: f32,
    pub baseline: String, // human-readable description of what was compared
}

impl Trend {
    pub fn neutral(baseline: impl Into<String>) -> Self {
        Trend {
            direction: TrendDirection::Neutral,
            magnitude_percent: 0.0,
            baseline: baseline.into(),
        }
    }
}

/// One row of a pivot table: a time bucket and its per-category cells.
/// Every category known to the table has a cell; missing observations are 0.
#[derive(Debug, Clone, Serialize)]
pub struct PivotRow {
    pub time_unit: String,
    pub cells: BTreeMap<String, f32>,
}

/// Sparse time-unit × category matrix for stacked/grouped bar charts.
/// Rows keep first-seen time order; categories are sorted lexicographically
/// so legends render in a stable order run-to-run.
#[derive(Debug, Clone, Serialize)]
pub struct PivotTable {
    pub rows: Vec<PivotRow>,
    pub categories: Vec<String>,
    pub series_colors: BTreeMap<String, &'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub percent: u32,
    pub weight: f32,
}

/// Percentage breakdown of total weight across categories, plus a scalar
/// trend against a previous-period baseline.
#[derive(Debug, Clone, Serialize)]
pub struct DistributionSummary {
    pub percentages: Vec<CategoryShare>,
    pub trend: Trend,
}

/// A fully laid-out treemap rectangle, ready for direct rendering.
#[derive(Debug, Clone, Serialize)]
pub struct TreemapNode {
    pub label: String,
    pub weight: f32,
    pub fill_color: &'static str,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub font_size: f32,
    pub render_label: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RadialPoint {
    pub label: String,
    pub value: f32,
}

/// Radar-chart series: points in input order plus a shared outer domain.
#[derive(Debug, Clone, Serialize)]
pub struct RadialSeries {
    pub points: Vec<RadialPoint>,
    pub max_domain: f32,
}
