use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::models::{ClassificationBucket, Intensity, TrendDirection};

pub const GREEN: &str = "#4caf50";
pub const RED: &str = "#f44336";
pub const AMBER: &str = "#ffc107";
pub const YELLOW: &str = "#ffeb3b";
pub const ORANGE: &str = "#ff9800";

pub const POSITIVE: ClassificationBucket = ClassificationBucket { label: "positive", color: GREEN };
pub const NEGATIVE: ClassificationBucket = ClassificationBucket { label: "negative", color: RED };
pub const MIXED: ClassificationBucket = ClassificationBucket { label: "mixed", color: AMBER };
pub const NEUTRAL: ClassificationBucket = ClassificationBucket { label: "neutral", color: YELLOW };

pub const HIGH: ClassificationBucket = ClassificationBucket { label: "high", color: RED };
pub const MEDIUM: ClassificationBucket = ClassificationBucket { label: "medium", color: ORANGE };
pub const LOW: ClassificationBucket = ClassificationBucket { label: "low", color: GREEN };

/// Signed-score band for treemap fill coloring. Intentionally looser than
/// the trend-line band below; the two are tuned independently.
pub const TREEMAP_SCORE_BAND: f32 = 0.2;
/// Signed-score band for trend-line series coloring.
pub const TRENDLINE_SCORE_BAND: f32 = 0.5;
/// A percent change smaller than this reads as noise, not a trend.
pub const TREND_NOISE_BAND: f32 = 5.0;

static SENTIMENT_LABELS: Lazy<HashMap<&'static str, ClassificationBucket>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("positive", POSITIVE);
    m.insert("negative", NEGATIVE);
    m.insert("mixed", MIXED);
    m.insert("neutral", NEUTRAL);
    m
});

/// Map a sentiment label to its bucket. Unknown or empty labels resolve to
/// neutral, never an error.
pub fn classify_sentiment(label: &str) -> ClassificationBucket {
    let key = label.trim().to_lowercase();
    SENTIMENT_LABELS.get(key.as_str()).copied().unwrap_or(NEUTRAL)
}

/// Bucket an intensity score on the service's 1–3 scale. Ties go to the
/// higher bucket (2.5 is high, 1.5 is medium).
pub fn classify_intensity(score: f32) -> ClassificationBucket {
    if score >= 2.5 {
        HIGH
    } else if score >= 1.5 {
        MEDIUM
    } else {
        LOW
    }
}

pub fn classify_intensity_label(intensity: Intensity) -> ClassificationBucket {
    classify_intensity(intensity.score())
}

/// Parse the service's free-text intensity field. Unknown text degrades to
/// the low bucket rather than failing the record.
pub fn parse_intensity(label: &str) -> Intensity {
    match label.trim().to_lowercase().as_str() {
        "high" => Intensity::High,
        "medium" => Intensity::Medium,
        _ => Intensity::Low,
    }
}

/// Classify a percent change as a trend. |change| < 5 is neutral; the band
/// exists so small-sample noise does not read as a false trend. Boundary is
/// inclusive toward non-neutral (exactly ±5 is up/down).
pub fn classify_trend(percent_change: f32) -> (TrendDirection, &'static str) {
    if percent_change.abs() < TREND_NOISE_BAND {
        (TrendDirection::Neutral, YELLOW)
    } else if percent_change > 0.0 {
        (TrendDirection::Up, GREEN)
    } else {
        (TrendDirection::Down, RED)
    }
}

/// Bucket a continuous sentiment score with the given band: above +band is
/// positive, below -band negative, otherwise neutral.
pub fn classify_score(score: f32, band: f32) -> ClassificationBucket {
    if score > band {
        POSITIVE
    } else if score < -band {
        NEGATIVE
    } else {
        NEUTRAL
    }
}
