use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{debug, warn};

use crate::api_types::{ApiInsightRecord, ApiInsightResponse};
use crate::classify::parse_intensity;
use crate::models::{InsightKind, InsightRecord, Period};

/// Fetch one batch of raw insight records; Ok(None) on 404 (the service has
/// no data for that user/period yet).
pub async fn fetch_insights_opt(
    client: &Client,
    base_url: &str,
    user_id: &str,
    period: Period,
    kind: InsightKind,
    limit: usize,
    periods_back: usize,
) -> Result<Option<ApiInsightResponse>> {
    let url = format!(
        "{}/api/insights/{}/{}/{}.json?limit={}&offset={}",
        base_url.trim_end_matches('/'),
        user_id,
        period,
        kind,
        limit,
        periods_back
    );
    debug!(
        "Fetching insights - user={}, period={}, kind={}, offset={}",
        user_id, period, kind, periods_back
    );

    let resp = client
        .get(&url)
        .send()
        .await
        .with_context(|| format!("Request failed for {}", url))?;

    if resp.status() == reqwest::StatusCode::NOT_FOUND {
        warn!("No insights found (404) - user={}, period={}", user_id, period);
        return Ok(None);
    }

    let resp = resp
        .error_for_status()
        .with_context(|| format!("HTTP error for {}", url))?;

    let body: ApiInsightResponse = resp
        .json()
        .await
        .with_context(|| format!("Decoding JSON for {}", url))?;

    debug!("Fetched {} raw records", body.records.len());
    Ok(Some(body))
}

/// Normalize raw service rows into canonical records. Rows missing a
/// `category` or a usable `weight` are dropped, not fatal; the skip count
/// comes back for observability. Negative or non-finite weights clamp to 0
/// and sentiment scores clamp to [-1, 1], so everything past this boundary
/// satisfies the engine's invariants.
pub fn normalize_records(raw: &[ApiInsightRecord]) -> (Vec<InsightRecord>, usize) {
    let mut records = Vec::with_capacity(raw.len());
    let mut skipped = 0usize;

    for row in raw {
        let Some(category) = row.category.as_deref().map(str::trim).filter(|c| !c.is_empty())
        else {
            skipped += 1;
            continue;
        };
        let Some(weight) = row.weight else {
            skipped += 1;
            continue;
        };
        let weight = if weight.is_finite() { weight.max(0.0) } else { 0.0 };

        let sentiment_score = row
            .sentiment_score
            .filter(|s| s.is_finite())
            .map(|s| s.clamp(-1.0, 1.0));

        records.push(InsightRecord {
            category: category.to_string(),
            time_unit: row.time_unit.clone().unwrap_or_default(),
            sentiment_score,
            intensity: row.intensity.as_deref().map(parse_intensity),
            weight,
        });
    }

    if skipped > 0 {
        warn!("Skipped {} malformed insight records during normalization", skipped);
    }
    (records, skipped)
}
