use std::collections::BTreeMap;

use crate::classify::classify_trend;
use crate::models::{CategoryShare, DistributionSummary, InsightRecord, Trend};

/// Group records by category, sum weights, and express each group as a
/// percentage of total weight. Percentages are rounded independently per
/// category, so the sum may drift from 100 by up to n-1 points; callers
/// tolerate the drift rather than force-normalizing.
///
/// Trend compares the current top category's share against the same
/// category's share in `baseline` (the previous period's summary). No
/// baseline means a neutral trend, not an error.
pub fn aggregate_distribution(
    records: &[InsightRecord],
    baseline: Option<&DistributionSummary>,
) -> DistributionSummary {
    let mut weights: BTreeMap<&str, f32> = BTreeMap::new();
    for r in records {
        *weights.entry(r.category.as_str()).or_insert(0.0) += r.weight.max(0.0);
    }

    let total: f32 = weights.values().sum();
    if total <= 0.0 {
        // Zero weight: explicit all-zero shares, never a divide-by-zero.
        let percentages = weights
            .into_keys()
            .map(|category| CategoryShare {
                category: category.to_string(),
                percent: 0,
                weight: 0.0,
            })
            .collect();
        return DistributionSummary {
            percentages,
            trend: Trend::neutral("no data"),
        };
    }

    let mut percentages: Vec<CategoryShare> = weights
        .into_iter()
        .map(|(category, weight)| CategoryShare {
            category: category.to_string(),
            percent: (100.0 * weight / total).round() as u32,
            weight,
        })
        .collect();
    // Descending by weight; lexicographic tiebreak keeps the order identical
    // under any permutation of the input.
    percentages.sort_by(|a, b| {
        b.weight
            .partial_cmp(&a.weight)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.category.cmp(&b.category))
    });

    let trend = match baseline {
        Some(prev) => trend_against(&percentages, prev),
        None => Trend::neutral("no baseline"),
    };

    DistributionSummary { percentages, trend }
}

fn trend_against(current: &[CategoryShare], baseline: &DistributionSummary) -> Trend {
    let Some(top) = current.first() else {
        return Trend::neutral("no data");
    };
    let prev_percent = baseline
        .percentages
        .iter()
        .find(|s| s.category == top.category)
        .map(|s| s.percent as f32)
        .unwrap_or(0.0);
    let change = top.percent as f32 - prev_percent;
    let (direction, _color) = classify_trend(change);
    Trend {
        direction,
        magnitude_percent: change.abs(),
        baseline: format!("{} share vs previous period", top.category),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TrendDirection;

    fn rec(category: &str, weight: f32) -> InsightRecord {
        InsightRecord {
            category: category.to_string(),
            time_unit: "W1".to_string(),
            sentiment_score: None,
            intensity: None,
            weight,
        }
    }

    #[test]
    fn percentages_sum_within_rounding_slack() {
        let records = vec![rec("joy", 1.0), rec("fear", 1.0), rec("calm", 1.0)];
        let summary = aggregate_distribution(&records, None);
        let sum: u32 = summary.percentages.iter().map(|s| s.percent).sum();
        // 3 categories: drift of at most 2 points from 100.
        assert!((98..=102).contains(&sum), "sum was {}", sum);
    }

    #[test]
    fn empty_input_yields_neutral_no_data_summary() {
        let summary = aggregate_distribution(&[], None);
        assert!(summary.percentages.is_empty());
        assert_eq!(summary.trend.direction, TrendDirection::Neutral);
        assert_eq!(summary.trend.magnitude_percent, 0.0);
    }

    #[test]
    fn zero_weight_records_yield_zero_shares() {
        let records = vec![rec("joy", 0.0), rec("fear", 0.0)];
        let summary = aggregate_distribution(&records, None);
        assert_eq!(summary.percentages.len(), 2);
        assert!(summary.percentages.iter().all(|s| s.percent == 0));
        assert_eq!(summary.trend.direction, TrendDirection::Neutral);
    }

    #[test]
    fn order_is_invariant_under_permutation() {
        let a = vec![rec("joy", 2.0), rec("fear", 5.0), rec("calm", 2.0)];
        let b = vec![rec("calm", 2.0), rec("joy", 2.0), rec("fear", 5.0)];
        let sa = aggregate_distribution(&a, None);
        let sb = aggregate_distribution(&b, None);
        let order_a: Vec<_> = sa.percentages.iter().map(|s| s.category.clone()).collect();
        let order_b: Vec<_> = sb.percentages.iter().map(|s| s.category.clone()).collect();
        assert_eq!(order_a, order_b);
        assert_eq!(order_a, vec!["fear", "calm", "joy"]);
    }

    #[test]
    fn trend_tracks_top_category_against_baseline() {
        let prev = aggregate_distribution(&[rec("joy", 4.0), rec("fear", 6.0)], None);
        // joy jumps from 40% to 80%.
        let cur = aggregate_distribution(&[rec("joy", 8.0), rec("fear", 2.0)], Some(&prev));
        assert_eq!(cur.trend.direction, TrendDirection::Up);
        assert!((cur.trend.magnitude_percent - 40.0).abs() < 0.01);
    }

    #[test]
    fn small_baseline_change_reads_neutral() {
        let prev = aggregate_distribution(&[rec("joy", 52.0), rec("fear", 48.0)], None);
        let cur = aggregate_distribution(&[rec("joy", 53.0), rec("fear", 47.0)], Some(&prev));
        assert_eq!(cur.trend.direction, TrendDirection::Neutral);
    }
}
