use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::classify::{classify_score, TRENDLINE_SCORE_BAND};
use crate::models::{InsightRecord, PivotRow, PivotTable};

/// Per-cell combining function: called with the existing cell value (if the
/// same `(time_unit, category)` pair recurred) and the incoming value.
pub type Combine = fn(Option<f32>, f32) -> f32;

/// Last write wins. Mirrors the overwrite-on-recurrence behavior the chart
/// screens were built against.
pub fn combine_overwrite(_existing: Option<f32>, incoming: f32) -> f32 {
    incoming
}

/// Accumulate: the stacked-bar variant sums weights per cell.
pub fn combine_sum(existing: Option<f32>, incoming: f32) -> f32 {
    existing.unwrap_or(0.0) + incoming
}

/// Running average: the intensity heatmap variant blends recurring cells
/// instead of overwriting them.
pub fn combine_mean(existing: Option<f32>, incoming: f32) -> f32 {
    match existing {
        Some(e) => (e + incoming) / 2.0,
        None => incoming,
    }
}

/// Build a time-unit × category matrix in a single pass. Each record lands
/// in a row keyed by its `time_unit` (rows keep first-seen time order); the
/// cell value is `sentiment_score` when present, else `weight`. After the
/// pass, every known category gets a cell in every row, with 0.0 standing in
/// for missing observations. Series colors come from each category's first
/// observed value, one color per series.
pub fn aggregate_pivot(records: &[InsightRecord], combine: Combine) -> PivotTable {
    let mut rows: Vec<PivotRow> = Vec::new();
    let mut row_index: HashMap<String, usize> = HashMap::new();
    let mut categories: BTreeSet<String> = BTreeSet::new();
    let mut first_values: HashMap<String, f32> = HashMap::new();

    for r in records {
        let value = r.sentiment_score.unwrap_or(r.weight);
        let idx = *row_index.entry(r.time_unit.clone()).or_insert_with(|| {
            rows.push(PivotRow {
                time_unit: r.time_unit.clone(),
                cells: BTreeMap::new(),
            });
            rows.len() - 1
        });
        let existing = rows[idx].cells.get(&r.category).copied();
        rows[idx].cells.insert(r.category.clone(), combine(existing, value));
        categories.insert(r.category.clone());
        first_values.entry(r.category.clone()).or_insert(value);
    }

    let categories: Vec<String> = categories.into_iter().collect();

    // Zero-fill so no (row, category) cell is ever absent.
    for row in &mut rows {
        for cat in &categories {
            row.cells.entry(cat.clone()).or_insert(0.0);
        }
    }

    let series_colors: BTreeMap<String, &'static str> = categories
        .iter()
        .map(|cat| {
            let first = first_values.get(cat).copied().unwrap_or(0.0);
            (cat.clone(), classify_score(first, TRENDLINE_SCORE_BAND).color)
        })
        .collect();

    PivotTable {
        rows,
        categories,
        series_colors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(category: &str, time_unit: &str, score: f32) -> InsightRecord {
        InsightRecord {
            category: category.to_string(),
            time_unit: time_unit.to_string(),
            sentiment_score: Some(score),
            intensity: None,
            weight: 1.0,
        }
    }

    #[test]
    fn builds_zero_filled_matrix_with_sorted_categories() {
        let records = vec![
            rec("joy", "W1", 0.8),
            rec("fear", "W1", 0.3),
            rec("joy", "W2", 0.6),
        ];
        let table = aggregate_pivot(&records, combine_overwrite);

        assert_eq!(table.categories, vec!["fear", "joy"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].time_unit, "W1");
        assert_eq!(table.rows[0].cells["joy"], 0.8);
        assert_eq!(table.rows[0].cells["fear"], 0.3);
        assert_eq!(table.rows[1].time_unit, "W2");
        assert_eq!(table.rows[1].cells["joy"], 0.6);
        // fear never observed in W2: cell is exactly 0, not absent.
        assert_eq!(table.rows[1].cells["fear"], 0.0);
    }

    #[test]
    fn recurring_cell_overwrites_by_default() {
        let records = vec![rec("joy", "W1", 0.2), rec("joy", "W1", 0.9)];
        let table = aggregate_pivot(&records, combine_overwrite);
        assert_eq!(table.rows[0].cells["joy"], 0.9);
    }

    #[test]
    fn sum_combiner_accumulates_weights() {
        let mut a = rec("joy", "W1", 0.0);
        a.sentiment_score = None;
        a.weight = 2.0;
        let mut b = rec("joy", "W1", 0.0);
        b.sentiment_score = None;
        b.weight = 3.0;
        let table = aggregate_pivot(&[a, b], combine_sum);
        assert_eq!(table.rows[0].cells["joy"], 5.0);
    }

    #[test]
    fn mean_combiner_blends_recurring_cells() {
        let records = vec![rec("joy", "W1", 0.4), rec("joy", "W1", 0.8)];
        let table = aggregate_pivot(&records, combine_mean);
        assert!((table.rows[0].cells["joy"] - 0.6).abs() < 1e-6);
    }

    #[test]
    fn category_order_survives_input_permutation() {
        let a = vec![rec("zeal", "W1", 0.1), rec("awe", "W1", 0.2)];
        let b = vec![rec("awe", "W1", 0.2), rec("zeal", "W1", 0.1)];
        let ta = aggregate_pivot(&a, combine_overwrite);
        let tb = aggregate_pivot(&b, combine_overwrite);
        assert_eq!(ta.categories, tb.categories);
        assert_eq!(ta.categories, vec!["awe", "zeal"]);
    }

    #[test]
    fn series_color_comes_from_first_observed_value() {
        let records = vec![rec("joy", "W1", 0.8), rec("joy", "W2", -0.9)];
        let table = aggregate_pivot(&records, combine_overwrite);
        assert_eq!(table.series_colors["joy"], crate::classify::GREEN);
    }

    #[test]
    fn empty_input_is_an_empty_table() {
        let table = aggregate_pivot(&[], combine_overwrite);
        assert!(table.rows.is_empty());
        assert!(table.categories.is_empty());
    }
}
