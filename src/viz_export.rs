use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::distribution::aggregate_distribution;
use crate::models::{DistributionSummary, InsightRecord, Period};
use crate::pivot::{aggregate_pivot, combine_overwrite};
use crate::radial::layout_radial;
use crate::select::select_top_n;
use crate::treemap::{layout_treemap, TreemapItem};

/// Output bounds for the treemap layout, in the renderer's units.
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

/// Public entry point: push one period's records through every projector and
/// write the renderer-ready JSONs into `out/<period>/`.
pub fn write_all_viz(
    out_dir: &Path,
    period: Period,
    records: &[InsightRecord],
    limit: usize,
    bounds: Bounds,
    baseline: Option<&DistributionSummary>,
) -> Result<()> {
    fs::create_dir_all(out_dir).with_context(|| format!("create {:?}", out_dir))?;

    // 1) Distribution (counts/percentages + trend)
    let distribution = aggregate_distribution(records, baseline);
    write_json(out_dir.join("viz.distribution.json"), &distribution)?;

    // 2) Pivot (time × category matrix for stacked/grouped bars)
    let pivot = aggregate_pivot(records, combine_overwrite);
    write_json(out_dir.join("viz.pivot.json"), &pivot)?;

    // 3) Treemap (top-N categories by weight)
    let totals = category_totals(records);
    let items: Vec<TreemapItem> = select_top_n(totals.clone(), limit, |t| t.1)
        .into_iter()
        .map(|(label, weight, score)| TreemapItem {
            label,
            weight,
            sentiment_score: score,
        })
        .collect();
    let treemap = layout_treemap(&items, bounds.width, bounds.height);
    write_json(out_dir.join("viz.treemap.json"), &treemap)?;

    // 4) Radial (top-N category counts, first-seen order preserved)
    let radial_items: Vec<(String, f32)> = select_top_n(totals, limit, |t| t.1)
        .into_iter()
        .map(|(label, weight, _)| (label, weight))
        .collect();
    let radial = layout_radial(&radial_items);
    write_json(out_dir.join("viz.radial.json"), &radial)?;

    // 5) Per-period index
    let idx = json!({
        "period": period.to_string(),
        "version": 1,
        "counts": {
            "records": records.len(),
            "categories": pivot.categories.len(),
            "timeUnits": pivot.rows.len(),
        },
        "files": [
            "viz.distribution.json",
            "viz.pivot.json",
            "viz.treemap.json",
            "viz.radial.json",
        ]
    });
    write_json(out_dir.join("viz.index.json"), &idx)?;

    Ok(())
}

fn write_json<P: AsRef<Path>, T: ?Sized + Serialize>(path: P, value: &T) -> Result<()> {
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .map(|_| ())
        .map_err(|e| e.into())
}

/// Per-category weight totals and mean sentiment, in first-seen category
/// order (the order the radial chart renders in).
pub fn category_totals(records: &[InsightRecord]) -> Vec<(String, f32, Option<f32>)> {
    let mut order: Vec<String> = Vec::new();
    let mut weights: HashMap<String, f32> = HashMap::new();
    let mut scores: HashMap<String, (f32, u32)> = HashMap::new();

    for r in records {
        if !weights.contains_key(&r.category) {
            order.push(r.category.clone());
        }
        *weights.entry(r.category.clone()).or_insert(0.0) += r.weight.max(0.0);
        if let Some(s) = r.sentiment_score {
            let e = scores.entry(r.category.clone()).or_insert((0.0, 0));
            e.0 += s;
            e.1 += 1;
        }
    }

    order
        .into_iter()
        .map(|cat| {
            let weight = weights.get(&cat).copied().unwrap_or(0.0);
            let score = scores.get(&cat).map(|(sum, n)| sum / *n as f32);
            (cat, weight, score)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn rec(category: &str, time_unit: &str, weight: f32, score: Option<f32>) -> InsightRecord {
        InsightRecord {
            category: category.to_string(),
            time_unit: time_unit.to_string(),
            sentiment_score: score,
            intensity: None,
            weight,
        }
    }

    #[test]
    fn category_totals_keep_first_seen_order() {
        let records = vec![
            rec("fear", "W1", 2.0, Some(0.5)),
            rec("joy", "W1", 1.0, None),
            rec("fear", "W2", 1.0, Some(-0.5)),
        ];
        let totals = category_totals(&records);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].0, "fear");
        assert_eq!(totals[0].1, 3.0);
        assert_eq!(totals[0].2, Some(0.0)); // mean of 0.5 and -0.5
        assert_eq!(totals[1].0, "joy");
        assert_eq!(totals[1].2, None);
    }

    #[test]
    fn writes_all_files_and_index() {
        let nonce = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("journal_vibes_viz_{}", nonce));

        let records = vec![
            rec("joy", "W1", 3.0, Some(0.8)),
            rec("fear", "W1", 1.0, Some(-0.4)),
        ];
        let bounds = Bounds { width: 300.0, height: 200.0 };
        write_all_viz(&dir, Period::Week, &records, 10, bounds, None).unwrap();

        for f in [
            "viz.distribution.json",
            "viz.pivot.json",
            "viz.treemap.json",
            "viz.radial.json",
            "viz.index.json",
        ] {
            assert!(dir.join(f).exists(), "missing {}", f);
        }

        let idx: serde_json::Value =
            serde_json::from_slice(&fs::read(dir.join("viz.index.json")).unwrap()).unwrap();
        assert_eq!(idx["period"], "week");
        assert_eq!(idx["counts"]["records"], 2);
        assert_eq!(idx["counts"]["categories"], 2);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn empty_records_still_write_every_file() {
        let nonce = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("journal_vibes_empty_{}", nonce));

        let bounds = Bounds { width: 100.0, height: 100.0 };
        write_all_viz(&dir, Period::Day, &[], 5, bounds, None).unwrap();
        let radial: serde_json::Value =
            serde_json::from_slice(&fs::read(dir.join("viz.radial.json")).unwrap()).unwrap();
        assert_eq!(radial["max_domain"], 1.0);

        fs::remove_dir_all(&dir).ok();
    }
}
