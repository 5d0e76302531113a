use crate::classify::{classify_score, TREEMAP_SCORE_BAND};
use crate::models::TreemapNode;

/// One weighted, labeled input to the layout. `sentiment_score` drives fill
/// color through the ±0.2 treemap band (looser than the trend-line band on
/// purpose; the two are tuned independently).
#[derive(Debug, Clone)]
pub struct TreemapItem {
    pub label: String,
    pub weight: f32,
    pub sentiment_score: Option<f32>,
}

const MIN_FONT: f32 = 8.0;
const MAX_FONT: f32 = 16.0;
const NARROW_ASPECT: f32 = 0.5;
const NARROW_SHRINK: f32 = 0.8;
/// Rectangles at or below this width cannot hold readable text.
const LABEL_MIN_WIDTH: f32 = 35.0;

#[derive(Debug, Clone, Copy)]
struct Rect {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
}

/// Squarified treemap layout: partitions `width` × `height` into rectangles
/// whose areas are proportional to item weights, greedily packing rows along
/// the shorter side so rectangles stay close to square. The emitted nodes
/// exactly cover the bounds (no gaps, no overlaps) for any weight skew.
///
/// Items are laid out largest-first with a lexicographic tiebreak, so the
/// result is identical for any permutation of the input. Zero-weight items
/// still appear in the output as zero-area, label-suppressed nodes; an input
/// whose total weight is zero yields an empty list.
pub fn layout_treemap(items: &[TreemapItem], width: f32, height: f32) -> Vec<TreemapNode> {
    let total: f32 = items.iter().map(|i| i.weight.max(0.0)).sum();
    if items.is_empty() || total <= 0.0 || width <= 0.0 || height <= 0.0 {
        return Vec::new();
    }

    let mut ordered: Vec<&TreemapItem> = items.iter().collect();
    ordered.sort_by(|a, b| {
        b.weight
            .partial_cmp(&a.weight)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.label.cmp(&b.label))
    });

    let scale = (width * height) / total;
    let positive: Vec<&TreemapItem> = ordered.iter().copied().filter(|i| i.weight > 0.0).collect();
    let areas: Vec<f32> = positive.iter().map(|i| i.weight * scale).collect();

    let mut rects: Vec<Rect> = Vec::with_capacity(positive.len());
    squarify(&areas, Rect { x: 0.0, y: 0.0, w: width, h: height }, &mut rects);

    let mut out: Vec<TreemapNode> = positive
        .iter()
        .copied()
        .zip(rects.iter())
        .map(|(item, r)| node_for(item, *r))
        .collect();

    // Zero-weight items keep label-list parity with the caller's input.
    for item in ordered.iter().copied().filter(|i| i.weight <= 0.0) {
        out.push(node_for(item, Rect { x: 0.0, y: 0.0, w: 0.0, h: 0.0 }));
    }

    out
}

fn node_for(item: &TreemapItem, r: Rect) -> TreemapNode {
    TreemapNode {
        label: item.label.clone(),
        weight: item.weight,
        fill_color: classify_score(item.sentiment_score.unwrap_or(0.0), TREEMAP_SCORE_BAND).color,
        x: r.x,
        y: r.y,
        width: r.w,
        height: r.h,
        font_size: font_size_for(r.w, r.h),
        render_label: r.w > LABEL_MIN_WIDTH,
    }
}

/// Adaptive label sizing: a fifth of the shorter side, shrunk for tall
/// narrow cells, clamped to [8, 16].
fn font_size_for(w: f32, h: f32) -> f32 {
    let mut size = w.min(h) / 5.0;
    if h > 0.0 && w / h < NARROW_ASPECT {
        size *= NARROW_SHRINK;
    }
    size.clamp(MIN_FONT, MAX_FONT)
}

/// Greedy squarified tiling. Rows are packed along the shorter side of the
/// remaining rectangle; an item joins the current row only while it does not
/// worsen the row's worst aspect ratio.
fn squarify(areas: &[f32], mut rect: Rect, out: &mut Vec<Rect>) {
    let mut row: Vec<f32> = Vec::new();
    for &area in areas {
        let side = rect.w.min(rect.h);
        if row.is_empty() || worst_with(&row, Some(area), side) <= worst_with(&row, None, side) {
            row.push(area);
        } else {
            layout_row(&row, &mut rect, out);
            row.clear();
            row.push(area);
        }
    }
    if !row.is_empty() {
        layout_row(&row, &mut rect, out);
    }
}

/// Worst (largest) aspect ratio of the row laid along a side of length
/// `side`, optionally with one more area appended.
fn worst_with(row: &[f32], extra: Option<f32>, side: f32) -> f32 {
    let sum: f32 = row.iter().sum::<f32>() + extra.unwrap_or(0.0);
    if sum <= 0.0 || side <= 0.0 {
        return f32::INFINITY;
    }
    let thickness = sum / side;
    let mut worst = 0.0f32;
    let consider = |area: f32, worst: &mut f32| {
        if area <= 0.0 {
            return;
        }
        let len = area / thickness;
        let ratio = (len / thickness).max(thickness / len);
        if ratio > *worst {
            *worst = ratio;
        }
    };
    for &a in row {
        consider(a, &mut worst);
    }
    if let Some(a) = extra {
        consider(a, &mut worst);
    }
    worst
}

/// Lay one row as a strip along the shorter side and shrink the remaining
/// rectangle by the strip's thickness.
fn layout_row(row: &[f32], rect: &mut Rect, out: &mut Vec<Rect>) {
    let sum: f32 = row.iter().sum();
    if sum <= 0.0 {
        return;
    }
    if rect.w >= rect.h {
        // Vertical strip on the left edge, items stacked top to bottom.
        let thickness = sum / rect.h;
        let mut y = rect.y;
        for &area in row {
            let len = area / thickness;
            out.push(Rect { x: rect.x, y, w: thickness, h: len });
            y += len;
        }
        rect.x += thickness;
        rect.w -= thickness;
    } else {
        // Horizontal strip along the top edge, items left to right.
        let thickness = sum / rect.w;
        let mut x = rect.x;
        for &area in row {
            let len = area / thickness;
            out.push(Rect { x, y: rect.y, w: len, h: thickness });
            x += len;
        }
        rect.y += thickness;
        rect.h -= thickness;
    }
}
