use crate::models::{RadialPoint, RadialSeries};

/// Project labeled counts onto a radar-chart domain. Points keep input order
/// (radial charts compare adjacent categories, so reordering changes the
/// picture); the outer ring sits at max value + 1 so the largest point never
/// clips it. Empty input still yields a usable domain of 1.
pub fn layout_radial(items: &[(String, f32)]) -> RadialSeries {
    let max = items
        .iter()
        .map(|(_, v)| *v)
        .fold(0.0f32, f32::max);
    let points = items
        .iter()
        .map(|(label, value)| RadialPoint {
            label: label.clone(),
            value: *value,
        })
        .collect();
    RadialSeries {
        points,
        max_domain: max + 1.0,
    }
}
