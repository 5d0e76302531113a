use itertools::Itertools;

use crate::models::{DistributionSummary, Period, TrendDirection};

/// Render a projection run as a terminal-friendly markdown digest.
pub fn render_digest_markdown(
    period: Period,
    summary: &DistributionSummary,
    skipped: usize,
) -> String {
    let mut md = String::new();
    md.push_str(&format!("# Journal Vibes — past {}\n\n", period));

    if summary.percentages.is_empty() {
        md.push_str("No data available for this period.\n");
        return md;
    }

    let top_line = summary
        .percentages
        .iter()
        .take(3)
        .map(|s| s.category.as_str())
        .join(", ");
    md.push_str(&format!("Top categories: {}\n\n", top_line));

    md.push_str("## Share of entries\n");
    for share in &summary.percentages {
        md.push_str(&format!("- **{}** — {}%\n", share.category, share.percent));
    }
    md.push('\n');

    let arrow = match summary.trend.direction {
        TrendDirection::Up => "▲ up",
        TrendDirection::Down => "▼ down",
        TrendDirection::Neutral => "◆ steady",
    };
    md.push_str("## Trend\n");
    md.push_str(&format!(
        "{} {:.0}% ({})\n",
        arrow, summary.trend.magnitude_percent, summary.trend.baseline
    ));

    if skipped > 0 {
        md.push_str(&format!(
            "\n_{} malformed records were skipped during normalization._\n",
            skipped
        ));
    }

    md
}
