use anyhow::Result;
use chrono::Local;
use clap::Parser;
use reqwest::Client;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use journal_vibes::controller::ViewSession;
use journal_vibes::distribution::aggregate_distribution;
use journal_vibes::fetch::{fetch_insights_opt, normalize_records};
use journal_vibes::models::{InsightKind, Period};
use journal_vibes::render::render_digest_markdown;
use journal_vibes::viz_export::{write_all_viz, Bounds};

/// Journal Vibes - projects journal insight records into chart-ready JSON
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// User whose journal insights to project
    #[arg(short, long)]
    user: String,

    /// Reporting window
    #[arg(short, long, value_enum, default_value_t = Period::Week)]
    period: Period,

    /// Record family to fetch
    #[arg(short, long, value_enum, default_value_t = InsightKind::Emotion)]
    kind: InsightKind,

    /// Keep only the top N categories (UI offers 5/10/15)
    #[arg(short, long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    limit: u32,

    /// Base URL of the insights service
    #[arg(long, default_value = "https://insights.journalvibes.app")]
    base_url: String,

    /// Treemap bounds as WIDTHxHEIGHT, in renderer units
    #[arg(long, default_value = "360x240", value_parser = parse_bounds)]
    bounds: Bounds,

    /// Output directory for generated files
    #[arg(short, long, default_value = "out")]
    output_dir: String,
}

fn parse_bounds(s: &str) -> Result<Bounds, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {:?}", s))?;
    let width: f32 = w.trim().parse().map_err(|_| format!("bad width {:?}", w))?;
    let height: f32 = h.trim().parse().map_err(|_| format!("bad height {:?}", h))?;
    if width <= 0.0 || height <= 0.0 {
        return Err("bounds must be positive".to_string());
    }
    Ok(Bounds { width, height })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();

    let args = Args::parse();
    let limit = args.limit as usize;

    info!(
        "Starting journal_vibes - user={}, period={}, kind={}, limit={}",
        args.user, args.period, args.kind, limit
    );

    let run_start = std::time::Instant::now();
    let client = Client::builder().build()?;

    // One view session per run; the ticket guards against a stale response
    // being applied if parameters change under a long-lived process.
    let session = ViewSession::new();
    let ticket = session.begin(args.period, limit);

    // 1) fetch current period + previous period (trend baseline)
    let fetch_start = std::time::Instant::now();
    let current = fetch_insights_opt(&client, &args.base_url, &args.user, args.period, args.kind, limit, 0).await?;
    let previous = fetch_insights_opt(&client, &args.base_url, &args.user, args.period, args.kind, limit, 1).await?;
    debug!("Fetch completed in {:.2}s", fetch_start.elapsed().as_secs_f32());

    // 2) normalize at the service boundary
    let (records, skipped) = match &current {
        Some(resp) => normalize_records(&resp.records),
        None => {
            warn!("No insights for this period - user={}, period={}", args.user, args.period);
            (Vec::new(), 0)
        }
    };
    let baseline = previous.as_ref().map(|resp| {
        let (base_records, base_skipped) = normalize_records(&resp.records);
        if base_skipped > 0 {
            debug!("Baseline period skipped {} malformed records", base_skipped);
        }
        aggregate_distribution(&base_records, None)
    });

    // 3) stale-response guard before anything touches view state
    let Some(records) = session.apply(&ticket, records) else {
        info!("Response superseded by a newer request; dropping");
        return Ok(());
    };

    // 4) project + export
    let today = Local::now().date_naive();
    let out_dir = PathBuf::from(&args.output_dir).join(format!("{}-{}", today, args.period));
    write_all_viz(&out_dir, args.period, &records, limit, args.bounds, baseline.as_ref())?;
    info!("Wrote viz bundle - dir={:?}, records={}", out_dir, records.len());

    // 5) terminal digest
    let summary = aggregate_distribution(&records, baseline.as_ref());
    let digest = render_digest_markdown(args.period, &summary, skipped);
    std::fs::write(out_dir.join("digest.md"), &digest)?;
    println!("{}", digest);

    info!("Run completed in {:.2}s", run_start.elapsed().as_secs_f32());
    Ok(())
}
