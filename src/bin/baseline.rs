//! Baseline export job - filtered event extraction and aggregation
//!
//! Pulls events from the ZoneMinder store for one time window and one
//! monitor set, writes a report bundle of TSV artifacts, and prints a
//! condensed digest. Zero matching events is not a failure: the run captures
//! process/listener diagnostics into the bundle instead and still exits 0.
//!
//! ## Usage
//!
//! ```bash
//! imouse_baseline --last 6h --monitors 18 --out /var/lib/imouse/reports
//! imouse_baseline --from "2026-02-15 08:00:00" --to "2026-02-15 12:00:00" --monitors 18,19
//! ```
//!
//! ## Environment Variables
//!
//! - ZM_DB_HOST / ZM_DB_USER / ZM_DB_PASS - store credentials (required)
//! - ZM_DB_NAME - store schema (default: zm)
//! - ZM_DB_PORT - store port (default: 3306)
//! - BASELINE_ZONE_ROWS / BASELINE_TOP_EVENTS - artifact caps (default: 200 / 30)
//! - BASELINE_ZONE_PREVIEW / BASELINE_TOP_PREVIEW - terminal previews (default: 15 / 10)
//! - RUST_LOG - logging level (optional, default: info)

use chrono::Local;
use imouse_baseline::baseline_core::{
    console, diag::run_info_capture, summary, BaselineError, DiagnosticsProvider, EventStore,
    MonitorFilter, QueryBuilder, RawArgs, ReportBundle, ReportLimits, StoreConfig,
    SystemDiagnostics, TimeWindow, USAGE,
};
use std::path::PathBuf;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let raw = match RawArgs::parse(&args) {
        Ok(raw) => raw,
        Err(e) => {
            log::error!("❌ {}", e);
            std::process::exit(1);
        }
    };

    if raw.help {
        println!("{}", USAGE);
        return;
    }

    if let Err(e) = run(raw).await {
        log::error!("❌ {}", e);
        std::process::exit(1);
    }
}

async fn run(raw: RawArgs) -> Result<(), BaselineError> {
    // All validation happens before any store access.
    let window = TimeWindow::parse(raw.last.as_deref(), raw.from.as_deref(), raw.to.as_deref())?;
    let monitors = MonitorFilter::parse(raw.monitors.as_deref().unwrap_or("all"))?;
    let output_root = raw
        .output_root
        .unwrap_or_else(|| PathBuf::from("reports"));

    let store_config = StoreConfig::from_env()?;
    let limits = ReportLimits::from_env();

    // One anchor per run; every statement sees the same bounds.
    let now = Local::now().naive_local();
    let window_label = window.label();
    let monitor_label = monitors.label();

    log::info!("🚀 Starting baseline export");
    log::info!("   Window:   {}", window_label);
    log::info!("   Monitors: {}", monitor_label);
    log::info!(
        "   Store:    {}@{}:{}/{}",
        store_config.user,
        store_config.host,
        store_config.port,
        store_config.database
    );

    let builder = QueryBuilder::new(
        &window,
        &monitors,
        now,
        limits.zone_rows,
        limits.top_events,
    );
    let bundle = ReportBundle::create(&output_root, now, &window_label, &monitor_label)?;

    let mut store = EventStore::connect(&store_config).await?;

    let events = store.fetch_events(&builder.event_listing()).await?;
    log::info!("📥 Event listing returned {} rows", events.len());

    if events.is_empty() {
        log::warn!("⚠️  No events matched - capturing diagnostics instead of aggregating");
        store.close().await?;

        let mut captures = SystemDiagnostics.capture();
        captures.push(run_info_capture(now, &window_label, &monitor_label));
        bundle.write_diagnostics(&captures)?;

        println!(
            "{}",
            console::render_header(bundle.dir(), &monitor_label, &window_label, 0)
        );
        println!(
            "No events in the selected window; diagnostics written to {}",
            bundle.dir().display()
        );
        return Ok(());
    }

    let hourly_rows = store.fetch_hourly(&builder.hourly_rollup()).await?;
    let zone_rows = store.fetch_zone_rows(&builder.zone_summary()).await?;
    let top_rows = store.fetch_top_events(&builder.top_events()).await?;
    store.close().await?;

    let hourly = summary::hourly_rollup(&hourly_rows);
    let zones = summary::zone_summary(&zone_rows, limits.zone_rows);
    let top = summary::top_events(&top_rows, limits.top_events);
    let per_monitor = summary::monitor_stats(&events);

    bundle.write_events(&events)?;
    bundle.write_hourly(&hourly)?;
    bundle.write_zone_summary(&zones)?;
    bundle.write_top_events(&top)?;
    log::info!("📝 Wrote 4 artifacts to {}", bundle.dir().display());

    println!(
        "{}",
        console::render_header(bundle.dir(), &monitor_label, &window_label, events.len())
    );
    println!();
    println!("{}", console::render_monitor_table(&per_monitor));
    println!();
    println!(
        "{}",
        console::render_zone_preview(&zones, limits.zone_preview)
    );
    println!();
    println!("{}", console::render_top_preview(&top, limits.top_preview));

    Ok(())
}
