//! Multi-level aggregation over the four row sets
//!
//! Rounding and ordering here are contract, not presentation: report
//! consumers diff these columns across runs, so 2-decimal score averages,
//! integer pixel averages, and the exact tie-breaks must stay stable.

use super::store::{EventRow, HourlyRow, ZoneRow};
use std::collections::BTreeMap;

/// Round half away from zero to two decimals.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourlyBucket {
    pub monitor_id: i64,
    pub hour: String,
    pub events: i64,
    pub avg_max_score: f64,
    pub peak_max_score: i64,
    pub alarm_frames: i64,
}

/// Hourly rollup ordered by hour descending, then monitor ascending. The
/// hour bucket is a fixed-width timestamp string, so lexical order is
/// chronological order.
pub fn hourly_rollup(rows: &[HourlyRow]) -> Vec<HourlyBucket> {
    let mut buckets: Vec<HourlyBucket> = rows
        .iter()
        .map(|r| HourlyBucket {
            monitor_id: r.monitor_id,
            hour: r.hour.clone(),
            events: r.events,
            avg_max_score: round2(r.avg_max_score),
            peak_max_score: r.peak_max_score,
            alarm_frames: r.alarm_frames,
        })
        .collect();

    buckets.sort_by(|a, b| b.hour.cmp(&a.hour).then(a.monitor_id.cmp(&b.monitor_id)));
    buckets
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZoneSummary {
    pub monitor_id: i64,
    pub zone_name: String,
    pub triggers: i64,
    pub avg_score: f64,
    pub peak_score: i64,
    pub avg_alarm_pixels: i64,
    pub avg_blobs: f64,
}

/// Zone trigger summary ordered by trigger count descending, peak score
/// descending, capped at `cap` rows.
pub fn zone_summary(rows: &[ZoneRow], cap: usize) -> Vec<ZoneSummary> {
    let mut zones: Vec<ZoneSummary> = rows
        .iter()
        .map(|r| ZoneSummary {
            monitor_id: r.monitor_id,
            zone_name: r.zone_name.clone(),
            triggers: r.triggers,
            avg_score: round2(r.avg_score),
            peak_score: r.peak_score,
            avg_alarm_pixels: r.avg_alarm_pixels.round() as i64,
            avg_blobs: round2(r.avg_blobs),
        })
        .collect();

    zones.sort_by(|a, b| {
        b.triggers
            .cmp(&a.triggers)
            .then(b.peak_score.cmp(&a.peak_score))
    });
    zones.truncate(cap);
    zones
}

/// Top events ordered by max-score descending, alarm-frames descending,
/// capped at `cap` rows.
pub fn top_events(rows: &[EventRow], cap: usize) -> Vec<EventRow> {
    let mut events = rows.to_vec();
    events.sort_by(|a, b| {
        b.max_score
            .cmp(&a.max_score)
            .then(b.alarm_frames.cmp(&a.alarm_frames))
    });
    events.truncate(cap);
    events
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonitorStats {
    pub monitor_id: i64,
    pub events: i64,
    pub avg_max_score: f64,
    pub peak_max_score: i64,
    pub avg_alarm_frames: f64,
}

/// Per-monitor totals over the event listing, for the terminal digest.
/// Ordered by monitor id ascending.
pub fn monitor_stats(events: &[EventRow]) -> Vec<MonitorStats> {
    let mut acc: BTreeMap<i64, (i64, i64, i64, i64)> = BTreeMap::new();

    for event in events {
        let entry = acc.entry(event.monitor_id).or_insert((0, 0, 0, 0));
        entry.0 += 1;
        entry.1 += event.max_score;
        entry.2 = entry.2.max(event.max_score);
        entry.3 += event.alarm_frames;
    }

    acc.into_iter()
        .map(
            |(monitor_id, (count, sum_max, peak_max, sum_alarm))| MonitorStats {
                monitor_id,
                events: count,
                avg_max_score: round2(sum_max as f64 / count as f64),
                peak_max_score: peak_max,
                avg_alarm_frames: round2(sum_alarm as f64 / count as f64),
            },
        )
        .collect()
}
