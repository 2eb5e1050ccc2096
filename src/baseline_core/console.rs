//! Column-aligned terminal digest
//!
//! Renders from the same in-memory rows the report writer persists, so the
//! console view and the artifacts cannot diverge. Display-only: nothing here
//! reorders or mutates the data.

use super::store::EventRow;
use super::summary::{MonitorStats, ZoneSummary};
use std::path::Path;

pub fn render_header(
    bundle_dir: &Path,
    monitor_label: &str,
    window_label: &str,
    total_events: usize,
) -> String {
    format!(
        "=== Baseline Summary ===\n\
         Bundle:   {}\n\
         Monitors: {}\n\
         Window:   {}\n\
         Events:   {}",
        bundle_dir.display(),
        monitor_label,
        window_label,
        total_events
    )
}

pub fn render_monitor_table(stats: &[MonitorStats]) -> String {
    let rows: Vec<Vec<String>> = stats
        .iter()
        .map(|s| {
            vec![
                s.monitor_id.to_string(),
                s.events.to_string(),
                format!("{:.2}", s.avg_max_score),
                s.peak_max_score.to_string(),
                format!("{:.2}", s.avg_alarm_frames),
            ]
        })
        .collect();

    render_table(
        "Per-monitor totals",
        &["Monitor", "Events", "AvgMax", "PeakMax", "AvgAlarmFrames"],
        &rows,
    )
}

pub fn render_zone_preview(zones: &[ZoneSummary], limit: usize) -> String {
    let rows: Vec<Vec<String>> = zones
        .iter()
        .take(limit)
        .map(|z| {
            vec![
                z.monitor_id.to_string(),
                z.zone_name.clone(),
                z.triggers.to_string(),
                format!("{:.2}", z.avg_score),
                z.peak_score.to_string(),
                z.avg_alarm_pixels.to_string(),
                format!("{:.2}", z.avg_blobs),
            ]
        })
        .collect();

    render_table(
        "Top zones by trigger count",
        &[
            "Monitor", "Zone", "Count", "AvgScore", "PeakScore", "AvgPixels", "AvgBlobs",
        ],
        &rows,
    )
}

pub fn render_top_preview(events: &[EventRow], limit: usize) -> String {
    let rows: Vec<Vec<String>> = events
        .iter()
        .take(limit)
        .map(|e| {
            vec![
                e.id.to_string(),
                e.monitor_id.to_string(),
                e.start_time.format("%Y-%m-%d %H:%M:%S").to_string(),
                e.max_score.to_string(),
                e.alarm_frames.to_string(),
                e.cause.as_deref().unwrap_or("-").to_string(),
            ]
        })
        .collect();

    render_table(
        "Top events by max score",
        &["Id", "Monitor", "Start", "MaxScore", "AlarmFrames", "Cause"],
        &rows,
    )
}

fn render_table(title: &str, headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    out.push_str(&format_row(headers.iter().map(|h| h.to_string()), &widths));
    out.push('\n');
    out.push_str(&format_row(widths.iter().map(|w| "-".repeat(*w)), &widths));
    for row in rows {
        out.push('\n');
        out.push_str(&format_row(row.iter().cloned(), &widths));
    }
    if rows.is_empty() {
        out.push_str("\n(no rows)");
    }
    out
}

fn format_row(cells: impl Iterator<Item = String>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths.iter())
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    padded.join("  ").trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use std::path::PathBuf;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_header_contents() {
        let header = render_header(
            &PathBuf::from("/tmp/reports/20260215_120000_last_6h_m_18"),
            "m_18",
            "last_6h",
            42,
        );

        assert!(header.contains("20260215_120000_last_6h_m_18"));
        assert!(header.contains("Monitors: m_18"));
        assert!(header.contains("Window:   last_6h"));
        assert!(header.contains("Events:   42"));
    }

    #[test]
    fn test_monitor_table_alignment() {
        let stats = vec![
            MonitorStats {
                monitor_id: 18,
                events: 1234,
                avg_max_score: 15.5,
                peak_max_score: 90,
                avg_alarm_frames: 4.25,
            },
            MonitorStats {
                monitor_id: 9,
                events: 7,
                avg_max_score: 3.0,
                peak_max_score: 5,
                avg_alarm_frames: 1.0,
            },
        ];

        let table = render_monitor_table(&stats);
        let lines: Vec<&str> = table.lines().collect();

        // Header, separator, one line per monitor.
        assert_eq!(lines.len(), 4);
        let events_col = lines[1].find("Events").unwrap();
        assert_eq!(&lines[2][events_col..events_col + 4], "1234");
        assert_eq!(&lines[3][events_col..events_col + 1], "7");
    }

    #[test]
    fn test_zone_preview_respects_limit() {
        let zones: Vec<ZoneSummary> = (0..20)
            .map(|i| ZoneSummary {
                monitor_id: 18,
                zone_name: format!("Zone{}", i),
                triggers: 20 - i,
                avg_score: 10.0,
                peak_score: 50,
                avg_alarm_pixels: 100,
                avg_blobs: 1.0,
            })
            .collect();

        let preview = render_zone_preview(&zones, 15);

        // Title + header + separator + 15 rows.
        assert_eq!(preview.lines().count(), 18);
        assert!(preview.contains("Zone0"));
        assert!(preview.contains("Zone14"));
        assert!(!preview.contains("Zone15"));
    }

    #[test]
    fn test_top_preview_respects_limit_and_order() {
        let events: Vec<EventRow> = (0..12)
            .map(|i| EventRow {
                id: i,
                monitor_id: 18,
                start_time: ts("2026-02-15 08:30:00"),
                end_time: None,
                length: 10.0,
                alarm_frames: 5,
                avg_score: 10,
                max_score: 100 - i,
                tot_score: 100,
                cause: None,
                notes: None,
            })
            .collect();

        let preview = render_top_preview(&events, 10);

        assert_eq!(preview.lines().count(), 13);
        let body: Vec<&str> = preview.lines().skip(3).collect();
        assert!(body[0].starts_with('0'));
        assert!(preview.contains("\n9 "));
        assert!(!preview.contains("\n10 "));
        assert!(!preview.contains("\n11 "));
    }

    #[test]
    fn test_empty_table_placeholder() {
        let table = render_monitor_table(&[]);
        assert!(table.contains("(no rows)"));
    }
}
