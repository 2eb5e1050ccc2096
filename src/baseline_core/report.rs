//! Report bundle layout and TSV artifact persistence
//!
//! One bundle per invocation, named `<timestamp>_<window>_<monitors>` under
//! the output root. Artifacts are tab-separated and header-less, one row per
//! record; free-text fields are flattened so a record is always one line.

use super::diag::DiagnosticCapture;
use super::error::BaselineError;
use super::store::EventRow;
use super::summary::{HourlyBucket, ZoneSummary};
use chrono::NaiveDateTime;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const EVENTS_FILE: &str = "events.tsv";
pub const HOURLY_FILE: &str = "hourly.tsv";
pub const ZONES_FILE: &str = "zones_summary.tsv";
pub const TOP_EVENTS_FILE: &str = "top_events.tsv";

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct ReportBundle {
    dir: PathBuf,
}

impl ReportBundle {
    pub fn create(
        output_root: &Path,
        generated_at: NaiveDateTime,
        window_label: &str,
        monitor_label: &str,
    ) -> Result<Self, BaselineError> {
        let label = format!(
            "{}_{}_{}",
            generated_at.format("%Y%m%d_%H%M%S"),
            window_label,
            monitor_label
        );
        let dir = output_root.join(label);
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn write_events(&self, rows: &[EventRow]) -> Result<(), BaselineError> {
        self.write_event_artifact(EVENTS_FILE, rows)
    }

    pub fn write_top_events(&self, rows: &[EventRow]) -> Result<(), BaselineError> {
        self.write_event_artifact(TOP_EVENTS_FILE, rows)
    }

    pub fn write_hourly(&self, buckets: &[HourlyBucket]) -> Result<(), BaselineError> {
        let mut w = self.writer(HOURLY_FILE)?;
        for b in buckets {
            writeln!(
                w,
                "{}\t{}\t{}\t{:.2}\t{}\t{}",
                b.monitor_id, b.hour, b.events, b.avg_max_score, b.peak_max_score, b.alarm_frames
            )?;
        }
        w.flush()?;
        Ok(())
    }

    pub fn write_zone_summary(&self, zones: &[ZoneSummary]) -> Result<(), BaselineError> {
        let mut w = self.writer(ZONES_FILE)?;
        for z in zones {
            writeln!(
                w,
                "{}\t{}\t{}\t{:.2}\t{}\t{}\t{:.2}",
                z.monitor_id,
                flatten(&z.zone_name),
                z.triggers,
                z.avg_score,
                z.peak_score,
                z.avg_alarm_pixels,
                z.avg_blobs
            )?;
        }
        w.flush()?;
        Ok(())
    }

    /// Zero-event branch: the bundle holds capture files instead of the four
    /// artifacts.
    pub fn write_diagnostics(&self, captures: &[DiagnosticCapture]) -> Result<(), BaselineError> {
        for capture in captures {
            fs::write(self.dir.join(&capture.name), &capture.contents)?;
        }
        Ok(())
    }

    fn write_event_artifact(&self, name: &str, rows: &[EventRow]) -> Result<(), BaselineError> {
        let mut w = self.writer(name)?;
        for row in rows {
            writeln!(w, "{}", event_line(row))?;
        }
        w.flush()?;
        Ok(())
    }

    fn writer(&self, name: &str) -> Result<BufWriter<File>, BaselineError> {
        Ok(BufWriter::new(File::create(self.dir.join(name))?))
    }
}

fn event_line(row: &EventRow) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{:.2}\t{}\t{}\t{}\t{}\t{}\t{}",
        row.id,
        row.monitor_id,
        row.start_time.format(TIME_FORMAT),
        row.end_time
            .map(|t| t.format(TIME_FORMAT).to_string())
            .unwrap_or_else(|| "NULL".to_string()),
        row.length,
        row.alarm_frames,
        row.avg_score,
        row.max_score,
        row.tot_score,
        flatten(row.cause.as_deref().unwrap_or("")),
        flatten(row.notes.as_deref().unwrap_or("")),
    )
}

/// Replace field-breaking characters so one record stays one TSV line.
fn flatten(text: &str) -> String {
    text.replace(['\t', '\n', '\r'], " ")
}
