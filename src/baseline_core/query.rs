//! Parameterized statement construction for the four baseline queries
//!
//! The time/monitor predicate is built exactly once per run and shared by
//! all four statements. Every runtime value travels as a bound parameter;
//! nothing from the invocation is ever spliced into SQL text.

use super::filters::{MonitorFilter, TimeWindow};
use chrono::NaiveDateTime;

/// A value bound to a statement placeholder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SqlValue {
    Int(i64),
    DateTime(NaiveDateTime),
}

/// One executable statement: SQL text plus its bound values in placeholder
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

/// The shared WHERE clause over the `Events` table (aliased `E` everywhere).
#[derive(Debug, Clone)]
struct Predicate {
    clause: String,
    params: Vec<SqlValue>,
}

impl Predicate {
    fn build(window: &TimeWindow, monitors: &MonitorFilter, now: NaiveDateTime) -> Self {
        let mut clause = String::from("E.StartTime >= ?");
        let mut params = vec![SqlValue::DateTime(window.start_bound(now))];

        if let Some(end) = window.end_bound() {
            clause.push_str(" AND E.StartTime <= ?");
            params.push(SqlValue::DateTime(end));
        }

        if let MonitorFilter::Ids(ids) = monitors {
            let placeholders = vec!["?"; ids.len()].join(", ");
            clause.push_str(&format!(" AND E.MonitorId IN ({})", placeholders));
            params.extend(ids.iter().map(|id| SqlValue::Int(*id as i64)));
        }

        Self { clause, params }
    }
}

// Integer columns are CAST to SIGNED and decimal aggregates to DOUBLE so row
// decoding stays on plain i64/f64.
const EVENT_COLUMNS: &str = "E.Id AS id, E.MonitorId AS monitor_id, \
     E.StartTime AS start_time, E.EndTime AS end_time, \
     CAST(E.Length AS DOUBLE) AS length, \
     CAST(E.AlarmFrames AS SIGNED) AS alarm_frames, \
     CAST(E.AvgScore AS SIGNED) AS avg_score, \
     CAST(E.MaxScore AS SIGNED) AS max_score, \
     CAST(E.TotScore AS SIGNED) AS tot_score, \
     E.Cause AS cause, E.Notes AS notes";

pub struct QueryBuilder {
    predicate: Predicate,
    zone_rows: usize,
    top_events: usize,
}

impl QueryBuilder {
    /// `now` is the anchor captured once at run start; all four statements
    /// see the same bound.
    pub fn new(
        window: &TimeWindow,
        monitors: &MonitorFilter,
        now: NaiveDateTime,
        zone_rows: usize,
        top_events: usize,
    ) -> Self {
        Self {
            predicate: Predicate::build(window, monitors, now),
            zone_rows,
            top_events,
        }
    }

    /// Full event listing, most recent first.
    pub fn event_listing(&self) -> Statement {
        Statement {
            sql: format!(
                "SELECT {} FROM Events E WHERE {} ORDER BY E.StartTime DESC",
                EVENT_COLUMNS, self.predicate.clause
            ),
            params: self.predicate.params.clone(),
        }
    }

    /// Per-monitor, per-hour rollup of event counts and scores.
    pub fn hourly_rollup(&self) -> Statement {
        Statement {
            sql: format!(
                "SELECT E.MonitorId AS monitor_id, \
                 DATE_FORMAT(E.StartTime, '%Y-%m-%d %H:00:00') AS hour, \
                 CAST(COUNT(*) AS SIGNED) AS events, \
                 CAST(AVG(E.MaxScore) AS DOUBLE) AS avg_max_score, \
                 CAST(MAX(E.MaxScore) AS SIGNED) AS peak_max_score, \
                 CAST(SUM(E.AlarmFrames) AS SIGNED) AS alarm_frames \
                 FROM Events E WHERE {} \
                 GROUP BY E.MonitorId, hour \
                 ORDER BY hour DESC, E.MonitorId ASC",
                self.predicate.clause
            ),
            params: self.predicate.params.clone(),
        }
    }

    /// Zone trigger summary over Stats joined through Events, capped at the
    /// zone-row limit (bound, not inlined).
    pub fn zone_summary(&self) -> Statement {
        let mut params = self.predicate.params.clone();
        params.push(SqlValue::Int(self.zone_rows as i64));
        Statement {
            sql: format!(
                "SELECT E.MonitorId AS monitor_id, Z.Name AS zone_name, \
                 CAST(COUNT(*) AS SIGNED) AS triggers, \
                 CAST(AVG(S.Score) AS DOUBLE) AS avg_score, \
                 CAST(MAX(S.Score) AS SIGNED) AS peak_score, \
                 CAST(AVG(S.AlarmPixels) AS DOUBLE) AS avg_alarm_pixels, \
                 CAST(AVG(S.Blobs) AS DOUBLE) AS avg_blobs \
                 FROM Stats S \
                 JOIN Events E ON S.EventId = E.Id \
                 JOIN Zones Z ON S.ZoneId = Z.Id \
                 WHERE {} \
                 GROUP BY E.MonitorId, Z.Name \
                 ORDER BY triggers DESC, peak_score DESC \
                 LIMIT ?",
                self.predicate.clause
            ),
            params,
        }
    }

    /// Highest-scoring events, capped at the top-event limit (bound).
    pub fn top_events(&self) -> Statement {
        let mut params = self.predicate.params.clone();
        params.push(SqlValue::Int(self.top_events as i64));
        Statement {
            sql: format!(
                "SELECT {} FROM Events E WHERE {} \
                 ORDER BY E.MaxScore DESC, E.AlarmFrames DESC \
                 LIMIT ?",
                EVENT_COLUMNS, self.predicate.clause
            ),
            params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline_core::filters::WindowUnit;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn builder(window: TimeWindow, monitors: MonitorFilter) -> QueryBuilder {
        QueryBuilder::new(&window, &monitors, ts("2026-02-15 12:00:00"), 200, 30)
    }

    #[test]
    fn test_relative_window_restricts_start_only() {
        let b = builder(
            TimeWindow::Relative {
                magnitude: 6,
                unit: WindowUnit::Hour,
            },
            MonitorFilter::Ids(vec![18]),
        );
        let stmt = b.event_listing();

        assert!(stmt.sql.contains("E.StartTime >= ?"));
        assert!(!stmt.sql.contains("E.StartTime <= ?"));
        assert_eq!(
            stmt.params,
            vec![
                SqlValue::DateTime(ts("2026-02-15 06:00:00")),
                SqlValue::Int(18),
            ]
        );
    }

    #[test]
    fn test_explicit_window_binds_both_ends() {
        let b = builder(
            TimeWindow::Explicit {
                start: ts("2026-02-15 08:00:00"),
                end: ts("2026-02-15 12:00:00"),
            },
            MonitorFilter::Ids(vec![18, 19]),
        );
        let stmt = b.event_listing();

        assert!(stmt.sql.contains("E.StartTime >= ? AND E.StartTime <= ?"));
        assert!(stmt.sql.contains("E.MonitorId IN (?, ?)"));
        assert_eq!(
            stmt.params,
            vec![
                SqlValue::DateTime(ts("2026-02-15 08:00:00")),
                SqlValue::DateTime(ts("2026-02-15 12:00:00")),
                SqlValue::Int(18),
                SqlValue::Int(19),
            ]
        );
    }

    #[test]
    fn test_all_monitors_imposes_no_device_clause() {
        let b = builder(
            TimeWindow::Relative {
                magnitude: 2,
                unit: WindowUnit::Day,
            },
            MonitorFilter::All,
        );
        let stmt = b.event_listing();

        assert!(!stmt.sql.contains("MonitorId IN"));
        assert_eq!(stmt.params.len(), 1);
    }

    #[test]
    fn test_all_statements_share_one_predicate() {
        let b = builder(
            TimeWindow::Relative {
                magnitude: 6,
                unit: WindowUnit::Hour,
            },
            MonitorFilter::Ids(vec![18, 19]),
        );

        let predicate = "E.StartTime >= ? AND E.MonitorId IN (?, ?)";
        let statements = [
            b.event_listing(),
            b.hourly_rollup(),
            b.zone_summary(),
            b.top_events(),
        ];
        for stmt in &statements {
            assert!(
                stmt.sql.contains(predicate),
                "predicate missing from: {}",
                stmt.sql
            );
            assert_eq!(&stmt.params[..3], &b.event_listing().params[..]);
        }
    }

    #[test]
    fn test_caps_are_bound_parameters() {
        let b = builder(
            TimeWindow::Relative {
                magnitude: 1,
                unit: WindowUnit::Hour,
            },
            MonitorFilter::All,
        );

        let zones = b.zone_summary();
        assert!(zones.sql.ends_with("LIMIT ?"));
        assert_eq!(zones.params.last(), Some(&SqlValue::Int(200)));

        let top = b.top_events();
        assert!(top.sql.ends_with("LIMIT ?"));
        assert_eq!(top.params.last(), Some(&SqlValue::Int(30)));
    }

    #[test]
    fn test_no_values_interpolated_into_sql() {
        let b = builder(
            TimeWindow::Explicit {
                start: ts("2026-02-15 08:00:00"),
                end: ts("2026-02-15 12:00:00"),
            },
            MonitorFilter::Ids(vec![18]),
        );

        for stmt in [
            b.event_listing(),
            b.hourly_rollup(),
            b.zone_summary(),
            b.top_events(),
        ] {
            assert!(!stmt.sql.contains("2026"), "literal leaked: {}", stmt.sql);
            assert!(!stmt.sql.contains("18"), "literal leaked: {}", stmt.sql);
        }
    }

    #[test]
    fn test_ordering_contract_in_sql() {
        let b = builder(
            TimeWindow::Relative {
                magnitude: 6,
                unit: WindowUnit::Hour,
            },
            MonitorFilter::All,
        );

        assert!(b
            .event_listing()
            .sql
            .contains("ORDER BY E.StartTime DESC"));
        assert!(b
            .hourly_rollup()
            .sql
            .contains("ORDER BY hour DESC, E.MonitorId ASC"));
        assert!(b
            .zone_summary()
            .sql
            .contains("ORDER BY triggers DESC, peak_score DESC"));
        assert!(b
            .top_events()
            .sql
            .contains("ORDER BY E.MaxScore DESC, E.AlarmFrames DESC"));
    }
}
