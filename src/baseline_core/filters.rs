//! Time window and monitor filter validation
//!
//! Produces the canonical filter values and the filesystem-safe labels used
//! in the report bundle directory name. Parsing is pure; no store access
//! happens here.

use super::error::BaselineError;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowUnit {
    Minute,
    Hour,
    Day,
}

impl WindowUnit {
    pub fn suffix(&self) -> char {
        match self {
            WindowUnit::Minute => 'm',
            WindowUnit::Hour => 'h',
            WindowUnit::Day => 'd',
        }
    }

    fn from_suffix(c: char) -> Option<Self> {
        match c {
            'm' => Some(WindowUnit::Minute),
            'h' => Some(WindowUnit::Hour),
            'd' => Some(WindowUnit::Day),
            _ => None,
        }
    }
}

/// The run's time restriction: a relative duration anchored to "now", or an
/// explicit closed interval.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeWindow {
    Relative { magnitude: u32, unit: WindowUnit },
    Explicit { start: NaiveDateTime, end: NaiveDateTime },
}

impl TimeWindow {
    /// Resolve the window from raw invocation values.
    ///
    /// Exactly one of {relative duration} / {explicit pair} may be supplied;
    /// neither defaults to the last 24 hours.
    pub fn parse(
        last: Option<&str>,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Self, BaselineError> {
        match (last, from, to) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(BaselineError::Validation(
                "supply either --last or --from/--to, not both".to_string(),
            )),
            (Some(spec), None, None) => Self::parse_relative(spec),
            (None, Some(from), Some(to)) => {
                let start = parse_timestamp(from)?;
                let end = parse_timestamp(to)?;
                if start > end {
                    return Err(BaselineError::Validation(format!(
                        "window start {} is after end {}",
                        from, to
                    )));
                }
                Ok(TimeWindow::Explicit { start, end })
            }
            (None, Some(_), None) => Err(BaselineError::Validation(
                "--from requires --to".to_string(),
            )),
            (None, None, Some(_)) => Err(BaselineError::Validation(
                "--to requires --from".to_string(),
            )),
            (None, None, None) => Ok(TimeWindow::Relative {
                magnitude: 24,
                unit: WindowUnit::Hour,
            }),
        }
    }

    /// Relative durations must match `^[0-9]+[mhd]$` with a positive
    /// magnitude.
    fn parse_relative(spec: &str) -> Result<Self, BaselineError> {
        let spec = spec.trim();
        let unit = spec
            .chars()
            .last()
            .and_then(WindowUnit::from_suffix)
            .ok_or_else(|| {
                BaselineError::Validation(format!("bad duration '{}' (expected N[mhd])", spec))
            })?;

        let digits = &spec[..spec.len() - 1];
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(BaselineError::Validation(format!(
                "bad duration '{}' (expected N[mhd])",
                spec
            )));
        }

        let magnitude: u32 = digits.parse().map_err(|_| {
            BaselineError::Validation(format!("duration magnitude out of range: {}", spec))
        })?;
        if magnitude == 0 {
            return Err(BaselineError::Validation(format!(
                "duration magnitude must be positive: {}",
                spec
            )));
        }

        Ok(TimeWindow::Relative { magnitude, unit })
    }

    /// Inclusive lower bound of the window given the anchor captured at run
    /// start.
    pub fn start_bound(&self, now: NaiveDateTime) -> NaiveDateTime {
        match self {
            TimeWindow::Relative { magnitude, unit } => {
                let span = match unit {
                    WindowUnit::Minute => Duration::minutes(*magnitude as i64),
                    WindowUnit::Hour => Duration::hours(*magnitude as i64),
                    WindowUnit::Day => Duration::days(*magnitude as i64),
                };
                now - span
            }
            TimeWindow::Explicit { start, .. } => *start,
        }
    }

    /// Inclusive upper bound; a relative window is open-ended at "now".
    pub fn end_bound(&self) -> Option<NaiveDateTime> {
        match self {
            TimeWindow::Relative { .. } => None,
            TimeWindow::Explicit { end, .. } => Some(*end),
        }
    }

    pub fn label(&self) -> String {
        match self {
            TimeWindow::Relative { magnitude, unit } => {
                format!("last_{}{}", magnitude, unit.suffix())
            }
            TimeWindow::Explicit { start, end } => format!(
                "{}-{}",
                start.format("%Y%m%dT%H%M%S"),
                end.format("%Y%m%dT%H%M%S")
            ),
        }
    }
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime, BaselineError> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN))
        })
        .map_err(|_| BaselineError::Validation(format!("unrecognized timestamp: {}", value)))
}

/// The run's monitor restriction: unrestricted, or an explicit id set.
#[derive(Debug, Clone, PartialEq)]
pub enum MonitorFilter {
    All,
    Ids(Vec<u32>),
}

impl MonitorFilter {
    /// `"all"` (case-insensitive) is unrestricted; anything else must match
    /// `^[0-9]+(,[0-9]+)*$` after whitespace removal. The strict pattern
    /// keeps every value a plain integer before it ever reaches a predicate.
    pub fn parse(spec: &str) -> Result<Self, BaselineError> {
        let cleaned: String = spec.chars().filter(|c| !c.is_whitespace()).collect();

        if cleaned.eq_ignore_ascii_case("all") {
            return Ok(MonitorFilter::All);
        }
        if cleaned.is_empty() {
            return Err(BaselineError::Validation(
                "empty monitor list".to_string(),
            ));
        }

        let mut ids = Vec::new();
        for part in cleaned.split(',') {
            if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
                return Err(BaselineError::Validation(format!(
                    "bad monitor list '{}' (expected 'all' or comma-separated ids)",
                    spec
                )));
            }
            let id: u32 = part.parse().map_err(|_| {
                BaselineError::Validation(format!("monitor id out of range: {}", part))
            })?;
            if id == 0 {
                return Err(BaselineError::Validation(
                    "monitor ids must be positive".to_string(),
                ));
            }
            ids.push(id);
        }

        Ok(MonitorFilter::Ids(ids))
    }

    pub fn label(&self) -> String {
        match self {
            MonitorFilter::All => "m_all".to_string(),
            MonitorFilter::Ids(ids) => {
                let parts: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
                format!("m_{}", parts.join("_"))
            }
        }
    }
}
