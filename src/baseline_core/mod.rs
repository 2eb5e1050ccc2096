//! Baseline Core - Filtered Event Extraction and Aggregation
//!
//! This module provides the pipeline for the baseline export job: it pulls
//! surveillance events from the ZoneMinder store for one time window and one
//! monitor set, aggregates them, and persists a report bundle.
//!
//! # Architecture
//!
//! ```text
//! CLI args → RawArgs → TimeWindow + MonitorFilter
//!     ↓
//! QueryBuilder (one shared predicate, four parameterized statements)
//!     ↓
//! EventStore (single MySQL connection, four sequential fetches)
//!     ↓
//! zero events? → SystemDiagnostics → ReportBundle (diagnostic files)
//!     ↓
//! summary (hourly rollup, zone summary, top events, per-monitor stats)
//!     ↓
//! ReportBundle (TSV artifacts) + console (aligned terminal digest)
//! ```

pub mod args;
pub mod config;
pub mod console;
pub mod diag;
pub mod error;
pub mod filters;
pub mod query;
pub mod report;
pub mod store;
pub mod summary;

pub use args::{RawArgs, USAGE};
pub use config::{ReportLimits, StoreConfig};
pub use diag::{DiagnosticCapture, DiagnosticsProvider, SystemDiagnostics};
pub use error::BaselineError;
pub use filters::{MonitorFilter, TimeWindow, WindowUnit};
pub use query::{QueryBuilder, SqlValue, Statement};
pub use report::ReportBundle;
pub use store::{EventRow, EventStore, HourlyRow, ZoneRow};
pub use summary::{HourlyBucket, MonitorStats, ZoneSummary};
