//! Zero-event diagnostics capture
//!
//! When the event listing comes back empty the run records process and
//! listener state into the bundle instead of aggregating. The capture source
//! sits behind a trait so the system commands stay a swappable collaborator.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::process::Command;

/// One capture destined for a file inside the report bundle.
#[derive(Debug, Clone)]
pub struct DiagnosticCapture {
    pub name: String,
    pub contents: String,
}

pub trait DiagnosticsProvider {
    fn capture(&self) -> Vec<DiagnosticCapture>;
}

/// Captures host process and listening-socket state via `ps` and `ss`
/// (falling back to `netstat` on older hosts).
pub struct SystemDiagnostics;

impl DiagnosticsProvider for SystemDiagnostics {
    fn capture(&self) -> Vec<DiagnosticCapture> {
        vec![
            DiagnosticCapture {
                name: "diag_processes.txt".to_string(),
                contents: run_capture("ps", &["axo", "pid,user,etime,comm"]),
            },
            DiagnosticCapture {
                name: "diag_listeners.txt".to_string(),
                contents: listener_state(),
            },
        ]
    }
}

fn run_capture(program: &str, args: &[&str]) -> String {
    match Command::new(program).args(args).output() {
        Ok(out) if out.status.success() => String::from_utf8_lossy(&out.stdout).into_owned(),
        Ok(out) => format!(
            "{} exited with {}: {}",
            program,
            out.status,
            String::from_utf8_lossy(&out.stderr)
        ),
        Err(e) => format!("failed to run {}: {}", program, e),
    }
}

fn listener_state() -> String {
    match Command::new("ss").args(["-ltn"]).output() {
        Ok(out) if out.status.success() => String::from_utf8_lossy(&out.stdout).into_owned(),
        _ => run_capture("netstat", &["-ltn"]),
    }
}

#[derive(Debug, Serialize)]
struct RunInfo<'a> {
    generated_at: String,
    window: &'a str,
    monitors: &'a str,
    events: usize,
}

/// Machine-readable record of the empty run, written alongside the captures.
pub fn run_info_capture(
    generated_at: NaiveDateTime,
    window_label: &str,
    monitor_label: &str,
) -> DiagnosticCapture {
    let info = RunInfo {
        generated_at: generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        window: window_label,
        monitors: monitor_label,
        events: 0,
    };
    DiagnosticCapture {
        name: "run_info.json".to_string(),
        contents: serde_json::to_string_pretty(&info).unwrap_or_default(),
    }
}
