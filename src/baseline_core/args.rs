//! Invocation argument parsing
//!
//! Raw flags only; window and monitor semantics live in `filters`.

use super::error::BaselineError;
use std::path::PathBuf;

pub const USAGE: &str = "\
imouse_baseline - export a filtered event baseline from the ZoneMinder store

USAGE:
    imouse_baseline [OPTIONS]

OPTIONS:
    --last <N[mhd]>      Relative window anchored to now (e.g. 45m, 6h, 2d)
    --from <TIMESTAMP>   Explicit window start (YYYY-MM-DD [HH:MM:SS])
    --to <TIMESTAMP>     Explicit window end   (YYYY-MM-DD [HH:MM:SS])
    --monitors <SPEC>    'all' or comma-separated monitor ids (default: all)
    --out <DIR>          Output root for report bundles (default: reports)
    -h, --help           Print this help and exit

With neither --last nor --from/--to the window defaults to the last 24 hours.

ENVIRONMENT:
    ZM_DB_HOST, ZM_DB_USER, ZM_DB_PASS   Required store credentials
    ZM_DB_NAME                           Store schema (default: zm)
    ZM_DB_PORT                           Store port (default: 3306)
    BASELINE_ZONE_ROWS                   Zone summary cap (default: 200)
    BASELINE_TOP_EVENTS                  Top events cap (default: 30)
    BASELINE_ZONE_PREVIEW                Terminal zone rows (default: 15)
    BASELINE_TOP_PREVIEW                 Terminal top events (default: 10)
";

#[derive(Debug, Default)]
pub struct RawArgs {
    pub last: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub monitors: Option<String>,
    pub output_root: Option<PathBuf>,
    pub help: bool,
}

impl RawArgs {
    pub fn parse(args: &[String]) -> Result<Self, BaselineError> {
        let mut parsed = RawArgs::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--last" => parsed.last = Some(take_value(&mut iter, "--last")?),
                "--from" => parsed.from = Some(take_value(&mut iter, "--from")?),
                "--to" => parsed.to = Some(take_value(&mut iter, "--to")?),
                "--monitors" => parsed.monitors = Some(take_value(&mut iter, "--monitors")?),
                "--out" => {
                    parsed.output_root = Some(PathBuf::from(take_value(&mut iter, "--out")?))
                }
                "-h" | "--help" => parsed.help = true,
                other => {
                    return Err(BaselineError::Validation(format!(
                        "unknown option: {}",
                        other
                    )))
                }
            }
        }

        Ok(parsed)
    }
}

fn take_value(
    iter: &mut std::slice::Iter<'_, String>,
    flag: &str,
) -> Result<String, BaselineError> {
    iter.next()
        .cloned()
        .ok_or_else(|| BaselineError::Validation(format!("{} requires a value", flag)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_all_flags() {
        let args = to_args(&[
            "--last", "6h", "--monitors", "18,19", "--out", "/tmp/baseline",
        ]);
        let parsed = RawArgs::parse(&args).unwrap();

        assert_eq!(parsed.last.as_deref(), Some("6h"));
        assert_eq!(parsed.monitors.as_deref(), Some("18,19"));
        assert_eq!(parsed.output_root, Some(PathBuf::from("/tmp/baseline")));
        assert!(!parsed.help);
    }

    #[test]
    fn test_parse_explicit_window() {
        let args = to_args(&["--from", "2026-02-15 08:00:00", "--to", "2026-02-15 12:00:00"]);
        let parsed = RawArgs::parse(&args).unwrap();

        assert_eq!(parsed.from.as_deref(), Some("2026-02-15 08:00:00"));
        assert_eq!(parsed.to.as_deref(), Some("2026-02-15 12:00:00"));
    }

    #[test]
    fn test_unknown_option_rejected() {
        let err = RawArgs::parse(&to_args(&["--frobnicate"])).unwrap_err();
        assert!(matches!(err, BaselineError::Validation(_)));
    }

    #[test]
    fn test_missing_value_rejected() {
        let err = RawArgs::parse(&to_args(&["--last"])).unwrap_err();
        assert!(matches!(err, BaselineError::Validation(_)));
    }

    #[test]
    fn test_help_flag() {
        let parsed = RawArgs::parse(&to_args(&["--help"])).unwrap();
        assert!(parsed.help);
    }
}
