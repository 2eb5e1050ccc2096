pub mod baseline_core;
