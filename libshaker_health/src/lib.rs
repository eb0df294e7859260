//! # shaker_health
//!
//! shaker_health derives screen health and utilization metrics from drilling-rig shale shaker
//! logs, written in Rust. It takes the CSV export of a rig's sensor data (one row per timestamped
//! sample), validates it, and computes screen utilization, an estimate of remaining screen life,
//! a shaker output drop flag, and daily aggregates that can be charted or tabulated downstream.
//!
//! ## Installation
//!
//! In the future we may deploy to crates.io, but currently the only method of install is from
//! source. Clone the repository and use `cargo install --path ./shaker_health_cli` from the top
//! level of the repository. To use the CLI see the `shaker_health_cli` README.
//!
//! ## Configuration
//!
//! The analysis is controlled by a YAML configuration file:
//!
//! ```yml
//! input_path: shaker_log.csv
//! output_path: null
//! mesh_type: API 100
//! expected_screen_life_hours: 120.0
//! utilization_alert_threshold_percent: 80.0
//! ```
//!
//! - `input_path`: the shaker log CSV
//! - `output_path`: directory the report files are written to. If `null`, no files are written
//! - `mesh_type`: the installed screen mesh, one of `API 100`, `API 140`, `API 170`, `API 200`.
//!   Capacities are 250, 200, 160 and 120 respectively
//! - `expected_screen_life_hours`: the baseline screen lifetime
//! - `utilization_alert_threshold_percent`: days whose mean utilization is strictly above this
//!   are flagged. Must be within 50-100
//!
//! ## Input Format
//!
//! The log is a CSV with a header row. The following columns are required (exact names):
//!
//! ```text
//! YYYY/MM/DD, HH:MM:SS, Hole Depth (feet), Bit Depth (feet), Hook Load (klbs),
//! Total Mud Volume (barrels), Weight on Bit (klbs), SHAKER #1 (Units), Tool Face (degrees),
//! SHAKER #2 (Units), SHAKER #3 (PERCENT), Heavy Ratio (percent),
//! PVT Monitor Mud Gain/Loss (barrels), Total Mud Low Warning (barrels),
//! Flow Low Warning (flow_percent), Flow High Warning (flow_percent),
//! Trip Mud High Warning (barrels), MA_Temp (degF), MA_Flow_Rate (gal/min),
//! Site Mud Volume (barrels), Inactive Mud Volume (barrels)
//! ```
//!
//! Any other columns are ignored. Rows do not need to be in time order.
//!
//! ## Metrics
//!
//! - Solids volume rate: `WOB * flow / 100`, a heuristic proxy for solids load
//! - Screen utilization: solids volume rate as a percent of mesh capacity (not clamped)
//! - Remaining screen life: `max(expected - mean(WOB * flow) / 1000 * 10, 0)` hours
//! - Drop detected: shaker #3 moved more than 10 points between two consecutive samples while
//!   flow moved less than 2 gal/min
//! - Daily aggregates: mean utilization, mean flow, mean and max shaker #3 per calendar day
//! - Daily shaker #3 distribution: quartiles, whiskers and outliers per day
//!
//! ## Output
//!
//! With an output directory configured, four files named after the input file are written:
//!
//! ```text
//! <stem>_timeseries.csv           per-sample shaker output, flow and utilization
//! <stem>_daily.csv                daily aggregates
//! <stem>_shaker3_distribution.csv daily shaker #3 box plot statistics
//! <stem>_summary.yml              summary metrics and the settings used
//! ```
pub mod config;
pub mod constants;
pub mod daily;
pub mod distribution;
pub mod error;
pub mod mesh;
pub mod metrics;
pub mod process;
pub mod raw_table;
pub mod record;
pub mod report;
pub mod validate;
