//! Example dashboards for the glance exploration library.
//!
//! Run them with `cargo run --example explore_dashboard` or
//! `cargo run --example timeseries_dashboard`.
