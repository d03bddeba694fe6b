//! Derived-view computation over the normalized ridership table.
//!
//! This module turns the one-time normalized table into the views the
//! dashboard renders: grouped averages, totals, per-line time series,
//! correlation matrices, and box-plot statistics.

pub mod aggregate;
pub mod correlate;
pub mod report;
pub mod summary;
pub mod types;
pub mod utility;
