//! Delay aggregation and misery scoring.
//!
//! This module groups raw delay rows by line, computes per-line delay
//! statistics and a bounded composite misery score, and ranks delay causes
//! for the dashboard's breakdown chart.

pub mod aggregate;
pub mod score;
pub mod types;
pub mod utility;
