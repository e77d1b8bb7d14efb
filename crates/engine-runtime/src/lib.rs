//! Recurring chart refresh: one independent cron job per chart, driving the
//! query executor and tracking per-chart schedule state.

pub mod error;
pub mod executor;
pub mod registry;
pub mod retry;
pub mod source;

#[cfg(test)]
mod tests;

/// Identifies one chart across the scheduling and execution APIs.
pub type ChartId = u64;
