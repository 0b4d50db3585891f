//! Tier-progression engine.
//!
//! Provides the criteria and result types plus a pure evaluator that
//! decides whether a creator is promoted, demoted, warned, or
//! maintained, all without database dependencies.

pub mod criteria;
pub mod evaluator;
pub mod types;
