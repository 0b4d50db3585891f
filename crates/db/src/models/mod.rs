//! Row model structs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct
//! matching the database row, with conversions into the core domain
//! types where the evaluator consumes them.

pub mod assignment;
pub mod metrics;
pub mod program;
pub mod progression_run;
pub mod tier;
pub mod tier_change;
