//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod assignment_repo;
pub mod metrics_repo;
pub mod program_repo;
pub mod progression_run_repo;
pub mod tier_change_repo;
pub mod tier_repo;

pub use assignment_repo::AssignmentRepo;
pub use metrics_repo::MetricsRepo;
pub use program_repo::ProgramRepo;
pub use progression_run_repo::ProgressionRunRepo;
pub use tier_change_repo::TierChangeRepo;
pub use tier_repo::TierRepo;
