use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Inconsistent tier ladder for program {program_id}: {count} tiers at level {level}")]
    InconsistentLadder {
        program_id: DbId,
        level: i32,
        count: usize,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}
