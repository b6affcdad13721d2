use sarathi_core::types::Id;

/// Errors surfaced by the document store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Document not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: Id },

    /// A conditional write lost a race: the course document changed
    /// between read and commit. Callers retry from a fresh read.
    #[error("Version conflict on course {course_id}: expected {expected}, found {found}")]
    VersionConflict {
        course_id: Id,
        expected: u64,
        found: u64,
    },

    #[error("Duplicate document: {0}")]
    Duplicate(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
