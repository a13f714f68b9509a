use crate::types::DbId;

/// Domain error taxonomy shared by the API layer and batch jobs.
///
/// HTTP status mapping lives in `cantina-api`; this crate only names the
/// failure, never its transport representation.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Malformed input: regex/shape mismatch, unknown enum value, bad date.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A meal record already exists for this student, meal type, and day.
    #[error("{student_name} already has a {meal_type} record for this day")]
    DuplicateMeal {
        student_name: String,
        meal_type: String,
    },

    /// The caller lacks the administrative capability.
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    /// A referenced record does not exist.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Unexpected internal failure; details are logged, not surfaced.
    #[error("Internal error: {0}")]
    Internal(String),
}
