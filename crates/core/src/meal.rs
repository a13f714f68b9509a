//! Meal-type vocabulary.
//!
//! Meal types are stored as lowercase strings; the human-readable labels
//! feed the per-type report breakdown and the mail renderings, so changing
//! a label changes the published export format.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Storage constants
// ---------------------------------------------------------------------------

/// Morning snack, served before classes.
pub const MEAL_BREAKFAST_SNACK: &str = "breakfast_snack";
/// Main lunch service.
pub const MEAL_LUNCH: &str = "lunch";
/// Afternoon snack, served after classes.
pub const MEAL_AFTERNOON_SNACK: &str = "afternoon_snack";

/// All valid meal types, in serving order.
pub const VALID_MEAL_TYPES: &[&str] = &[MEAL_BREAKFAST_SNACK, MEAL_LUNCH, MEAL_AFTERNOON_SNACK];

// ---------------------------------------------------------------------------
// MealType
// ---------------------------------------------------------------------------

/// One of the three daily meal services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MealType {
    BreakfastSnack,
    Lunch,
    AfternoonSnack,
}

impl MealType {
    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BreakfastSnack => MEAL_BREAKFAST_SNACK,
            Self::Lunch => MEAL_LUNCH,
            Self::AfternoonSnack => MEAL_AFTERNOON_SNACK,
        }
    }

    /// Human-readable label used in reports and the tabular export.
    pub fn label(&self) -> &'static str {
        match self {
            Self::BreakfastSnack => "Breakfast Snack",
            Self::Lunch => "Lunch",
            Self::AfternoonSnack => "Afternoon Snack",
        }
    }

    /// Parse from a storage string, rejecting unknown values.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            MEAL_BREAKFAST_SNACK => Ok(Self::BreakfastSnack),
            MEAL_LUNCH => Ok(Self::Lunch),
            MEAL_AFTERNOON_SNACK => Ok(Self::AfternoonSnack),
            other => Err(CoreError::Validation(format!(
                "Unknown meal type: '{other}'. Valid types: {}",
                VALID_MEAL_TYPES.join(", ")
            ))),
        }
    }

    /// All meal types in serving order. The report's per-type section
    /// iterates this to keep a stable row order.
    pub fn all() -> [MealType; 3] {
        [Self::BreakfastSnack, Self::Lunch, Self::AfternoonSnack]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
