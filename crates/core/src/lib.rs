//! Domain logic for the cantina meal-attendance platform.
//!
//! Everything in this crate is pure (no I/O, no database handles) so it can
//! be exercised by the API layer, batch jobs, and unit tests alike:
//!
//! - [`meal`] / [`plan`] — the meal-type and consumption-plan vocabularies.
//! - [`calendar`] — business-timezone day resolution and quota week windows.
//! - [`report`] — attendance report aggregation.
//! - [`render`] — the summary and tabular renderings of a report.
//! - [`dedup`] — duplicate-enrollment reconciliation planning.
//! - [`validation`] — recipient/schedule input validation.
//! - [`error`] — the shared [`CoreError`](error::CoreError) taxonomy.

pub mod calendar;
pub mod dedup;
pub mod error;
pub mod meal;
pub mod plan;
pub mod render;
pub mod report;
pub mod types;
pub mod validation;

pub use error::CoreError;
pub use meal::MealType;
pub use plan::ConsumptionPlan;
