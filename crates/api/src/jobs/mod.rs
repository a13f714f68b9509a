//! Batch jobs triggered through the admin surface.

pub mod reconciliation;
