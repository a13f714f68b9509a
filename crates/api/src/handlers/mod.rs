//! Request handlers for the meal attendance API.
//!
//! Each submodule provides async handler functions for one resource group.
//! Handlers delegate to the repositories in `cantina_db`, run domain logic
//! through `cantina_core`, and map errors via [`crate::error::AppError`].

pub mod activity;
pub mod admin;
pub mod meals;
pub mod reports;
