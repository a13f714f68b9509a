//! HTTP surface for the meal attendance service.
//!
//! Thin axum handlers over `cantina-db` repositories and the
//! `cantina-mailer` dispatcher; domain decisions live in `cantina-core`.

pub mod audit;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod jobs;
pub mod response;
pub mod routes;
pub mod state;
