//! service-core: Shared infrastructure for the imagegen service.
pub mod config;
pub mod error;
pub mod observability;
