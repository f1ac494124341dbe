//! Image generation service.
//!
//! Enriches raw user prompts through a structured-extraction call to a text
//! provider, composes the extracted fields into a final prompt, and forwards
//! it to an image-generation provider.

pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
