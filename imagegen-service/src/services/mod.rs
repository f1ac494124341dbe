//! Business services for the imagegen service.

pub mod enrichment;
pub mod providers;

pub use enrichment::PromptEnricher;
