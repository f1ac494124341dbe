use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct GenerateImageRequest {
    #[validate(length(min = 1, message = "Prompt must not be empty"))]
    pub prompt: String,

    #[serde(default = "default_n")]
    #[validate(range(min = 1, max = 10, message = "n must be between 1 and 10"))]
    pub n: u32,

    #[serde(default = "default_ratio")]
    pub ratio: String,
}

fn default_n() -> u32 {
    1
}

fn default_ratio() -> String {
    "1:1".to_string()
}

#[derive(Debug, Serialize)]
pub struct GenerateImageResponse {
    /// (image URL, provider-revised prompt) pairs, in provider order.
    pub urls: Vec<(String, String)>,
}
