use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct ImagegenConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub openai: OpenAiConfig,
    pub models: ModelConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub api_base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Model for the structured prompt-extraction call (e.g., gpt-4o)
    pub text_model: String,
    /// Model for image generation (e.g., dall-e-3)
    pub image_model: String,
}

impl ImagegenConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let is_prod = common.is_prod();

        let api_key = get_env("OPENAI_API_KEY", None, is_prod)?;
        if api_key.is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "OPENAI_API_KEY is set but empty"
            )));
        }

        Ok(ImagegenConfig {
            common,
            openai: OpenAiConfig {
                api_key,
                api_base_url: get_env(
                    "OPENAI_API_BASE_URL",
                    Some("https://api.openai.com/v1"),
                    is_prod,
                )?,
            },
            models: ModelConfig {
                text_model: get_env("IMAGEGEN_TEXT_MODEL", Some("gpt-4o"), is_prod)?,
                image_model: get_env("IMAGEGEN_IMAGE_MODEL", Some("dall-e-3"), is_prod)?,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
