//! Structured prompt fields and final-prompt composition.

use serde::{Deserialize, Serialize};
use serde_json::json;

/// Fields extracted from a raw user prompt by the text provider.
///
/// All five lists must be present in the provider's structured output; an
/// absent field fails deserialization and surfaces as a contract violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptFields {
    pub subject: Vec<String>,
    pub objects: Vec<String>,
    pub mood: Vec<String>,
    pub style: Vec<String>,
    pub negative: Vec<String>,
}

impl PromptFields {
    /// JSON schema submitted with the structured-extraction call.
    pub fn output_schema() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "subject": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Subject of the image"
                },
                "objects": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Objects in the image"
                },
                "mood": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Mood of the image"
                },
                "style": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Style of the image"
                },
                "negative": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Keywords that should not be included in the image"
                }
            },
            "required": ["subject", "objects", "mood", "style", "negative"],
            "additionalProperties": false
        })
    }
}

/// Render extracted fields into the final image prompt.
///
/// Pure and deterministic: identical input produces byte-identical output.
pub fn compose_final_prompt(fields: &PromptFields) -> String {
    format!(
        "Subject: {}\nObjects: {}\nMood: {}\nStyle: {}\nNegative: {}\n",
        fields.subject.join(", "),
        fields.objects.join(", "),
        fields.mood.join(", "),
        fields.style.join(", "),
        fields.negative.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fields() -> PromptFields {
        PromptFields {
            subject: vec!["cat".to_string()],
            objects: vec!["hat".to_string(), "scarf".to_string()],
            mood: vec![],
            style: vec!["watercolor".to_string()],
            negative: vec!["blur".to_string()],
        }
    }

    #[test]
    fn composes_fixed_template() {
        assert_eq!(
            compose_final_prompt(&sample_fields()),
            "Subject: cat\nObjects: hat, scarf\nMood: \nStyle: watercolor\nNegative: blur\n"
        );
    }

    #[test]
    fn composition_is_deterministic() {
        let fields = sample_fields();
        assert_eq!(compose_final_prompt(&fields), compose_final_prompt(&fields));
    }

    #[test]
    fn empty_fields_render_as_empty_segments() {
        let fields = PromptFields {
            subject: vec![],
            objects: vec![],
            mood: vec![],
            style: vec![],
            negative: vec![],
        };
        assert_eq!(
            compose_final_prompt(&fields),
            "Subject: \nObjects: \nMood: \nStyle: \nNegative: \n"
        );
    }

    #[test]
    fn output_schema_requires_all_fields() {
        let schema = PromptFields::output_schema();
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 5);
        for field in ["subject", "objects", "mood", "style", "negative"] {
            assert!(required.iter().any(|v| v == field), "missing {field}");
            assert_eq!(schema["properties"][field]["type"], "array");
        }
    }

    #[test]
    fn deserialization_rejects_missing_fields() {
        let err = serde_json::from_str::<PromptFields>(r#"{"subject":["cat"]}"#).unwrap_err();
        assert!(err.to_string().contains("missing field"));
    }
}
