use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::util::{humanize_label, normalize_prompt};

const IMAGE_SERVICE_BASE: &str = "https://picsum.photos/seed";

pub const DEFAULT_SEED: i64 = 256;
pub const DEFAULT_DIMENSION: u32 = 512;

pub const NO_PROMPT: &str = "(no prompt)";
pub const NO_MODEL: &str = "(no model selected)";

/// How the prompt for a request is supplied.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PromptInput {
    /// Prompt composed from a catalog style and object.
    Preset {
        #[serde(default)]
        style: Option<String>,
        #[serde(default)]
        object: Option<String>,
    },
    FreeText {
        #[serde(default)]
        text: Option<String>,
    },
}

/// One submission of the demo form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenerationRequest {
    /// Display name of the selected pretend model.
    #[serde(default)]
    pub model: Option<String>,
    pub prompt: PromptInput,
    #[serde(default = "default_seed")]
    pub seed: i64,
    #[serde(skip_deserializing, default = "default_dimension")]
    pub width: u32,
    #[serde(skip_deserializing, default = "default_dimension")]
    pub height: u32,
}

fn default_seed() -> i64 {
    DEFAULT_SEED
}

fn default_dimension() -> u32 {
    DEFAULT_DIMENSION
}

impl GenerationRequest {
    /// Builds a request at the fixed 512×512 output size.
    pub fn new(model: Option<String>, prompt: PromptInput, seed: i64) -> Self {
        Self {
            model,
            prompt,
            seed,
            width: DEFAULT_DIMENSION,
            height: DEFAULT_DIMENSION,
        }
    }
}

/// What the display side needs to show a resolved request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationResult {
    pub image_url: String,
    pub echoed_prompt: String,
    pub echoed_model: String,
}

impl GenerationResult {
    pub fn caption(&self) -> String {
        format!(
            "Model (dummy): {} | Prompt: {}",
            self.echoed_model, self.echoed_prompt
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a model in the sidebar.")]
    NoModelSelected,
    #[error("Please select a style.")]
    NoStyleSelected,
    #[error("Please select an object.")]
    NoObjectSelected,
    #[error("Please enter a prompt.")]
    EmptyPrompt,
}

impl ValidationError {
    /// Stable identifier for API clients.
    pub fn code(self) -> &'static str {
        match self {
            ValidationError::NoModelSelected => "no_model_selected",
            ValidationError::NoStyleSelected => "no_style_selected",
            ValidationError::NoObjectSelected => "no_object_selected",
            ValidationError::EmptyPrompt => "empty_prompt",
        }
    }
}

/// Builds the preset prompt, or `None` unless both halves are picked.
pub fn compose_prompt(style: Option<&str>, object: Option<&str>) -> Option<String> {
    match (style, object) {
        (Some(style), Some(object)) => Some(format!(
            "A {object} image in {} style.",
            humanize_label(style)
        )),
        _ => None,
    }
}

/// Placeholder image URL for a seed; the provider keeps it stable per seed and size.
pub fn build_seeded_image_url(seed: i64, width: u32, height: u32) -> String {
    format!("{IMAGE_SERVICE_BASE}/{seed}/{width}/{height}")
}

/// Validates a submission and resolves it to an image URL plus the echoed labels.
pub fn resolve(request: &GenerationRequest) -> Result<GenerationResult, ValidationError> {
    let model = request
        .model
        .as_deref()
        .filter(|model| !model.trim().is_empty())
        .ok_or(ValidationError::NoModelSelected)?;

    let prompt = match &request.prompt {
        PromptInput::Preset { style, object } => {
            let style = present(style.as_deref()).ok_or(ValidationError::NoStyleSelected)?;
            let object = present(object.as_deref()).ok_or(ValidationError::NoObjectSelected)?;
            compose_prompt(Some(style), Some(object))
        }
        PromptInput::FreeText { text } => {
            Some(normalize_prompt(text.as_deref()).ok_or(ValidationError::EmptyPrompt)?)
        }
    };

    let image_url = build_seeded_image_url(request.seed, request.width, request.height);
    tracing::debug!(seed = request.seed, %image_url, model, "resolved generation request");

    Ok(GenerationResult {
        image_url,
        echoed_prompt: normalize_prompt(prompt.as_deref()).unwrap_or_else(|| NO_PROMPT.to_owned()),
        echoed_model: if model.is_empty() {
            NO_MODEL.to_owned()
        } else {
            model.to_owned()
        },
    })
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn preset(style: Option<&str>, object: Option<&str>) -> PromptInput {
        PromptInput::Preset {
            style: style.map(str::to_owned),
            object: object.map(str::to_owned),
        }
    }

    fn free_text(text: &str) -> PromptInput {
        PromptInput::FreeText {
            text: Some(text.to_owned()),
        }
    }

    fn request(model: Option<&str>, prompt: PromptInput) -> GenerationRequest {
        GenerationRequest::new(model.map(str::to_owned), prompt, DEFAULT_SEED)
    }

    #[test]
    fn url_has_exact_format() {
        assert_eq!(
            build_seeded_image_url(7, 512, 256),
            "https://picsum.photos/seed/7/512/256"
        );
        assert_eq!(
            build_seeded_image_url(-3, 1, 1),
            "https://picsum.photos/seed/-3/1/1"
        );
    }

    #[test]
    fn url_is_deterministic() {
        for seed in [0, 1, 256, i64::MAX, i64::MIN] {
            assert_eq!(
                build_seeded_image_url(seed, 512, 512),
                build_seeded_image_url(seed, 512, 512)
            );
        }
        assert_ne!(
            build_seeded_image_url(1, 512, 512),
            build_seeded_image_url(2, 512, 512)
        );
    }

    #[test]
    fn composes_preset_prompt() {
        assert_eq!(
            compose_prompt(Some("Van_Gogh"), Some("Cats")).as_deref(),
            Some("A Cats image in Van Gogh style.")
        );
    }

    #[test]
    fn composition_needs_both_halves() {
        assert_eq!(compose_prompt(None, Some("Cats")), None);
        assert_eq!(compose_prompt(Some("Van_Gogh"), None), None);
        assert_eq!(compose_prompt(None, None), None);
    }

    #[test]
    fn missing_model_is_reported_first() {
        let err = resolve(&request(None, preset(None, None))).unwrap_err();
        assert_matches!(err, ValidationError::NoModelSelected);

        let err = resolve(&request(Some(""), free_text("hello"))).unwrap_err();
        assert_matches!(err, ValidationError::NoModelSelected);

        let err = resolve(&request(Some("   "), free_text("hello"))).unwrap_err();
        assert_matches!(err, ValidationError::NoModelSelected);
    }

    #[test]
    fn style_is_checked_before_object() {
        let err = resolve(&request(Some("Mickey Mouse"), preset(None, Some("Cats")))).unwrap_err();
        assert_matches!(err, ValidationError::NoStyleSelected);

        let err = resolve(&request(Some("Mickey Mouse"), preset(None, None))).unwrap_err();
        assert_matches!(err, ValidationError::NoStyleSelected);

        let err = resolve(&request(Some("Mickey Mouse"), preset(Some("Monet"), None))).unwrap_err();
        assert_matches!(err, ValidationError::NoObjectSelected);
    }

    #[test]
    fn blank_free_text_is_rejected() {
        let err = resolve(&request(Some("Mickey Mouse"), free_text("   "))).unwrap_err();
        assert_matches!(err, ValidationError::EmptyPrompt);

        let err = resolve(&request(
            Some("Mickey Mouse"),
            PromptInput::FreeText { text: None },
        ))
        .unwrap_err();
        assert_matches!(err, ValidationError::EmptyPrompt);
    }

    #[test]
    fn free_text_is_trimmed() {
        let result = resolve(&request(Some("Mickey Mouse"), free_text("  hello  "))).unwrap();
        assert_eq!(result.echoed_prompt, "hello");
        assert_eq!(result.echoed_model, "Mickey Mouse");
    }

    #[test]
    fn resolves_style_unlearned_scenario() {
        let request = GenerationRequest::new(
            Some("Style Unlearned (dummy): Monet".to_owned()),
            free_text("A Cats image in Monet style."),
            256,
        );
        let result = resolve(&request).unwrap();
        assert_eq!(
            result,
            GenerationResult {
                image_url: "https://picsum.photos/seed/256/512/512".to_owned(),
                echoed_prompt: "A Cats image in Monet style.".to_owned(),
                echoed_model: "Style Unlearned (dummy): Monet".to_owned(),
            }
        );
    }

    #[test]
    fn preset_mode_composes_the_echoed_prompt() {
        let result = resolve(&request(
            Some("Style Unlearned (dummy): Monet"),
            preset(Some("Monet"), Some("Cats")),
        ))
        .unwrap();
        assert_eq!(result.echoed_prompt, "A Cats image in Monet style.");
        assert_eq!(result.image_url, "https://picsum.photos/seed/256/512/512");
    }

    #[test]
    fn caption_echoes_labels() {
        let result = GenerationResult {
            image_url: build_seeded_image_url(1, 512, 512),
            echoed_prompt: "hello".to_owned(),
            echoed_model: "Mickey Mouse".to_owned(),
        };
        assert_eq!(result.caption(), "Model (dummy): Mickey Mouse | Prompt: hello");
    }

    #[test]
    fn error_messages_and_codes() {
        assert_eq!(
            ValidationError::NoModelSelected.to_string(),
            "Please select a model in the sidebar."
        );
        assert_eq!(ValidationError::EmptyPrompt.to_string(), "Please enter a prompt.");
        assert_eq!(ValidationError::NoObjectSelected.code(), "no_object_selected");
    }

    #[test]
    fn deserializes_api_request_with_fixed_size() {
        let request: GenerationRequest = serde_json::from_value(serde_json::json!({
            "model": "Mickey Mouse",
            "prompt": { "mode": "preset", "style": "Monet", "object": "Cats" },
            "width": 64,
        }))
        .unwrap();
        assert_eq!(request.seed, DEFAULT_SEED);
        assert_eq!(request.width, 512);
        assert_eq!(request.height, 512);
        assert_eq!(request.prompt, preset(Some("Monet"), Some("Cats")));
    }
}
