use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};

use crate::catalog::{self, ModelFamily, ModelSelection};
use crate::resolver::{GenerationRequest, PromptInput, DEFAULT_SEED};
use crate::session::SessionConfig;
use anyhow::{anyhow, Context as AnyhowContext, Result};

const DEFAULT_UA: &str = concat!("unlearn-demo/", env!("CARGO_PKG_VERSION"));
const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

/// Command-line options for the unlearning demo.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "Dummy machine-unlearning image demo", long_about = None)]
pub struct CliArgs {
    /// Model family to pretend to use.
    #[arg(long = "family", value_enum, default_value_t = ModelFamily::Original)]
    pub family: ModelFamily,

    /// Style or object the selected unlearned model forgot (for `style` / `object` families).
    #[arg(long = "unlearned", value_name = "KEY")]
    pub unlearned: Option<String>,

    /// Model name for the `other` family.
    #[arg(long = "other-model", value_parser = catalog::other_model_value_parser())]
    pub other_model: Option<String>,

    /// Preset style for the prompt.
    #[arg(long = "style", value_parser = catalog::style_value_parser())]
    pub style: Option<String>,

    /// Preset object for the prompt.
    #[arg(long = "object", value_parser = catalog::object_value_parser())]
    pub object: Option<String>,

    /// Free-text prompt; switches to free-text mode.
    #[arg(long = "text", conflicts_with_all = ["prompt_file", "stdin_prompt", "style", "object"])]
    pub prompt: Option<String>,

    /// Read the free-text prompt from the specified file.
    #[arg(long = "prompt-file", value_name = "PATH", conflicts_with_all = ["prompt", "stdin_prompt", "style", "object"])]
    pub prompt_file: Option<PathBuf>,

    /// Read the free-text prompt from STDIN (until EOF).
    #[arg(long = "stdin-prompt", action = ArgAction::SetTrue, conflicts_with_all = ["prompt", "prompt_file", "style", "object"])]
    pub stdin_prompt: bool,

    /// Seed for the placeholder image.
    #[arg(long = "seed", default_value_t = DEFAULT_SEED, allow_negative_numbers = true)]
    pub seed: i64,

    /// Download the resolved image to this path.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Walk through the form with terminal prompts.
    #[arg(long = "interactive", short = 'i', action = ArgAction::SetTrue, conflicts_with = "serve")]
    pub interactive: bool,

    /// Serve the HTML form and JSON API instead of resolving a single request.
    #[arg(long = "serve", action = ArgAction::SetTrue)]
    pub serve: bool,

    /// Listen address for the HTTP server.
    #[arg(
        long = "listen",
        value_name = "ADDR",
        env = "UNLEARN_DEMO_LISTEN",
        default_value = DEFAULT_LISTEN_ADDR,
        requires = "serve"
    )]
    pub listen: String,

    /// User-Agent value sent when downloading images.
    #[arg(long = "ua", default_value = DEFAULT_UA)]
    pub user_agent: String,

    /// Network timeout (seconds) applied to image downloads.
    #[arg(long = "timeout", default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..=300))]
    timeout_secs: u64,
}

impl CliArgs {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn is_free_text(&self) -> bool {
        self.prompt.is_some() || self.prompt_file.is_some() || self.stdin_prompt
    }

    /// Resolve the free-text prompt from whichever source was given.
    pub fn resolve_prompt(&self) -> Result<Option<String>> {
        if let Some(prompt) = &self.prompt {
            return Ok(Some(prompt.clone()));
        }
        if let Some(path) = &self.prompt_file {
            return fs::read_to_string(path)
                .map(Some)
                .with_context(|| format!("reading prompt file {}", path.display()));
        }
        if self.stdin_prompt {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading prompt from stdin")?;
            return Ok(Some(buf));
        }
        Ok(None)
    }

    /// Model flags given on the command line that `--family` does not read.
    pub fn ignored_model_flags(&self) -> Vec<&'static str> {
        let mut ignored = Vec::new();
        let reads_unlearned = matches!(
            self.family,
            ModelFamily::StyleUnlearned | ModelFamily::ObjectUnlearned
        );
        if self.unlearned.is_some() && !reads_unlearned {
            ignored.push("--unlearned");
        }
        if self.other_model.is_some() && self.family != ModelFamily::Other {
            ignored.push("--other-model");
        }
        ignored
    }

    /// Picks the model named by `--family` and its companion flag.
    pub fn selection(&self) -> Result<Option<ModelSelection>> {
        for flag in self.ignored_model_flags() {
            tracing::warn!("{flag} has no effect with --family {}", self.family.as_str());
        }

        let choice = match self.family {
            ModelFamily::Original => None,
            ModelFamily::StyleUnlearned | ModelFamily::ObjectUnlearned => {
                self.unlearned.as_deref()
            }
            ModelFamily::Other => self.other_model.as_deref(),
        };

        match (ModelSelection::from_choice(self.family, choice), choice) {
            (Some(selection), _) => Ok(Some(selection)),
            (None, Some(key)) => Err(anyhow!(
                "`{key}` is not available for the {} family; choose one of: {}",
                self.family.label(),
                self.family.choices().join(", ")
            )),
            (None, None) => Ok(None),
        }
    }

    /// Convert CLI arguments into a generation request.
    pub fn generation_request(&self) -> Result<GenerationRequest> {
        let model = self.selection()?.map(|selection| selection.display_name());
        let prompt = if self.is_free_text() {
            PromptInput::FreeText {
                text: self.resolve_prompt()?,
            }
        } else {
            PromptInput::Preset {
                style: self.style.clone(),
                object: self.object.clone(),
            }
        };
        Ok(GenerationRequest::new(model, prompt, self.seed))
    }

    /// Convert CLI arguments into a session configuration.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::new(self.user_agent.clone(), self.timeout())
    }
}
