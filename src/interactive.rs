//! Terminal version of the demo form.

use dialoguer::{Input, Select};

use crate::catalog::{self, ModelFamily, ModelSelection};
use crate::error::Result;
use crate::resolver::{GenerationRequest, PromptInput, DEFAULT_SEED};

const NONE_ENTRY: &str = "(none)";
const PROMPT_MODES: [&str; 2] = ["Preset Style/Object", "Free Text Prompt"];

/// Ask for every form field in the same order as the web page.
pub fn prompt_request() -> Result<GenerationRequest> {
    println!("Model selection");
    let families = ModelFamily::available();
    let labels: Vec<&str> = families.iter().map(|family| family.label()).collect();
    let index = Select::new()
        .with_prompt("Which model family?")
        .items(&labels)
        .default(0)
        .interact()?;
    let family = families[index];

    let choice = match family.choice_label() {
        Some(label) => {
            let choices = family.choices();
            let index = Select::new()
                .with_prompt(label)
                .items(&choices)
                .default(0)
                .interact()?;
            choices.get(index).copied()
        }
        None => None,
    };
    let model = ModelSelection::from_choice(family, choice).map(|selection| selection.display_name());
    if let Some(name) = &model {
        println!("Using Model: {name}");
    }

    println!("Generation settings");
    let seed: i64 = Input::new()
        .with_prompt("Random seed")
        .default(DEFAULT_SEED)
        .interact_text()?;

    let mode = Select::new()
        .with_prompt("Prompt mode")
        .items(&PROMPT_MODES)
        .default(0)
        .interact()?;

    let prompt = if mode == 0 {
        PromptInput::Preset {
            style: pick_optional("Choose style", catalog::list_styles())?,
            object: pick_optional("Choose object", catalog::list_objects())?,
        }
    } else {
        let text: String = Input::new()
            .with_prompt("Enter your prompt")
            .allow_empty(true)
            .interact_text()?;
        PromptInput::FreeText { text: Some(text) }
    };

    Ok(GenerationRequest::new(model, prompt, seed))
}

fn pick_optional(prompt: &str, options: &[&str]) -> Result<Option<String>> {
    let items = with_none_entry(options);
    let index = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact()?;
    Ok(entry_at(options, index))
}

fn with_none_entry<'a>(options: &[&'a str]) -> Vec<&'a str> {
    std::iter::once(NONE_ENTRY)
        .chain(options.iter().copied())
        .collect()
}

/// Maps a menu index back to a catalog entry; index 0 is the "(none)" row.
fn entry_at(options: &[&str], index: usize) -> Option<String> {
    index
        .checked_sub(1)
        .and_then(|position| options.get(position))
        .map(|value| (*value).to_owned())
}
