//! Server-rendered single-page form.

use std::fmt::Write;

use serde::Deserialize;

use crate::catalog::{self, ModelFamily, ModelSelection};
use crate::resolver::{GenerationRequest, GenerationResult, PromptInput, DEFAULT_SEED};
use crate::util::{escape_html, non_blank};

pub const PAGE_TITLE: &str = "Unlearning Styles Demo (Dummy)";
const HEADING: &str = "Machine Unlearning Demo - Styles and Objects (Dummy Version)";
const FREE_TEXT_PLACEHOLDER: &str = "e.g., A beautiful sunset over mountains, digital art";

const MODE_PRESET: &str = "preset";
const MODE_FREE_TEXT: &str = "free_text";

/// Raw fields posted by the form. Every field is optional so that an
/// incomplete submission still reaches validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateForm {
    pub family: Option<String>,
    pub style_model: Option<String>,
    pub object_model: Option<String>,
    pub other_model: Option<String>,
    pub prompt_mode: Option<String>,
    pub style: Option<String>,
    pub object: Option<String>,
    pub prompt: Option<String>,
    pub seed: Option<String>,
}

impl GenerateForm {
    /// The state of a freshly opened page.
    pub fn initial() -> Self {
        Self {
            family: Some(ModelFamily::Original.as_str().to_owned()),
            prompt_mode: Some(MODE_PRESET.to_owned()),
            seed: Some(DEFAULT_SEED.to_string()),
            ..Self::default()
        }
    }

    fn family(&self) -> Option<ModelFamily> {
        self.family.as_deref().and_then(ModelFamily::parse)
    }

    fn choice_for(&self, family: ModelFamily) -> Option<&str> {
        match family {
            ModelFamily::Original => None,
            ModelFamily::StyleUnlearned => self.style_model.as_deref(),
            ModelFamily::ObjectUnlearned => self.object_model.as_deref(),
            ModelFamily::Other => self.other_model.as_deref(),
        }
    }

    pub fn selection(&self) -> Option<ModelSelection> {
        let family = self.family()?;
        ModelSelection::from_choice(family, self.choice_for(family))
    }

    fn is_free_text(&self) -> bool {
        self.prompt_mode.as_deref() == Some(MODE_FREE_TEXT)
    }

    pub fn seed(&self) -> Result<i64, std::num::ParseIntError> {
        match non_blank(self.seed.clone()) {
            Some(raw) => raw.trim().parse(),
            None => Ok(DEFAULT_SEED),
        }
    }

    pub fn to_request(&self) -> Result<GenerationRequest, std::num::ParseIntError> {
        let prompt = if self.is_free_text() {
            PromptInput::FreeText {
                text: self.prompt.clone(),
            }
        } else {
            PromptInput::Preset {
                style: non_blank(self.style.clone()),
                object: non_blank(self.object.clone()),
            }
        };
        let model = self.selection().map(|selection| selection.display_name());
        Ok(GenerationRequest::new(model, prompt, self.seed()?))
    }
}

/// What to show under the form after a submission.
#[derive(Debug, Clone)]
pub enum Outcome {
    Generated(GenerationResult),
    Rejected(String),
}

pub fn render_page(form: &GenerateForm, outcome: Option<&Outcome>) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>{PAGE_TITLE}</title>
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <style>
    :root {{
      color-scheme: light dark;
    }}
    body {{
      font-family: "Segoe UI", -apple-system, BlinkMacSystemFont, sans-serif;
      background: #f5f5f5;
      margin: 0;
      color: #1f1f1f;
    }}
    form {{
      display: grid;
      grid-template-columns: 300px 1fr;
      min-height: 100vh;
    }}
    aside {{
      background: #eceff4;
      padding: 1.5rem;
    }}
    main {{
      padding: 1.5rem 2rem 2rem;
    }}
    select, input[type="number"], textarea {{
      width: 100%;
      box-sizing: border-box;
      margin: 0.35rem 0 1rem;
      padding: 0.45rem;
      font-size: 0.95rem;
    }}
    .model-choice {{
      margin-bottom: 1rem;
    }}
    button {{
      font-size: 1rem;
      border: none;
      background: linear-gradient(135deg, #22d3ee, #2563eb);
      color: #fff;
      padding: 0.9rem 1.8rem;
      border-radius: 999px;
      cursor: pointer;
    }}
    .status.error {{
      color: #dc2626;
      font-weight: 600;
    }}
    figure img {{
      max-width: 512px;
      border-radius: 12px;
    }}
    .note {{
      color: #6b7280;
      font-size: 0.85rem;
    }}
    @media (prefers-color-scheme: dark) {{
      body {{
        background: #0f172a;
        color: #e2e8f0;
      }}
      aside {{
        background: #1e293b;
      }}
    }}
  </style>
</head>
<body>
  <form method="post" action="/generate">
    <aside>
      <h2>Model selection</h2>
"#
    );

    render_model_selection(&mut html, form);

    let seed = form.seed.clone().unwrap_or_else(|| DEFAULT_SEED.to_string());
    let _ = write!(
        html,
        r#"      <h2>Generation settings</h2>
      <label for="seed">Random seed</label>
      <input type="number" id="seed" name="seed" step="1" value="{seed}" />
      <p class="note"><sub>Note: In this dummy version, these settings do not affect the image.</sub></p>
    </aside>
    <main>
      <h1>{HEADING}</h1>
"#,
        seed = escape_html(&seed)
    );

    render_prompt_section(&mut html, form);

    html.push_str(
        r#"      <hr />
      <button type="submit">Generate</button>
"#,
    );

    match outcome {
        Some(Outcome::Generated(result)) => {
            let _ = write!(
                html,
                r#"      <figure class="result">
        <img src="{src}" alt="generated image" />
        <figcaption>{caption}</figcaption>
      </figure>
"#,
                src = escape_html(&result.image_url),
                caption = escape_html(&result.caption())
            );
        }
        Some(Outcome::Rejected(message)) => {
            let _ = write!(
                html,
                r#"      <p class="status error">{}</p>
"#,
                escape_html(message)
            );
        }
        None => {}
    }

    html.push_str(
        r#"    </main>
  </form>
</body>
</html>
"#,
    );

    html
}

fn render_model_selection(html: &mut String, form: &GenerateForm) {
    let current = form.family();
    for family in ModelFamily::available() {
        let _ = write!(
            html,
            r#"      <label><input type="radio" name="family" value="{value}"{checked} /> {label}</label><br />
"#,
            value = family.as_str(),
            checked = checked(current == Some(family)),
            label = family.label()
        );
    }

    for family in ModelFamily::available() {
        let Some(label) = family.choice_label() else {
            continue;
        };
        let name = choice_field(family);
        let choices = family.choices();
        let _ = write!(
            html,
            r#"      <div class="model-choice" data-family="{family}"{hidden}>
        <label for="{name}">{label}</label>
"#,
            family = family.as_str(),
            hidden = hidden_attr(current != Some(family))
        );
        render_select(html, name, &choices, form.choice_for(family), None);
        html.push_str("      </div>\n");
    }

    if let Some(selection) = form.selection() {
        let _ = write!(
            html,
            r#"      <p class="using" data-family="{}"><strong>Using Model:</strong><br />{}</p>
"#,
            selection.family().as_str(),
            escape_html(&selection.display_name())
        );
    }

    html.push_str(
        r#"      <script>
        document.querySelectorAll('input[name="family"]').forEach((radio) => {
          radio.addEventListener("change", () => {
            document.querySelectorAll("[data-family]").forEach((node) => {
              node.hidden = node.dataset.family !== radio.value;
            });
          });
        });
      </script>
"#,
    );
}

fn render_prompt_section(html: &mut String, form: &GenerateForm) {
    let free_text = form.is_free_text();
    let _ = write!(
        html,
        r#"      <fieldset>
        <legend>Prompt mode</legend>
        <label><input type="radio" name="prompt_mode" value="{MODE_PRESET}"{preset} /> Preset Style/Object</label>
        <label><input type="radio" name="prompt_mode" value="{MODE_FREE_TEXT}"{free} /> Free Text Prompt</label>
      </fieldset>
      <h3>Style</h3>
      <label for="style">Choose style</label>
"#,
        preset = checked(!free_text),
        free = checked(free_text)
    );
    render_select(
        html,
        "style",
        catalog::list_styles(),
        form.style.as_deref(),
        Some("(none)"),
    );
    html.push_str(
        r#"      <h3>Object</h3>
      <label for="object">Choose object</label>
"#,
    );
    render_select(
        html,
        "object",
        catalog::list_objects(),
        form.object.as_deref(),
        Some("(none)"),
    );
    let _ = write!(
        html,
        r#"      <h3>Free Text Prompt</h3>
      <label for="prompt">Enter your prompt</label>
      <textarea id="prompt" name="prompt" rows="4" placeholder="{FREE_TEXT_PLACEHOLDER}">{}</textarea>
"#,
        escape_html(form.prompt.as_deref().unwrap_or_default())
    );
}

fn render_select(
    html: &mut String,
    name: &str,
    options: &[&str],
    selected: Option<&str>,
    blank: Option<&str>,
) {
    let _ = write!(
        html,
        r#"        <select id="{name}" name="{name}">
"#
    );
    if let Some(blank) = blank {
        let _ = write!(
            html,
            r#"          <option value=""{}>{blank}</option>
"#,
            selected_attr(selected.map_or(true, str::is_empty))
        );
    }
    for option in options {
        let _ = write!(
            html,
            r#"          <option value="{value}"{attr}>{value}</option>
"#,
            value = escape_html(option),
            attr = selected_attr(selected == Some(*option))
        );
    }
    html.push_str("        </select>\n");
}

fn choice_field(family: ModelFamily) -> &'static str {
    match family {
        ModelFamily::Original => "original_model",
        ModelFamily::StyleUnlearned => "style_model",
        ModelFamily::ObjectUnlearned => "object_model",
        ModelFamily::Other => "other_model",
    }
}

fn checked(on: bool) -> &'static str {
    if on {
        " checked"
    } else {
        ""
    }
}

fn hidden_attr(on: bool) -> &'static str {
    if on {
        " hidden"
    } else {
        ""
    }
}

fn selected_attr(on: bool) -> &'static str {
    if on {
        " selected"
    } else {
        ""
    }
}
