//! Static catalog of styles, objects and the pretend model variants built on them.

use std::collections::BTreeSet;
use std::fmt;

use clap::builder::PossibleValuesParser;
use once_cell::sync::Lazy;

/// Styles offered in preset mode, in display order.
pub const STYLES: &[&str] = &[
    "Abstractionism",
    "Artist_Sketch",
    "Blossom_Season",
    "Bricks",
    "Byzantine",
    "Cartoon",
    "Cold_Warm",
    "Color_Fantasy",
    "Comic_Etch",
    "Crayon",
    "Cubism",
    "Dadaism",
    "Dapple",
    "Defoliation",
    "Early_Autumn",
    "Expressionism",
    "Fauvism",
    "French",
    "Glowing_Sunset",
    "Gorgeous_Love",
    "Greenfield",
    "Impressionism",
    "Ink_Art",
    "Joy",
    "Liquid_Dreams",
    "Magic_Cube",
    "Meta_Physics",
    "Meteor_Shower",
    "Monet",
    "Mosaic",
    "Neon_Lines",
    "On_Fire",
    "Pastel",
    "Pencil_Drawing",
    "Picasso",
    "Pop_Art",
    "Red_Blue_Ink",
    "Rust",
    "Seed_Images",
    "Sketch",
    "Sponge_Dabbed",
    "Structuralism",
    "Superstring",
    "Surrealism",
    "Ukiyoe",
    "Van_Gogh",
    "Vibrant_Flow",
    "Warm_Love",
    "Warm_Smear",
    "Watercolor",
    "Winter",
];

/// Objects offered in preset mode, in display order.
pub const OBJECTS: &[&str] = &[
    "Architectures",
    "Bears",
    "Birds",
    "Butterfly",
    "Cats",
    "Dogs",
    "Fishes",
    "Flame",
    "Flowers",
    "Frogs",
    "Horses",
    "Human",
    "Jellyfish",
    "Rabbits",
    "Sandwiches",
    "Sea",
    "Statues",
    "Towers",
    "Trees",
    "Waterfalls",
];

pub const OTHER_MODELS: &[&str] = &["Mickey Mouse"];

pub const ORIGINAL_DISPLAY_NAME: &str = "Original (dummy, no unlearning)";
const STYLE_UNLEARNED_PREFIX: &str = "Style Unlearned (dummy): ";
const OBJECT_UNLEARNED_PREFIX: &str = "Object Unlearned (dummy): ";

static SORTED_STYLES: Lazy<Vec<&'static str>> = Lazy::new(|| sorted(STYLES));
static SORTED_OBJECTS: Lazy<Vec<&'static str>> = Lazy::new(|| sorted(OBJECTS));
static OTHER_MODEL_SET: Lazy<BTreeSet<&'static str>> =
    Lazy::new(|| OTHER_MODELS.iter().copied().collect());

fn sorted(values: &[&'static str]) -> Vec<&'static str> {
    let mut keys = values.to_vec();
    keys.sort_unstable();
    keys
}

pub fn list_styles() -> &'static [&'static str] {
    STYLES
}

pub fn list_objects() -> &'static [&'static str] {
    OBJECTS
}

pub fn original_display_name() -> &'static str {
    ORIGINAL_DISPLAY_NAME
}

pub fn style_unlearned_display_name(style: &str) -> String {
    format!("{STYLE_UNLEARNED_PREFIX}{style}")
}

pub fn object_unlearned_display_name(object: &str) -> String {
    format!("{OBJECT_UNLEARNED_PREFIX}{object}")
}

/// The fixed set of non-unlearning models; iteration order is display order.
pub fn other_model_names() -> &'static BTreeSet<&'static str> {
    &OTHER_MODEL_SET
}

fn lookup(values: &[&'static str], key: &str) -> Option<&'static str> {
    values.iter().copied().find(|candidate| *candidate == key)
}

pub fn find_style(key: &str) -> Option<&'static str> {
    lookup(STYLES, key)
}

pub fn find_object(key: &str) -> Option<&'static str> {
    lookup(OBJECTS, key)
}

/// Top-level grouping of the pretend models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum ModelFamily {
    Original,
    #[value(name = "style")]
    StyleUnlearned,
    #[value(name = "object")]
    ObjectUnlearned,
    Other,
}

impl ModelFamily {
    pub const ALL: [ModelFamily; 4] = [
        ModelFamily::Original,
        ModelFamily::StyleUnlearned,
        ModelFamily::ObjectUnlearned,
        ModelFamily::Other,
    ];

    /// Families that have something to pick from, in sidebar order.
    pub fn available() -> Vec<ModelFamily> {
        Self::ALL
            .into_iter()
            .filter(|family| match family {
                ModelFamily::Original => !ORIGINAL_DISPLAY_NAME.is_empty(),
                other => !other.choices().is_empty(),
            })
            .collect()
    }

    /// Form value, also used on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            ModelFamily::Original => "original",
            ModelFamily::StyleUnlearned => "style",
            ModelFamily::ObjectUnlearned => "object",
            ModelFamily::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ModelFamily::Original => "Original",
            ModelFamily::StyleUnlearned => "Style Unlearned",
            ModelFamily::ObjectUnlearned => "Object Unlearned",
            ModelFamily::Other => "Other",
        }
    }

    /// Heading for the choice dropdown, `None` when the family has a single fixed model.
    pub fn choice_label(self) -> Option<&'static str> {
        match self {
            ModelFamily::Original => None,
            ModelFamily::StyleUnlearned => Some("Unlearned style model"),
            ModelFamily::ObjectUnlearned => Some("Unlearned object model"),
            ModelFamily::Other => Some("Other models"),
        }
    }

    /// Sorted choice keys for the family.
    pub fn choices(self) -> Vec<&'static str> {
        match self {
            ModelFamily::Original => Vec::new(),
            ModelFamily::StyleUnlearned => SORTED_STYLES.clone(),
            ModelFamily::ObjectUnlearned => SORTED_OBJECTS.clone(),
            ModelFamily::Other => other_model_names().iter().copied().collect(),
        }
    }

    pub fn parse(value: &str) -> Option<ModelFamily> {
        Self::ALL
            .into_iter()
            .find(|family| family.as_str() == value)
    }
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A concrete pretend model: a family plus, where needed, the catalog key it was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSelection {
    Original,
    StyleUnlearned(&'static str),
    ObjectUnlearned(&'static str),
    Other(&'static str),
}

impl ModelSelection {
    /// Pairs a family with the picked key. Unknown keys and missing picks yield `None`.
    pub fn from_choice(family: ModelFamily, choice: Option<&str>) -> Option<ModelSelection> {
        match family {
            ModelFamily::Original => Some(ModelSelection::Original),
            ModelFamily::StyleUnlearned => {
                choice.and_then(find_style).map(ModelSelection::StyleUnlearned)
            }
            ModelFamily::ObjectUnlearned => {
                choice.and_then(find_object).map(ModelSelection::ObjectUnlearned)
            }
            ModelFamily::Other => choice
                .and_then(|key| other_model_names().get(key).copied())
                .map(ModelSelection::Other),
        }
    }

    pub fn family(&self) -> ModelFamily {
        match self {
            ModelSelection::Original => ModelFamily::Original,
            ModelSelection::StyleUnlearned(_) => ModelFamily::StyleUnlearned,
            ModelSelection::ObjectUnlearned(_) => ModelFamily::ObjectUnlearned,
            ModelSelection::Other(_) => ModelFamily::Other,
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            ModelSelection::Original => original_display_name().to_owned(),
            ModelSelection::StyleUnlearned(style) => style_unlearned_display_name(style),
            ModelSelection::ObjectUnlearned(object) => object_unlearned_display_name(object),
            ModelSelection::Other(name) => (*name).to_owned(),
        }
    }
}

/// Restricts `--style` to catalog styles.
pub fn style_value_parser() -> PossibleValuesParser {
    PossibleValuesParser::new(STYLES.iter().copied())
}

/// Restricts `--object` to catalog objects.
pub fn object_value_parser() -> PossibleValuesParser {
    PossibleValuesParser::new(OBJECTS.iter().copied())
}

/// Restricts `--other-model` to the fixed other-model set.
pub fn other_model_value_parser() -> PossibleValuesParser {
    PossibleValuesParser::new(OTHER_MODEL_SET.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_sizes() {
        assert_eq!(list_styles().len(), 51);
        assert_eq!(list_objects().len(), 20);
        assert_eq!(list_styles()[0], "Abstractionism");
        assert_eq!(list_objects().last(), Some(&"Waterfalls"));
    }

    #[test]
    fn display_name_formats() {
        assert_eq!(
            style_unlearned_display_name("Monet"),
            "Style Unlearned (dummy): Monet"
        );
        assert_eq!(
            object_unlearned_display_name("Cats"),
            "Object Unlearned (dummy): Cats"
        );
        assert_eq!(original_display_name(), "Original (dummy, no unlearning)");
    }

    #[test]
    fn display_names_never_overlap_across_families() {
        let style = style_unlearned_display_name("Cubism");
        let object = object_unlearned_display_name("Cubism");
        assert_ne!(style, object);
        assert_ne!(style, original_display_name());
        assert_ne!(object, original_display_name());
    }

    #[test]
    fn other_models_are_sorted_singleton() {
        let names: Vec<_> = other_model_names().iter().copied().collect();
        assert_eq!(names, vec!["Mickey Mouse"]);
    }

    #[test]
    fn every_family_is_available() {
        assert_eq!(ModelFamily::available(), ModelFamily::ALL.to_vec());
    }

    #[test]
    fn family_choices_are_sorted() {
        let styles = ModelFamily::StyleUnlearned.choices();
        let mut expected = styles.clone();
        expected.sort_unstable();
        assert_eq!(styles, expected);
        assert!(ModelFamily::Original.choices().is_empty());
        assert_eq!(ModelFamily::ObjectUnlearned.choices().len(), 20);
    }

    #[test]
    fn family_round_trips_through_form_value() {
        for family in ModelFamily::ALL {
            assert_eq!(ModelFamily::parse(family.as_str()), Some(family));
        }
        assert_eq!(ModelFamily::parse("Style Unlearned"), None);
    }

    #[test]
    fn selection_requires_known_choice() {
        assert_eq!(
            ModelSelection::from_choice(ModelFamily::StyleUnlearned, Some("Monet")),
            Some(ModelSelection::StyleUnlearned("Monet"))
        );
        assert_eq!(
            ModelSelection::from_choice(ModelFamily::StyleUnlearned, Some("Cats")),
            None
        );
        assert_eq!(
            ModelSelection::from_choice(ModelFamily::ObjectUnlearned, None),
            None
        );
        assert_eq!(
            ModelSelection::from_choice(ModelFamily::Original, Some("ignored")),
            Some(ModelSelection::Original)
        );
    }

    #[test]
    fn selection_display_names() {
        let selection =
            ModelSelection::from_choice(ModelFamily::Other, Some("Mickey Mouse")).unwrap();
        assert_eq!(selection.display_name(), "Mickey Mouse");
        assert_eq!(selection.family(), ModelFamily::Other);

        let selection =
            ModelSelection::from_choice(ModelFamily::ObjectUnlearned, Some("Towers")).unwrap();
        assert_eq!(selection.display_name(), "Object Unlearned (dummy): Towers");
    }
}
