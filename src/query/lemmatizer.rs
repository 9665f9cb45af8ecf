//! Reduce surface words to a dictionary base form.
//!
//! Lemmatization is best-effort: a word the lemmatizer does not recognize
//! comes back unchanged so no search term is ever dropped.

/// Maps a lower-cased surface word to its base form
pub trait Lemmatizer: Send + Sync {
    fn lemmatize(&self, word: &str) -> String;
}

/// Returns every word unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityLemmatizer;

impl Lemmatizer for IdentityLemmatizer {
    fn lemmatize(&self, word: &str) -> String {
        word.to_string()
    }
}

/// Irregular forms common in recipe names and cooking verbs
const IRREGULAR: &[(&str, &str)] = &[
    ("ate", "eat"),
    ("baked", "bake"),
    ("boiled", "boil"),
    ("braised", "braise"),
    ("brownies", "brownie"),
    ("calves", "calf"),
    ("children", "child"),
    ("chopped", "chop"),
    ("cooked", "cook"),
    ("cookies", "cookie"),
    ("eaten", "eat"),
    ("feet", "foot"),
    ("fried", "fry"),
    ("geese", "goose"),
    ("grilled", "grill"),
    ("halves", "half"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("loaves", "loaf"),
    ("made", "make"),
    ("mashed", "mash"),
    ("men", "man"),
    ("mice", "mouse"),
    ("pies", "pie"),
    ("poached", "poach"),
    ("roasted", "roast"),
    ("shoes", "shoe"),
    ("smoked", "smoke"),
    ("smoothies", "smoothie"),
    ("steamed", "steam"),
    ("stewed", "stew"),
    ("stuffed", "stuff"),
    ("teeth", "tooth"),
    ("toes", "toe"),
    ("veggies", "veggie"),
    ("wolves", "wolf"),
    ("women", "woman"),
];

/// Words that look plural but are not
const INVARIANT: &[&str] = &[
    "asparagus",
    "bass",
    "brussels",
    "christmas",
    "couscous",
    "grits",
    "hummus",
    "molasses",
    "news",
    "octopus",
    "swiss",
];

/// Rule-based English lemmatizer: an irregular-form table followed by
/// conservative plural suffix rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishLemmatizer;

impl EnglishLemmatizer {
    pub fn new() -> Self {
        Self
    }

    fn singularize(word: &str) -> Option<String> {
        // Short words ("gas", "bus", "yes") are left alone
        if word.chars().count() <= 3 {
            return None;
        }

        if let Some(stem) = word.strip_suffix("ies") {
            return Some(format!("{stem}y"));
        }

        if let Some(stem) = word.strip_suffix("oes") {
            return Some(format!("{stem}o"));
        }

        for suffix in ["sses", "ches", "shes", "xes"] {
            if word.ends_with(suffix) {
                return Some(word[..word.len() - 2].to_string());
            }
        }

        if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
            return None;
        }

        word.strip_suffix('s').map(str::to_string)
    }
}

impl Lemmatizer for EnglishLemmatizer {
    fn lemmatize(&self, word: &str) -> String {
        if let Ok(idx) = IRREGULAR.binary_search_by(|(form, _)| form.cmp(&word)) {
            return IRREGULAR[idx].1.to_string();
        }

        if INVARIANT.binary_search(&word).is_ok() {
            return word.to_string();
        }

        Self::singularize(word).unwrap_or_else(|| word.to_string())
    }
}
