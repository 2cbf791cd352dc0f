use crate::personality::taxonomy::{TraitCategory, FALLBACK_CATEGORY, LABEL_RULES};

/// Maps a free-text trait description to exactly one taxonomy label.
///
/// Case-insensitive substring containment, evaluated rule by rule in
/// [`LABEL_RULES`] order. Returns [`FALLBACK_CATEGORY`] when nothing matches.
pub fn label_description(description: &str) -> TraitCategory {
    let desc = description.to_lowercase();
    LABEL_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| desc.contains(kw)))
        .map(|(category, _)| *category)
        .unwrap_or(FALLBACK_CATEGORY)
}
