//! Cyrillic to Latin transliteration.
//!
//! Two fixed tables exist. [`GENERAL_TEXT`] covers the whole Russian alphabet
//! and may expand a letter into several Latin letters ("Ж" -> "ZH"). It is
//! used for names, addresses and the brand/model line. [`PLATE_GLYPHS`] only
//! knows the twelve letters allowed on registration plates and maps each to
//! the Latin letter with the same shape, one to one.

mod maps;
mod payload;

pub use maps::{GENERAL_TEXT, PLATE_GLYPHS};
pub use payload::{transliterate_payload, uppercase_payload, TextPayload};

use std::collections::HashMap;

/// Immutable mapping from a single Cyrillic code point to its Latin replacement.
#[derive(Debug)]
pub struct TransliterationMap {
    entries: HashMap<char, &'static str>,
}

impl TransliterationMap {
    pub fn from_pairs(pairs: &[(char, &'static str)]) -> Self {
        Self {
            entries: pairs.iter().copied().collect(),
        }
    }

    pub fn get(&self, ch: char) -> Option<&'static str> {
        self.entries.get(&ch).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Replace every mapped character; unmapped characters pass through unchanged.
pub fn transliterate(text: &str, map: &TransliterationMap) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match map.get(ch) {
            Some(replacement) => out.push_str(replacement),
            None => out.push(ch),
        }
    }
    out
}

/// Locale-invariant uppercasing.
pub fn to_upper(text: &str) -> String {
    text.to_uppercase()
}

/// General transliteration followed by uppercasing, the form every free-text
/// document field is rendered in.
pub fn transliterate_upper(text: &str) -> String {
    to_upper(&transliterate(text, &GENERAL_TEXT))
}
