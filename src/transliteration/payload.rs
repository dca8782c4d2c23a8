//! Preview helpers for the form: the same tables the document uses, applied
//! to whichever text fields the client sent.

use serde::Deserialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

use super::{to_upper, transliterate, GENERAL_TEXT, PLATE_GLYPHS};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct TextPayload {
    pub fio: Option<String>,
    pub address: Option<String>,
    pub reg_number: Option<String>,
    pub text: Option<String>,
}

/// For `fio`, `address` and `text` emit the uppercased transliteration under
/// the key itself and the raw transliteration under `<key>_transliterated`.
/// `reg_number` goes through the plate table and is not uppercased.
pub fn transliterate_payload(payload: &TextPayload) -> BTreeMap<String, String> {
    let mut result = BTreeMap::new();

    let general = [
        ("fio", &payload.fio),
        ("address", &payload.address),
        ("text", &payload.text),
    ];
    for (key, value) in general {
        if let Some(value) = value {
            let raw = transliterate(value, &GENERAL_TEXT);
            result.insert(key.to_string(), to_upper(&raw));
            result.insert(format!("{key}_transliterated"), raw);
        }
    }

    if let Some(reg_number) = &payload.reg_number {
        let plate = transliterate(reg_number, &PLATE_GLYPHS);
        result.insert("reg_number".to_string(), plate.clone());
        result.insert("reg_number_transliterated".to_string(), plate);
    }

    result
}

/// Uppercase `fio`, `address` and `text` without transliterating them.
pub fn uppercase_payload(payload: &TextPayload) -> BTreeMap<String, String> {
    [
        ("fio", &payload.fio),
        ("address", &payload.address),
        ("text", &payload.text),
    ]
    .into_iter()
    .filter_map(|(key, value)| value.as_ref().map(|v| (key.to_string(), to_upper(v))))
    .collect()
}
