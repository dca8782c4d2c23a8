//! Validation, canonical form and parsing of registration plates.

use lazy_static::lazy_static;
use regex::Regex;

use super::models::{
    PlateCategory, PlateRecord, PlateToken, StandardPlate, TokenKind, TrailerPlate, TwoLinePlate,
};
use crate::validation::{ValidationError, ValidationErrors};

/// Cyrillic letters allowed on plates (ГОСТ Р 50577-2018).
pub const ALLOWED_LETTERS: &str = "АВЕКМНОРСТУХ";

lazy_static! {
    static ref STANDARD_RE: Regex =
        Regex::new(r"^([АВЕКМНОРСТУХ])([0-9]{3})([АВЕКМНОРСТУХ]{2})([0-9]{2,3})$").unwrap();
    static ref TRAILER_RE: Regex =
        Regex::new(r"^([АВЕКМНОРСТУХ]{2})([0-9]{4})([0-9]{2,3})$").unwrap();
    static ref TWO_LINE_RE: Regex =
        Regex::new(r"^([0-9]{4})([АВЕКМНОРСТУХ]{2})([0-9]{2,3})$").unwrap();
}

pub fn is_allowed_letter(ch: char) -> bool {
    ALLOWED_LETTERS.contains(ch)
}

/// Check every token of the record and collect all problems.
///
/// Rules per token, in order: missing, wrong length, wrong character set,
/// and for the region token additionally all zeros and the 1..=999 range.
/// Only the first failing rule of a token is reported, but every token is
/// checked.
pub fn validate(record: &PlateRecord) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for token in record.tokens() {
        if let Some(error) = check_token(&token) {
            errors.add(error);
        }
    }
    errors
}

fn check_token(token: &PlateToken<'_>) -> Option<ValidationError> {
    let PlateToken {
        field,
        label,
        kind,
        value,
    } = *token;

    if value.is_empty() {
        return Some(ValidationError::new(
            field,
            format!("Не заполнено поле «{}»", label),
        ));
    }

    let len = value.chars().count();
    match kind {
        TokenKind::Letters(expected) => {
            if len != expected {
                return Some(ValidationError::new(
                    field,
                    format!(
                        "Поле «{}» должно содержать ровно {} {}",
                        label,
                        expected,
                        if expected == 1 { "букву" } else { "буквы" }
                    ),
                ));
            }
            value.chars().find(|c| !is_allowed_letter(*c)).map(|bad| {
                ValidationError::new(
                    field,
                    format!(
                        "Буква «{}» не разрешена в поле «{}». Используйте: {}",
                        bad, label, ALLOWED_LETTERS
                    ),
                )
            })
        }
        TokenKind::Digits(expected) => {
            if len != expected {
                return Some(ValidationError::new(
                    field,
                    format!("Поле «{}» должно содержать ровно {} цифры", label, expected),
                ));
            }
            if !value.chars().all(|c| c.is_ascii_digit()) {
                return Some(ValidationError::new(
                    field,
                    format!("Поле «{}» должно содержать только цифры", label),
                ));
            }
            None
        }
        TokenKind::Region => check_region(field, value, len),
    }
}

fn check_region(field: &str, value: &str, len: usize) -> Option<ValidationError> {
    if !(2..=3).contains(&len) {
        return Some(ValidationError::new(
            field,
            "Код региона должен содержать 2 или 3 цифры",
        ));
    }
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Some(ValidationError::new(
            field,
            "Код региона должен содержать только цифры",
        ));
    }
    if value.chars().all(|c| c == '0') {
        return Some(ValidationError::new(
            field,
            "Код региона не может состоять только из нулей",
        ));
    }
    match value.parse::<u32>() {
        Ok(code) if (1..=999).contains(&code) => None,
        _ => Some(ValidationError::new(
            field,
            "Код региона должен быть в диапазоне от 1 до 999",
        )),
    }
}

/// Concatenate the tokens with no separators.
///
/// Returns an empty string while any token is still empty, meaning the
/// plate is not complete yet.
pub fn canonicalize(record: &PlateRecord) -> String {
    let tokens = record.tokens();
    if tokens.iter().any(|t| t.value.is_empty()) {
        return String::new();
    }
    tokens.iter().map(|t| t.value).collect()
}

/// Parse a compact plate string for `category`.
///
/// Whitespace is removed and letters are uppercased first. `None` means the
/// text does not (yet) form a plate of that category.
pub fn parse(text: &str, category: PlateCategory) -> Option<PlateRecord> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();

    match category {
        PlateCategory::Standard => {
            let caps = STANDARD_RE.captures(&cleaned)?;
            Some(PlateRecord::Standard(StandardPlate {
                letter1: caps[1].to_string(),
                digits: caps[2].to_string(),
                letters: caps[3].to_string(),
                region: caps[4].to_string(),
            }))
        }
        PlateCategory::Trailer => {
            let caps = TRAILER_RE.captures(&cleaned)?;
            Some(PlateRecord::Trailer(TrailerPlate {
                trailer_letters: caps[1].to_string(),
                trailer_digits: caps[2].to_string(),
                region: caps[3].to_string(),
            }))
        }
        PlateCategory::Tractor | PlateCategory::Motorcycle => {
            let caps = TWO_LINE_RE.captures(&cleaned)?;
            let plate = TwoLinePlate {
                top_digits: caps[1].to_string(),
                bottom_letters: caps[2].to_string(),
                bottom_region: caps[3].to_string(),
            };
            Some(if category == PlateCategory::Tractor {
                PlateRecord::Tractor(plate)
            } else {
                PlateRecord::Motorcycle(plate)
            })
        }
    }
}

/// Compact plate string split into the part before the region and the
/// trailing two characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlateText {
    pub main: String,
    pub region: String,
}

impl std::fmt::Display for PlateText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.main, self.region)
    }
}

/// Positional split of a compact plate string: the last two characters are
/// the region, the rest is the main part. Not grammar-aware, so a three
/// digit region leaves its first digit in `main`.
pub fn split_region(compact: &str) -> PlateText {
    let chars: Vec<char> = compact.chars().collect();
    let cut = chars.len().saturating_sub(2);
    PlateText {
        main: chars[..cut].iter().collect(),
        region: chars[cut..].iter().collect(),
    }
}

/// Uppercase and keep only plate letters.
pub fn filter_letters(input: &str) -> String {
    input
        .to_uppercase()
        .chars()
        .filter(|c| is_allowed_letter(*c))
        .collect()
}

/// Keep only ASCII digits.
pub fn filter_digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub fn is_valid_region(region: &str) -> bool {
    let len = region.chars().count();
    check_region("region", region, len).is_none()
}

/// A sample plate of `category` as typed into the form.
pub fn example_for(category: PlateCategory) -> &'static str {
    match category {
        PlateCategory::Standard => "А123ВС77",
        PlateCategory::Trailer => "ММ976877",
        PlateCategory::Tractor => "1234АВ77",
        PlateCategory::Motorcycle => "5678ВС77",
    }
}

pub fn format_description(category: PlateCategory) -> &'static str {
    match category {
        PlateCategory::Standard => "L NNN LL | RR(R) - буква, 3 цифры, 2 буквы, код региона",
        PlateCategory::Trailer => "LL NNNN | RR(R) - 2 буквы, 4 цифры, код региона",
        PlateCategory::Tractor | PlateCategory::Motorcycle => {
            "Верх: NNNN, Низ: LL RR(R) - 4 цифры, 2 буквы, код региона"
        }
    }
}
