use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use utoipa::ToSchema;

use crate::validation::ValidationError;

/// Legally distinct plate layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PlateCategory {
    /// Passenger car: `А123ВС77`
    #[default]
    Standard,
    /// Trailer: `ММ976877`
    Trailer,
    /// Two-line tractor plate: `1234АВ77`
    Tractor,
    /// Two-line motorcycle plate: `5678ВС77`
    Motorcycle,
}

impl PlateCategory {
    pub const ALL: [PlateCategory; 4] = [
        PlateCategory::Standard,
        PlateCategory::Trailer,
        PlateCategory::Tractor,
        PlateCategory::Motorcycle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlateCategory::Standard => "standard",
            PlateCategory::Trailer => "trailer",
            PlateCategory::Tractor => "tractor",
            PlateCategory::Motorcycle => "motorcycle",
        }
    }
}

impl fmt::Display for PlateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `L NNN LL | RR(R)`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct StandardPlate {
    pub letter1: String,
    pub digits: String,
    pub letters: String,
    pub region: String,
}

/// `LL NNNN | RR(R)`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct TrailerPlate {
    pub trailer_letters: String,
    pub trailer_digits: String,
    pub region: String,
}

/// Top line `NNNN`, bottom line `LL RR(R)`. Shared by tractors and motorcycles.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct TwoLinePlate {
    pub top_digits: String,
    pub bottom_letters: String,
    pub bottom_region: String,
}

/// A registration plate, one variant per category so fields of different
/// layouts can never be mixed. On the wire the variant is selected by the
/// `category` key, as the form sends it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum PlateRecord {
    Standard(StandardPlate),
    Trailer(TrailerPlate),
    Tractor(TwoLinePlate),
    Motorcycle(TwoLinePlate),
}

/// What a plate token may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Exactly `n` letters from the plate alphabet.
    Letters(usize),
    /// Exactly `n` ASCII digits.
    Digits(usize),
    /// Two or three ASCII digits, not all zero.
    Region,
}

/// One token of a plate in declared order.
#[derive(Debug, Clone, Copy)]
pub struct PlateToken<'a> {
    /// Wire name of the field, used in validation errors.
    pub field: &'static str,
    pub label: &'static str,
    pub kind: TokenKind,
    pub value: &'a str,
}

impl PlateRecord {
    /// Read a record from loosely shaped JSON, reporting a missing or unknown
    /// `category` as a validation error instead of a deserialization failure.
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let category = value
            .get("category")
            .and_then(Value::as_str)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| ValidationError::new("category", "Не указана категория"))?;

        if !PlateCategory::ALL.iter().any(|c| c.as_str() == category) {
            return Err(ValidationError::new(
                "category",
                "Неизвестная категория транспортного средства",
            ));
        }

        serde_json::from_value(value.clone())
            .map_err(|e| ValidationError::new("license_plate", format!("Некорректный госномер: {}", e)))
    }

    pub fn category(&self) -> PlateCategory {
        match self {
            PlateRecord::Standard(_) => PlateCategory::Standard,
            PlateRecord::Trailer(_) => PlateCategory::Trailer,
            PlateRecord::Tractor(_) => PlateCategory::Tractor,
            PlateRecord::Motorcycle(_) => PlateCategory::Motorcycle,
        }
    }

    /// Tokens from first structural field to last.
    pub fn tokens(&self) -> Vec<PlateToken<'_>> {
        match self {
            PlateRecord::Standard(p) => vec![
                PlateToken {
                    field: "letter1",
                    label: "Первая буква",
                    kind: TokenKind::Letters(1),
                    value: &p.letter1,
                },
                PlateToken {
                    field: "digits",
                    label: "Цифры номера",
                    kind: TokenKind::Digits(3),
                    value: &p.digits,
                },
                PlateToken {
                    field: "letters",
                    label: "Буквы номера",
                    kind: TokenKind::Letters(2),
                    value: &p.letters,
                },
                PlateToken {
                    field: "region",
                    label: "Код региона",
                    kind: TokenKind::Region,
                    value: &p.region,
                },
            ],
            PlateRecord::Trailer(p) => vec![
                PlateToken {
                    field: "trailerLetters",
                    label: "Буквы номера прицепа",
                    kind: TokenKind::Letters(2),
                    value: &p.trailer_letters,
                },
                PlateToken {
                    field: "trailerDigits",
                    label: "Цифры номера прицепа",
                    kind: TokenKind::Digits(4),
                    value: &p.trailer_digits,
                },
                PlateToken {
                    field: "region",
                    label: "Код региона",
                    kind: TokenKind::Region,
                    value: &p.region,
                },
            ],
            PlateRecord::Tractor(p) | PlateRecord::Motorcycle(p) => vec![
                PlateToken {
                    field: "topDigits",
                    label: "Цифры верхней строки",
                    kind: TokenKind::Digits(4),
                    value: &p.top_digits,
                },
                PlateToken {
                    field: "bottomLetters",
                    label: "Буквы нижней строки",
                    kind: TokenKind::Letters(2),
                    value: &p.bottom_letters,
                },
                PlateToken {
                    field: "bottomRegion",
                    label: "Код региона",
                    kind: TokenKind::Region,
                    value: &p.bottom_region,
                },
            ],
        }
    }

    /// Apply `f` to every letter field, leaving digit fields untouched.
    pub fn map_letters<F>(&self, f: F) -> PlateRecord
    where
        F: Fn(&str) -> String,
    {
        match self {
            PlateRecord::Standard(p) => PlateRecord::Standard(StandardPlate {
                letter1: f(&p.letter1),
                letters: f(&p.letters),
                ..p.clone()
            }),
            PlateRecord::Trailer(p) => PlateRecord::Trailer(TrailerPlate {
                trailer_letters: f(&p.trailer_letters),
                ..p.clone()
            }),
            PlateRecord::Tractor(p) => PlateRecord::Tractor(TwoLinePlate {
                bottom_letters: f(&p.bottom_letters),
                ..p.clone()
            }),
            PlateRecord::Motorcycle(p) => PlateRecord::Motorcycle(TwoLinePlate {
                bottom_letters: f(&p.bottom_letters),
                ..p.clone()
            }),
        }
    }
}
