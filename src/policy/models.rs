use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::plate::{PlateCategory, PlateRecord};

/// International vehicle category printed in the policy's type box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum VehicleType {
    /// Car
    A,
    /// Motorcycle
    B,
    /// Lorry or tractor
    C,
    /// Cycle fitted with auxiliary engine
    D,
    /// Bus
    E,
    /// Trailer to car
    F1,
    /// Trailer to lorry
    F2,
    /// Other
    G,
}

impl VehicleType {
    pub const ALL: [VehicleType; 8] = [
        VehicleType::A,
        VehicleType::B,
        VehicleType::C,
        VehicleType::D,
        VehicleType::E,
        VehicleType::F1,
        VehicleType::F2,
        VehicleType::G,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            VehicleType::A => "A",
            VehicleType::B => "B",
            VehicleType::C => "C",
            VehicleType::D => "D",
            VehicleType::E => "E",
            VehicleType::F1 => "F1",
            VehicleType::F2 => "F2",
            VehicleType::G => "G",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for VehicleType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VehicleType::ALL
            .into_iter()
            .find(|t| t.code() == s)
            .ok_or(())
    }
}

/// Policy form as posted by the client. Everything is optional or defaulted
/// here so that missing values surface as validation errors, not as a JSON
/// parse failure.
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
#[serde(default)]
pub struct PolicySubmission {
    /// Full name, Cyrillic
    pub fio: String,
    pub address: String,
    /// `DD.MM.YYYY`
    pub date_start: String,
    /// `DD.MM.YYYY`
    pub date_end: String,
    /// Compact plate text, used when `license_plate` is absent
    pub reg_number: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub license_plate: Option<PlateRecord>,
    pub vehicle_category: Option<PlateCategory>,
    pub vehicle_type: String,
    pub brand_model: String,
    pub font_size: Option<f32>,
}

/// A validated policy ready for assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyRequest {
    pub fio: String,
    pub address: String,
    pub date_start: String,
    pub date_end: String,
    pub plate: PlateRecord,
    pub vehicle_type: VehicleType,
    pub brand_model: String,
    pub font_size: f32,
}
