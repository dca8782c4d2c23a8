//! Page positions of the policy fields on the first template page.
//!
//! Coordinates are PDF user-space units measured from the bottom-left corner
//! of the page. The table is fixed; only the x of centered fields depends on
//! the rendered text width.

use serde::Serialize;

pub const DEFAULT_FONT_SIZE: f32 = 8.0;
pub const MIN_FONT_SIZE: f32 = 6.0;
pub const MAX_FONT_SIZE: f32 = 16.0;

const NAME_X: f32 = 45.0;
const NAME_Y: f32 = 340.0;
const ADDRESS_OFFSET: f32 = 8.0;
const DATE_Y: f32 = 615.0;
const VEHICLE_Y: f32 = 535.0;

/// Logical field of the policy form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentField {
    Name,
    Address,
    StartDay,
    StartMonth,
    StartYear,
    EndDay,
    EndMonth,
    EndYear,
    Plate,
    VehicleType,
    BrandModel,
}

impl DocumentField {
    pub const ALL: [DocumentField; 11] = [
        DocumentField::Name,
        DocumentField::Address,
        DocumentField::StartDay,
        DocumentField::StartMonth,
        DocumentField::StartYear,
        DocumentField::EndDay,
        DocumentField::EndMonth,
        DocumentField::EndYear,
        DocumentField::Plate,
        DocumentField::VehicleType,
        DocumentField::BrandModel,
    ];
}

/// Where a field goes on the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Text starts at `x`.
    Left { x: f32, y: f32 },
    /// Text is centered between `band_start` and `band_end`.
    Centered { band_start: f32, band_end: f32, y: f32 },
}

impl Placement {
    pub fn y(&self) -> f32 {
        match *self {
            Placement::Left { y, .. } | Placement::Centered { y, .. } => y,
        }
    }

    /// Starting x for text of the given rendered width.
    pub fn x_for(&self, text_width: f32) -> f32 {
        match *self {
            Placement::Left { x, .. } => x,
            Placement::Centered {
                band_start,
                band_end,
                ..
            } => band_start + (band_end - band_start - text_width) / 2.0,
        }
    }
}

pub fn placement_for(field: DocumentField) -> Placement {
    use DocumentField::*;

    let left = |x: f32, y: f32| Placement::Left { x, y };
    match field {
        Name => left(NAME_X, NAME_Y),
        Address => left(NAME_X, NAME_Y - ADDRESS_OFFSET),
        StartDay => left(56.0, DATE_Y),
        StartMonth => left(100.0, DATE_Y),
        StartYear => left(141.0, DATE_Y),
        EndDay => left(189.0, DATE_Y),
        EndMonth => left(234.0, DATE_Y),
        EndYear => left(273.0, DATE_Y),
        Plate => left(150.0, VEHICLE_Y),
        VehicleType => left(355.0, VEHICLE_Y),
        BrandModel => Placement::Centered {
            band_start: 430.0,
            band_end: 540.0,
            y: VEHICLE_Y,
        },
    }
}

/// Day, month and year of a `DD.MM.YYYY` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParts {
    pub day: String,
    pub month: String,
    pub year: String,
}

/// Slice a `DD.MM.YYYY` date by character offsets 0..2, 3..5 and 6..10.
/// Short input yields short (possibly empty) parts rather than an error.
pub fn slice_date(date: &str) -> DateParts {
    let slice = |start: usize, end: usize| -> String {
        date.chars().skip(start).take(end - start).collect()
    };
    DateParts {
        day: slice(0, 2),
        month: slice(3, 5),
        year: slice(6, 10),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_date() {
        let parts = slice_date("05.03.2024");
        assert_eq!(parts.day, "05");
        assert_eq!(parts.month, "03");
        assert_eq!(parts.year, "2024");
    }

    #[test]
    fn test_slice_short_date() {
        let parts = slice_date("05.0");
        assert_eq!(parts.day, "05");
        assert_eq!(parts.month, "0");
        assert_eq!(parts.year, "");
    }

    #[test]
    fn test_address_is_below_name() {
        let name = placement_for(DocumentField::Name);
        let address = placement_for(DocumentField::Address);
        assert_eq!(name.y() - address.y(), 8.0);
        assert_eq!(name.x_for(100.0), address.x_for(0.0));
    }

    #[test]
    fn test_centered_band() {
        let band = placement_for(DocumentField::BrandModel);
        // 110 wide band, 50 wide text
        assert_eq!(band.x_for(50.0), 460.0);
        assert_eq!(band.x_for(0.0), 485.0);
    }

    #[test]
    fn test_date_slots_share_baseline() {
        let dates = [
            DocumentField::StartDay,
            DocumentField::StartMonth,
            DocumentField::StartYear,
            DocumentField::EndDay,
            DocumentField::EndMonth,
            DocumentField::EndYear,
        ];
        let mut last_x = 0.0;
        for field in dates {
            let placement = placement_for(field);
            assert_eq!(placement.y(), 615.0);
            let x = placement.x_for(0.0);
            assert!(x > last_x);
            last_x = x;
        }
    }
}
