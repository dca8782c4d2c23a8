//! Field rules for policy submissions.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

use super::models::{PolicyRequest, PolicySubmission, VehicleType};
use crate::document::layout::{DEFAULT_FONT_SIZE, MAX_FONT_SIZE, MIN_FONT_SIZE};
use crate::document::Validator;
use crate::plate::{self, PlateRecord};
use crate::validation::{validate_max_len, validate_required, ValidationError, ValidationErrors};

pub const FIO_MAX_LEN: usize = 200;
pub const ADDRESS_MAX_LEN: usize = 300;
pub const REG_NUMBER_MAX_LEN: usize = 20;
pub const BRAND_MODEL_MAX_LEN: usize = 120;

lazy_static! {
    static ref CYRILLIC_TEXT_RE: Regex = Regex::new(r"^[а-яёА-ЯЁ0-9\s.,\-/№]*$").unwrap();
    static ref DATE_RE: Regex = Regex::new(r"^[0-9]{2}\.[0-9]{2}\.[0-9]{4}$").unwrap();
}

/// Cyrillic letters, digits, whitespace and `. , - / №` only.
pub fn validate_cyrillic_text(value: &str, field: &str, label: &str, errors: &mut ValidationErrors) {
    if !CYRILLIC_TEXT_RE.is_match(value) {
        errors.add(ValidationError::invalid_charset(field, label));
    }
}

/// `DD.MM.YYYY` naming a real calendar day.
pub fn is_valid_date(value: &str) -> bool {
    DATE_RE.is_match(value) && NaiveDate::parse_from_str(value, "%d.%m.%Y").is_ok()
}

pub fn validate_date(value: &str, field: &str, label: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(ValidationError::empty_field(field, label));
    } else if !is_valid_date(value) {
        errors.add(ValidationError::invalid_date_format(field, value));
    }
}

pub fn validate_font_size(value: Option<f32>, field: &str, errors: &mut ValidationErrors) {
    if let Some(size) = value {
        if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&size) {
            errors.add(ValidationError::new(
                field,
                format!(
                    "Размер шрифта должен быть от {} до {}",
                    MIN_FONT_SIZE, MAX_FONT_SIZE
                ),
            ));
        }
    }
}

impl PolicySubmission {
    /// The plate as submitted: the structured record when present, otherwise
    /// `reg_number` parsed for `vehicle_category` (standard by default).
    pub fn resolve_plate(&self) -> Result<PlateRecord, ValidationError> {
        if let Some(record) = &self.license_plate {
            return Ok(record.clone());
        }

        let category = self.vehicle_category.unwrap_or_default();
        match self.reg_number.as_deref() {
            Some(text) if !text.trim().is_empty() => plate::parse(text, category).ok_or_else(|| {
                ValidationError::new(
                    "reg_number",
                    format!(
                        "Номер «{}» не соответствует формату {}",
                        text,
                        plate::format_description(category)
                    ),
                )
            }),
            _ => Err(ValidationError::empty_field("license_plate", "Госномер")),
        }
    }

    /// Validate and convert in one pass.
    pub fn into_request(self) -> Result<PolicyRequest, ValidationErrors> {
        let errors = Validator::validate(&self);
        if !errors.is_empty() {
            return Err(errors);
        }

        let plate = self.resolve_plate().map_err(ValidationErrors::from)?;
        let vehicle_type = self
            .vehicle_type
            .parse::<VehicleType>()
            .map_err(|()| ValidationErrors::from(invalid_vehicle_type(&self.vehicle_type)))?;

        Ok(PolicyRequest {
            fio: self.fio,
            address: self.address,
            date_start: self.date_start,
            date_end: self.date_end,
            plate,
            vehicle_type,
            brand_model: self.brand_model,
            font_size: self.font_size.unwrap_or(DEFAULT_FONT_SIZE),
        })
    }
}

fn invalid_vehicle_type(value: &str) -> ValidationError {
    let allowed: Vec<&str> = VehicleType::ALL.iter().map(|t| t.code()).collect();
    ValidationError::new(
        "vehicle_type",
        format!(
            "Тип ТС «{}» не поддерживается. Допустимые значения: {}",
            value,
            allowed.join(", ")
        ),
    )
}

impl Validator for PolicySubmission {
    /// Validate all input data and collect every problem.
    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        validate_required(&self.fio, "fio", "ФИО", &mut errors);
        validate_max_len(&self.fio, FIO_MAX_LEN, "fio", "ФИО", &mut errors);
        validate_cyrillic_text(&self.fio, "fio", "ФИО", &mut errors);

        validate_required(&self.address, "address", "Адрес", &mut errors);
        validate_max_len(&self.address, ADDRESS_MAX_LEN, "address", "Адрес", &mut errors);
        validate_cyrillic_text(&self.address, "address", "Адрес", &mut errors);

        validate_date(&self.date_start, "date_start", "Дата начала", &mut errors);
        validate_date(&self.date_end, "date_end", "Дата окончания", &mut errors);

        if let Some(reg_number) = &self.reg_number {
            validate_max_len(reg_number, REG_NUMBER_MAX_LEN, "reg_number", "Госномер", &mut errors);
        }
        match self.resolve_plate() {
            Ok(record) => errors.extend(plate::validate(&record)),
            Err(err) => errors.add(err),
        }

        if self.vehicle_type.parse::<VehicleType>().is_err() {
            errors.add(invalid_vehicle_type(&self.vehicle_type));
        }

        validate_max_len(
            &self.brand_model,
            BRAND_MODEL_MAX_LEN,
            "brand_model",
            "Марка и модель",
            &mut errors,
        );
        validate_font_size(self.font_size, "font_size", &mut errors);

        errors
    }
}
