//! Registration plate grammar for the four plate layouts.

pub mod grammar;
pub mod models;

pub use grammar::{
    canonicalize, example_for, filter_digits, filter_letters, format_description,
    is_valid_region, parse, split_region, validate, PlateText, ALLOWED_LETTERS,
};
pub use models::{PlateCategory, PlateRecord, StandardPlate, TrailerPlate, TwoLinePlate};

#[cfg(test)]
mod mod_tests;
