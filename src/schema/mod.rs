//! # ObsCore Schema Definition
//!
//! This module defines the Apache Arrow schema of an ObsCore table.
//!
//! ## Static Columns
//!
//! | Column | Type | Note |
//! |--------|------|------|
//! | dataproduct_type | Utf8 | |
//! | dataproduct_subtype | Utf8 | |
//! | facility_name | Utf8 | |
//! | calib_level | Int8 | |
//! | target_name | Utf8 | |
//! | obs_id | Utf8 | |
//! | obs_collection | Utf8 | |
//! | obs_publisher_did | Utf8 | not filled |
//! | access_url | Utf8 | |
//! | access_format | Utf8 | |
//! | s_ra | Float64 | |
//! | s_dec | Float64 | |
//! | s_fov | Float64 | |
//! | s_region | Utf8 | |
//! | s_resolution | Float64 | not filled |
//! | s_xel1 | Int16 | not filled |
//! | s_xel2 | Int16 | not filled |
//! | t_xel | Int16 | not filled |
//! | t_min | Float64 | |
//! | t_max | Float64 | |
//! | t_exptime | Float64 | |
//! | t_resolution | Float64 | not filled |
//! | em_xel | Int16 | not filled |
//! | em_min | Float64 | |
//! | em_max | Float64 | |
//! | em_res_power | Float64 | not filled |
//! | em_filter_name | Utf8 | non-standard |
//! | o_ucd | Utf8 | |
//! | pol_xel | Int16 | not filled |
//! | instrument_name | Utf8 | |
//!
//! Every column is nullable. Columns marked above carry an `obscore:status`
//! field metadata entry.
//!
//! ## Extra Columns
//!
//! Configuration may declare extra columns with constant values. Their type
//! is inferred from the value (bool → Boolean, integer → Int64,
//! float → Float64, string → Utf8) and they are appended after the static
//! columns by [`ObscoreSchema::build`].

mod builders;
/// ObsCore column name constants.
pub mod columns;
mod constants;
mod error;
mod validation;

#[cfg(test)]
mod tests;

pub use builders::{create_static_schema, ObscoreSchema};
pub use constants::*;
pub use error::SchemaError;
pub use validation::{validate_schema, SchemaValidationError};
