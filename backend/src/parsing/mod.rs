//! Parsers for the dashboard's tabular inputs.
//!
//! # Parsers
//!
//! - [`csv_parser`]: split raw comma-separated text into a [`Table`] of [`Row`]s
//! - [`fields`]: resolve logical fields across header spellings
//! - [`numeric`]: locale-tolerant numeric coercion
//!
//! # Example
//!
//! ```
//! use yieldmap::parsing::{fields, numeric::to_num, parse_csv};
//!
//! let table = parse_csv("Широта,Долгота\n55.75,37.61\n");
//! let lat = to_num(fields::LATITUDE.pick(&table.rows[0]));
//! assert_eq!(lat, Some(55.75));
//! ```

pub mod csv_parser;
pub mod fields;
pub mod numeric;

#[cfg(test)]
mod csv_parser_tests;

pub use csv_parser::{parse_csv, Row, Table};
pub use fields::{pick, FieldSpec};
pub use numeric::to_num;
