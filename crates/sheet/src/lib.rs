//! Grid types for coachdesk
//!
//! A class tab arrives as an untyped, possibly ragged 2-D range of cells.
//! This crate models that range as a [`Sheet`] of [`CellValue`]s and loads
//! it from the places a tab can come from: the scripting endpoint's JSON
//! `rawData`, a CSV export, or a downloaded workbook.
//!
//! # Examples
//!
//! ```
//! use coachdesk_sheet::{CellValue, Sheet};
//!
//! let sheet = Sheet::from_data(vec![
//!     vec!["", "", "Coach Lee"],
//!     vec!["Date", "Field", "Alice"],
//! ]);
//!
//! assert_eq!(sheet.row_count(), 2);
//! assert_eq!(sheet.cell(1, 2), &CellValue::String("Alice".to_string()));
//! assert!(sheet.cell(5, 5).is_blank());
//! ```
//!
//! ## Loading from CSV
//!
//! ```no_run
//! use coachdesk_sheet::Sheet;
//!
//! let sheet = Sheet::from_csv("monday-a.csv").unwrap();
//! ```

mod cell;
mod csv;
mod error;
mod json;
mod sheet;
mod xlsx;

/// Re-export cell value type.
pub use cell::CellValue;
/// Re-export CSV options.
pub use csv::CsvOptions;
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export sheet type.
pub use sheet::Sheet;
