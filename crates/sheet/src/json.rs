//! JSON grids: the `rawData` shape returned by the scripting endpoint,
//! an array of rows where each row is an array of primitive cells.

use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use crate::sheet::Sheet;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

impl Sheet {
    /// Build a sheet from a JSON array of arrays.
    ///
    /// # Example
    /// ```
    /// use coachdesk_sheet::Sheet;
    ///
    /// let raw = serde_json::json!([["Date", "Field", "Alice"], ["5/1/2024", "Level", 3]]);
    /// let sheet = Sheet::from_json_rows(&raw).unwrap();
    /// assert_eq!(sheet.cell(1, 2).as_str(), "3");
    /// ```
    pub fn from_json_rows(value: &Value) -> Result<Self> {
        let rows = value
            .as_array()
            .ok_or_else(|| SheetError::Parse("grid must be an array of rows".to_string()))?;

        let mut sheet = Sheet::new();
        for (idx, row) in rows.iter().enumerate() {
            match row {
                Value::Array(cells) => sheet.push_row(cells.iter().map(json_value_to_cell).collect()),
                Value::Null => sheet.push_row::<CellValue>(Vec::new()),
                _ => {
                    return Err(SheetError::Parse(format!(
                        "row {idx} must be an array of cells"
                    )))
                }
            }
        }
        Ok(sheet)
    }

    /// Load a sheet from a JSON file holding an array of rows
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let value: Value = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| SheetError::Parse(format!("Invalid JSON: {e}")))?;
        // Accept either the bare grid or the endpoint envelope.
        let grid = value.get("rawData").unwrap_or(&value);
        let mut sheet = Self::from_json_rows(grid)?;
        if let Some(stem) = path.as_ref().file_stem().and_then(|s| s.to_str()) {
            sheet.set_name(stem);
        }
        Ok(sheet)
    }
}

fn json_value_to_cell(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Null,
        Value::Bool(b) => CellValue::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Int(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        Value::String(s) => CellValue::from(s.as_str()),
        // Nested values never come from a sheet range; keep their text.
        Value::Array(_) | Value::Object(_) => CellValue::String(value.to_string()),
    }
}
