use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use crate::sheet::Sheet;
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::from(s.as_str()),
        // Date cells keep the workbook's own text; the session date is
        // never normalized into a calendar type.
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => CellValue::String(naive.format("%-m/%-d/%Y").to_string()),
            None => CellValue::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) => CellValue::String(s.clone()),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(format!("#ERROR: {e:?}")),
    }
}

impl Sheet {
    /// Names of all tabs in a workbook, in workbook order.
    pub fn xlsx_sheet_names<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
        let workbook = open_workbook_auto(path.as_ref())
            .map_err(|e| SheetError::Workbook(e.to_string()))?;
        Ok(workbook.sheet_names().to_vec())
    }

    /// Load one tab of a workbook (xlsx, xls or ods) by name.
    ///
    /// The grid starts at A1 even when the used range does not, so row
    /// indices line up with the sheet's own row numbers minus one.
    pub fn from_xlsx_sheet<P: AsRef<Path>>(path: P, sheet_name: &str) -> Result<Self> {
        let mut workbook = open_workbook_auto(path.as_ref())
            .map_err(|e| SheetError::Workbook(e.to_string()))?;

        if !workbook.sheet_names().iter().any(|n| n == sheet_name) {
            return Err(SheetError::SheetNotFound {
                name: sheet_name.to_string(),
            });
        }

        let range = workbook
            .worksheet_range(sheet_name)
            .map_err(|e| SheetError::Workbook(e.to_string()))?;

        let mut sheet = Sheet::with_name(sheet_name);
        let (row_offset, col_offset) = range
            .start()
            .map_or((0, 0), |(r, c)| (r as usize, c as usize));

        for _ in 0..row_offset {
            sheet.push_row::<CellValue>(Vec::new());
        }
        for row in range.rows() {
            let mut cells = vec![CellValue::Null; col_offset];
            cells.extend(row.iter().map(data_to_cell_value));
            sheet.push_row(cells);
        }

        Ok(sheet)
    }

    /// Load the first tab of a workbook.
    pub fn from_xlsx<P: AsRef<Path>>(path: P) -> Result<Self> {
        let names = Self::xlsx_sheet_names(path.as_ref())?;
        match names.first() {
            Some(first) => Self::from_xlsx_sheet(path, first),
            None => Ok(Sheet::new()),
        }
    }
}
