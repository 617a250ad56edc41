use crate::cell::CellValue;

static BLANK: CellValue = CellValue::Null;

/// One class tab's used range: a row-major grid of cells.
///
/// Rows may be ragged; reads past the end of a row yield a blank cell
/// instead of an error, matching how a spreadsheet reports trailing empties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    name: String,
    data: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Create a new empty sheet
    #[must_use]
    pub fn new() -> Self {
        Self::with_name("Sheet1")
    }

    /// Create a new empty sheet with a name
    #[must_use]
    pub fn with_name(name: &str) -> Self {
        Sheet {
            name: name.to_string(),
            data: Vec::new(),
        }
    }

    /// Create a sheet from a 2D vector of values
    #[must_use]
    pub fn from_data<T: Into<CellValue>>(data: Vec<Vec<T>>) -> Self {
        let converted: Vec<Vec<CellValue>> = data
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();

        Sheet {
            name: "Sheet1".to_string(),
            data: converted,
        }
    }

    /// Get the sheet name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Get the number of rows
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Width of the widest row.
    #[must_use]
    pub fn col_count(&self) -> usize {
        self.data.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Check if the sheet is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Cells of one row, or `None` past the last row.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[CellValue]> {
        self.data.get(index).map(Vec::as_slice)
    }

    /// Cell at (row, col), blank when outside the used range.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.data
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&BLANK)
    }

    /// Append a row of any length.
    pub fn push_row<T: Into<CellValue>>(&mut self, row: Vec<T>) {
        self.data.push(row.into_iter().map(Into::into).collect());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ragged_rows_read_as_blank() {
        let sheet = Sheet::from_data(vec![vec!["a", "b", "c"], vec!["d"]]);
        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.col_count(), 3);
        assert_eq!(sheet.cell(1, 0), &CellValue::String("d".to_string()));
        assert!(sheet.cell(1, 2).is_null());
        assert!(sheet.cell(9, 9).is_null());
    }

    #[test]
    fn test_push_row() {
        let mut sheet = Sheet::with_name("Monday A");
        sheet.push_row(vec![CellValue::Int(1)]);
        sheet.push_row::<CellValue>(vec![]);
        assert_eq!(sheet.name(), "Monday A");
        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.row(1), Some(&[][..]));
        assert!(sheet.row(2).is_none());
    }
}
