//! Offline grid source: a class tab exported to disk.

use async_trait::async_trait;
use coachdesk_core::{DeskError, DeskResult, GridSource};
use coachdesk_sheet::{CsvOptions, Sheet, SheetError};
use std::path::PathBuf;

/// Reads class tabs from a CSV/TSV export, a JSON grid or a workbook.
///
/// For workbooks the class name selects the tab; single-grid formats ignore it.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn extension(&self) -> String {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_lowercase()
    }

    /// Tab names when the file is a workbook, `None` otherwise.
    pub fn workbook_tabs(&self) -> DeskResult<Option<Vec<String>>> {
        match self.extension().as_str() {
            "xlsx" | "xlsm" | "xls" | "ods" => Ok(Some(Sheet::xlsx_sheet_names(&self.path)?)),
            _ => Ok(None),
        }
    }
}

#[async_trait]
impl GridSource for FileSource {
    async fn fetch_grid(&self, class_name: &str) -> DeskResult<Sheet> {
        let sheet = match self.extension().as_str() {
            "csv" => Sheet::from_csv(&self.path)?,
            "tsv" => Sheet::from_csv_with_options(&self.path, CsvOptions::tsv())?,
            "json" => Sheet::from_json_file(&self.path)?,
            "xlsx" | "xlsm" | "xls" | "ods" => {
                if class_name.is_empty() {
                    Sheet::from_xlsx(&self.path)?
                } else {
                    Sheet::from_xlsx_sheet(&self.path, class_name)?
                }
            }
            other => {
                return Err(DeskError::Sheet(SheetError::UnsupportedFormat(
                    other.to_string(),
                )))
            }
        };
        tracing::debug!(path = %self.path.display(), rows = sheet.row_count(), "read grid file");
        Ok(sheet)
    }
}
