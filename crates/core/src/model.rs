//! Typed view of one class tab.

use crate::field::FieldKey;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Coach attributed to students whose coach header cannot be determined.
pub const UNKNOWN_COACH: &str = "Unknown Coach";

/// Row marker for a session that exists only client-side.
pub const UNSAVED_ROW: i64 = -1;

/// A student column of the class tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentInfo {
    pub name: String,
    pub coach: String,
}

impl StudentInfo {
    pub fn new(name: impl Into<String>, coach: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            coach: coach.into(),
        }
    }
}

/// Field values for one student on one session date.
///
/// A missing field reads as the empty string, and equality follows that
/// rule, so `{level: ""}` equals `{}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentDailyProgress {
    values: BTreeMap<FieldKey, String>,
}

impl StudentDailyProgress {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a field, empty when never set.
    #[must_use]
    pub fn get(&self, field: FieldKey) -> &str {
        self.values.get(&field).map_or("", String::as_str)
    }

    pub fn set(&mut self, field: FieldKey, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Builder form of [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, field: FieldKey, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// True when every field reads as empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.values().all(String::is_empty)
    }
}

impl PartialEq for StudentDailyProgress {
    fn eq(&self, other: &Self) -> bool {
        FieldKey::ALL
            .into_iter()
            .all(|field| self.get(field) == other.get(field))
    }
}

impl Eq for StudentDailyProgress {}

/// One session date block of the tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDateEntry {
    /// Date text exactly as the sheet shows it.
    pub date: String,
    /// Zero-based first row of the block, or [`UNSAVED_ROW`].
    pub row_start: i64,
    /// Zero-based last row of the block, or [`UNSAVED_ROW`].
    pub row_end: i64,
    pub student_data: IndexMap<String, StudentDailyProgress>,
}

impl ClassDateEntry {
    /// Entry for a date the sheet does not have yet.
    #[must_use]
    pub fn unsaved(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            row_start: UNSAVED_ROW,
            row_end: UNSAVED_ROW,
            student_data: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.row_start != UNSAVED_ROW
    }

    /// Progress record of a student, if the block carries one.
    #[must_use]
    pub fn progress(&self, student: &str) -> Option<&StudentDailyProgress> {
        self.student_data.get(student)
    }

    /// Parsed value of a field, empty when absent.
    #[must_use]
    pub fn value(&self, student: &str, field: FieldKey) -> &str {
        self.progress(student).map_or("", |p| p.get(field))
    }
}

/// Everything parsed from one class tab. Rebuilt on every load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassData {
    /// Students in column order.
    pub students: Vec<StudentInfo>,
    /// Session blocks in row order, newest first as the sheet is kept.
    pub dates: Vec<ClassDateEntry>,
}

impl ClassData {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty() && self.dates.is_empty()
    }

    /// First block with exactly this date text.
    #[must_use]
    pub fn entry(&self, date: &str) -> Option<&ClassDateEntry> {
        self.dates.iter().find(|d| d.date == date)
    }

    /// The matching block, or a synthesized unsaved one.
    #[must_use]
    pub fn entry_or_new(&self, date: &str) -> ClassDateEntry {
        self.entry(date)
            .cloned()
            .unwrap_or_else(|| ClassDateEntry::unsaved(date))
    }

    /// Row where the block for `date` starts, [`UNSAVED_ROW`] when absent.
    #[must_use]
    pub fn row_start_for(&self, date: &str) -> i64 {
        self.entry(date).map_or(UNSAVED_ROW, |e| e.row_start)
    }

    /// Date selected when a class is opened: the topmost block.
    #[must_use]
    pub fn default_date(&self) -> Option<&str> {
        self.dates.first().map(|d| d.date.as_str())
    }
}
