//! Unsaved edits layered over the parsed sheet.

use crate::field::FieldKey;
use crate::model::ClassDateEntry;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

/// Pending edits keyed by date, then student, then field.
#[derive(Debug, Clone, Default)]
pub struct EditBuffer {
    edits: HashMap<String, HashMap<String, BTreeMap<FieldKey, String>>>,
}

impl EditBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an edit, replacing any earlier one for the same cell.
    pub fn set(&mut self, date: &str, student: &str, field: FieldKey, value: impl Into<String>) {
        self.edits
            .entry(date.to_string())
            .or_default()
            .entry(student.to_string())
            .or_default()
            .insert(field, value.into());
    }

    /// The unsaved value for a cell, if any.
    #[must_use]
    pub fn pending(&self, date: &str, student: &str, field: FieldKey) -> Option<&str> {
        self.edits
            .get(date)
            .and_then(|students| students.get(student))
            .and_then(|fields| fields.get(&field))
            .map(String::as_str)
    }

    /// Effective value for a student on `entry`'s date: the pending edit,
    /// else the parsed value, else empty.
    #[must_use]
    pub fn value_of(&self, entry: &ClassDateEntry, student: &str, field: FieldKey) -> String {
        self.pending(&entry.date, student, field)
            .unwrap_or_else(|| entry.value(student, field))
            .to_string()
    }

    #[must_use]
    pub fn is_dirty(&self, date: &str) -> bool {
        self.edits
            .get(date)
            .is_some_and(|students| students.values().any(|fields| !fields.is_empty()))
    }

    /// Drop the edits for a date, typically after a successful save.
    pub fn clear(&mut self, date: &str) {
        self.edits.remove(date);
    }
}

/// A `STUDENT.FIELD=VALUE` edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEdit {
    pub student: String,
    pub field: FieldKey,
    pub value: String,
}

impl FromStr for FieldEdit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (target, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected STUDENT.FIELD=VALUE, got '{s}'"))?;
        // Student names may contain dots; the field never does.
        let (student, field) = target
            .rsplit_once('.')
            .ok_or_else(|| format!("expected STUDENT.FIELD before '=', got '{target}'"))?;
        if student.is_empty() {
            return Err(format!("missing student name in '{s}'"));
        }
        Ok(FieldEdit {
            student: student.to_string(),
            field: field.parse()?,
            value: value.to_string(),
        })
    }
}

/// Date text for a session started today: day/month/year, unpadded.
#[must_use]
pub fn new_session_date(today: NaiveDate) -> String {
    today.format("%-d/%-m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StudentDailyProgress;

    fn entry() -> ClassDateEntry {
        let mut entry = ClassDateEntry::unsaved("5/1/2024");
        entry.row_start = 2;
        entry.row_end = 3;
        entry.student_data.insert(
            "Alice".to_string(),
            StudentDailyProgress::new().with(FieldKey::Level, "Rookie"),
        );
        entry
    }

    #[test]
    fn test_value_precedence() {
        let entry = entry();
        let mut edits = EditBuffer::new();
        assert_eq!(edits.value_of(&entry, "Alice", FieldKey::Level), "Rookie");
        assert_eq!(edits.value_of(&entry, "Alice", FieldKey::Homework), "");
        assert_eq!(edits.value_of(&entry, "Nobody", FieldKey::Level), "");

        edits.set("5/1/2024", "Alice", FieldKey::Level, "Trainee");
        assert_eq!(edits.value_of(&entry, "Alice", FieldKey::Level), "Trainee");

        // An explicit empty edit clears the parsed value.
        edits.set("5/1/2024", "Alice", FieldKey::Level, "");
        assert_eq!(edits.value_of(&entry, "Alice", FieldKey::Level), "");
    }

    #[test]
    fn test_edits_are_per_date() {
        let mut edits = EditBuffer::new();
        edits.set("4/1/2024", "Alice", FieldKey::Level, "Boss");
        assert!(edits.is_dirty("4/1/2024"));
        assert!(!edits.is_dirty("5/1/2024"));
        assert_eq!(edits.value_of(&entry(), "Alice", FieldKey::Level), "Rookie");

        edits.clear("4/1/2024");
        assert!(!edits.is_dirty("4/1/2024"));
    }

    #[test]
    fn test_parse_field_edit() {
        let edit: FieldEdit = "Mr. T.level=Rookie".parse().unwrap();
        assert_eq!(edit.student, "Mr. T");
        assert_eq!(edit.field, FieldKey::Level);
        assert_eq!(edit.value, "Rookie");

        let edit: FieldEdit = "Alice.homework=".parse().unwrap();
        assert_eq!(edit.value, "");

        assert!("Alice=3".parse::<FieldEdit>().is_err());
        assert!("Alice.colour=red".parse::<FieldEdit>().is_err());
        assert!(".level=x".parse::<FieldEdit>().is_err());
    }

    #[test]
    fn test_new_session_date_is_unpadded() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(new_session_date(date), "7/3/2026");
    }
}
