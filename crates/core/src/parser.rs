//! Grid parser: rebuilds students and session blocks from a class tab.
//!
//! Expected layout, zero-based:
//!
//! ```text
//! row h-1:  |      |       | Coach Lee |     |     | Coach Kim |
//! row h:    | Date | Field | Alice     | Bob | Cy  | Dee       |
//! row h+1:  | 5/1  | Level | Rookie    | ... |     |           |
//! row h+2:  |      | Homework | Done   | ... |     |           |
//! row h+3:  | 4/1  | Level | ...       |     |     |           |
//! ```
//!
//! Column A starts a session block, column B labels the field held by the
//! row, and students occupy columns C onward. Coach names sit above the first
//! student of each group and carry forward to the right.

use crate::field::map_field_label;
use crate::model::{ClassData, ClassDateEntry, StudentDailyProgress, StudentInfo, UNKNOWN_COACH};
use coachdesk_sheet::Sheet;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::mem;

/// Rows scanned for the student header.
const HEADER_SCAN_ROWS: usize = 10;

/// First column holding a student; A and B are labels.
const FIRST_STUDENT_COL: usize = 2;

const DATE_COL: usize = 0;
const LABEL_COL: usize = 1;

/// Parse one class tab.
///
/// Never fails: a tab without a recognizable header parses to an empty
/// [`ClassData`], and missing cells read as empty strings.
///
/// # Examples
///
/// ```
/// use coachdesk_core::{parse_class_data, FieldKey};
/// use coachdesk_sheet::Sheet;
///
/// let sheet = Sheet::from_data(vec![
///     vec!["", "", "Coach Lee"],
///     vec!["Date", "Field", "Alice"],
///     vec!["5/1/2024", "Level", "Rookie"],
/// ]);
/// let data = parse_class_data(&sheet);
/// assert_eq!(data.students[0].coach, "Coach Lee");
/// assert_eq!(data.dates[0].value("Alice", FieldKey::Level), "Rookie");
/// ```
#[must_use]
pub fn parse_class_data(sheet: &Sheet) -> ClassData {
    if sheet.row_count() < 2 {
        tracing::debug!(rows = sheet.row_count(), "grid too short to hold a class");
        return ClassData::default();
    }

    let Some(header_row) = find_student_header(sheet) else {
        tracing::warn!(
            sheet = sheet.name(),
            "no student header row in the first {HEADER_SCAN_ROWS} rows"
        );
        return ClassData::default();
    };
    tracing::debug!(sheet = sheet.name(), header_row, "located student header");

    let students = extract_students(sheet, header_row);
    let dates = extract_date_blocks(sheet, header_row, &students);

    ClassData { students, dates }
}

/// First row whose column A mentions "date" or column B mentions "coder".
fn find_student_header(sheet: &Sheet) -> Option<usize> {
    (0..sheet.row_count().min(HEADER_SCAN_ROWS)).find(|&row| {
        sheet.cell(row, DATE_COL).contains_ignore_case("date")
            || sheet.cell(row, LABEL_COL).contains_ignore_case("coder")
    })
}

fn extract_students(sheet: &Sheet, header_row: usize) -> Vec<StudentInfo> {
    // A header on the very first row has no coach row above it.
    let coach_row = header_row.checked_sub(1);
    let width = sheet.row(header_row).map_or(0, <[_]>::len);

    let mut students = Vec::new();
    let mut current_coach = UNKNOWN_COACH.to_string();
    let mut seen = HashSet::new();

    for col in FIRST_STUDENT_COL..width {
        let name_cell = sheet.cell(header_row, col);
        if name_cell.is_blank() {
            continue;
        }

        if let Some(row) = coach_row {
            let coach_cell = sheet.cell(row, col);
            if !coach_cell.is_blank() {
                current_coach = coach_cell.as_str();
            }
        }

        let name = name_cell.as_str();
        if !seen.insert(name.clone()) {
            tracing::warn!(
                student = %name,
                col,
                "duplicate student name; later column overwrites earlier values"
            );
        }
        students.push(StudentInfo::new(name, current_coach.clone()));
    }

    students
}

/// Block accumulation state while walking rows below the header.
enum BlockState {
    Idle,
    Open(ClassDateEntry),
}

struct BlockCollector<'a> {
    students: &'a [StudentInfo],
    state: BlockState,
    blocks: Vec<ClassDateEntry>,
}

impl<'a> BlockCollector<'a> {
    fn new(students: &'a [StudentInfo]) -> Self {
        Self {
            students,
            state: BlockState::Idle,
            blocks: Vec::new(),
        }
    }

    /// Close the current block, then start a new one at `row`.
    fn open(&mut self, date: String, row: usize) {
        self.flush();

        let student_data: IndexMap<String, StudentDailyProgress> = self
            .students
            .iter()
            .map(|s| (s.name.clone(), StudentDailyProgress::new()))
            .collect();

        self.state = BlockState::Open(ClassDateEntry {
            date,
            row_start: row as i64,
            row_end: row as i64,
            student_data,
        });
    }

    /// Apply a labelled row to the open block, if any.
    fn field_row(&mut self, sheet: &Sheet, row: usize, label: &str) {
        let BlockState::Open(entry) = &mut self.state else {
            return;
        };

        // Unmapped labels still belong to the block's physical extent.
        entry.row_end = row as i64;

        let Some(field) = map_field_label(label) else {
            tracing::debug!(row, label, "unrecognized field label");
            return;
        };

        // Values are read by the student's position in the extracted order.
        for (pos, student) in self.students.iter().enumerate() {
            let value = sheet.cell(row, FIRST_STUDENT_COL + pos).as_str();
            entry
                .student_data
                .entry(student.name.clone())
                .or_default()
                .set(field, value);
        }
    }

    fn flush(&mut self) {
        if let BlockState::Open(entry) = mem::replace(&mut self.state, BlockState::Idle) {
            tracing::debug!(
                date = %entry.date,
                row_start = entry.row_start,
                row_end = entry.row_end,
                "closed session block"
            );
            self.blocks.push(entry);
        }
    }

    fn finish(mut self) -> Vec<ClassDateEntry> {
        self.flush();
        self.blocks
    }
}

fn extract_date_blocks(
    sheet: &Sheet,
    header_row: usize,
    students: &[StudentInfo],
) -> Vec<ClassDateEntry> {
    let mut collector = BlockCollector::new(students);

    for row in (header_row + 1)..sheet.row_count() {
        let date_cell = sheet.cell(row, DATE_COL);
        if !date_cell.is_blank() {
            collector.open(date_cell.as_str(), row);
        }

        let label_cell = sheet.cell(row, LABEL_COL);
        if !label_cell.is_blank() {
            collector.field_row(sheet, row, &label_cell.as_str());
        }
    }

    collector.finish()
}
