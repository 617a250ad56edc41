//! Terminal output.

use coachdesk_core::{group_by_coach, ClassData, ClassDateEntry, FieldKey, StudentInfo};
use colored::Colorize;

const SEP: &str = " | ";

/// Render one session as a field-by-student table with coach headers.
pub fn session_table(
    class_name: &str,
    entry: &ClassDateEntry,
    students: &[StudentInfo],
    fields: &[FieldKey],
) -> String {
    let mut out = String::new();

    let title = format!("{class_name} - Session {}", entry.date);
    out.push_str(&title.bold().to_string());
    if entry.is_persisted() {
        out.push_str(&format!("  (starting row {})", entry.row_start + 1));
    } else {
        out.push_str(&format!("  {}", "[New]".yellow()));
    }
    out.push('\n');

    if students.is_empty() {
        out.push_str("No students assigned to you in this class.\n");
        return out;
    }

    let label_width = fields
        .iter()
        .map(|f| f.label().len())
        .chain(std::iter::once("Field".len()))
        .max()
        .unwrap_or(0);

    let widths: Vec<usize> = students
        .iter()
        .map(|s| {
            fields
                .iter()
                .map(|f| entry.value(&s.name, *f).chars().count())
                .chain(std::iter::once(s.name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    // Coach header spans its students' columns.
    let mut coach_line = format!("{:label_width$}", "");
    let mut col = 0;
    for group in group_by_coach(students) {
        let span: usize = widths[col..col + group.students.len()].iter().sum::<usize>()
            + SEP.len() * (group.students.len() - 1);
        coach_line.push_str(SEP);
        coach_line.push_str(&pad(&group.coach, span).cyan().to_string());
        col += group.students.len();
    }
    out.push_str(coach_line.trim_end());
    out.push('\n');

    let mut header = pad("Field", label_width);
    for (student, width) in students.iter().zip(&widths) {
        header.push_str(SEP);
        header.push_str(&pad(&student.name, *width).bold().to_string());
    }
    out.push_str(header.trim_end());
    out.push('\n');

    for field in fields {
        let mut line = pad(field.label(), label_width);
        for (student, width) in students.iter().zip(&widths) {
            line.push_str(SEP);
            line.push_str(&pad(entry.value(&student.name, *field), *width));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

/// Render the students and session blocks of a parsed tab.
pub fn class_summary(name: &str, data: &ClassData) -> String {
    let mut out = format!("{}\n", name.bold());

    if data.is_empty() {
        out.push_str("No class layout found (missing Date/Coder header row).\n");
        return out;
    }

    out.push_str(&format!("{} students\n", data.students.len()));
    for group in group_by_coach(&data.students) {
        let names: Vec<&str> = group.students.iter().map(|s| s.name.as_str()).collect();
        out.push_str(&format!("  {}: {}\n", group.coach.cyan(), names.join(", ")));
    }

    out.push_str(&format!("{} sessions\n", data.dates.len()));
    for entry in &data.dates {
        let filled = entry
            .student_data
            .values()
            .filter(|p| !p.is_empty())
            .count();
        out.push_str(&format!(
            "  {:<12} rows {}-{}  ({filled}/{} students with data)\n",
            entry.date,
            entry.row_start + 1,
            entry.row_end + 1,
            entry.student_data.len()
        ));
    }

    out
}

fn pad(text: &str, width: usize) -> String {
    format!("{text:width$}")
}
