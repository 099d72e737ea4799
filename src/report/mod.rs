//! Result-sheet assembly: column sets, cell text, file naming, drawing.

pub mod table;

use chrono::NaiveDate;

use crate::model::{ReportConfig, ResultSet, StudentSummary, SubjectMarks};
use crate::surface::{FontStyle, RenderSurface};
use table::{ColumnSpec, TableLayout};

/// Placeholder for a missing or blank student name in file names.
const NAME_PLACEHOLDER: &str = "student";

/// Fixed columns framing the per-subject dynamic ones. Their widths sum to
/// 136 mm, leaving 144 mm for subjects on the default A4-landscape page.
fn class_columns(subjects: &[String]) -> Vec<ColumnSpec> {
    let mut columns = vec![
        ColumnSpec::fixed("No", 10.0),
        ColumnSpec::fixed("Name", 40.0),
        ColumnSpec::fixed("Index", 22.0),
    ];
    for subject in subjects {
        columns.push(ColumnSpec::dynamic(subject));
    }
    columns.push(ColumnSpec::fixed("Total", 16.0));
    columns.push(ColumnSpec::fixed("Average", 16.0));
    columns.push(ColumnSpec::fixed("Division", 20.0));
    columns.push(ColumnSpec::fixed("Position", 12.0));
    columns
}

/// Marks print without a fractional part when whole ("80"), otherwise with
/// up to two decimals ("80.5").
fn fmt_marks(marks: f64) -> String {
    if marks == marks.trunc() {
        format!("{}", marks as i64)
    } else {
        let s = format!("{marks:.2}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Display text for one subject cell: the non-empty sub-assessment parts
/// ("name mark", joined by " - "), then the final marks on their own line
/// when non-zero. Empty when the student has neither — backfilled subjects
/// render as blank cells.
pub fn subject_cell_text(subject: &SubjectMarks) -> String {
    let parts_line = subject
        .parts
        .iter()
        .filter(|p| !p.name.trim().is_empty())
        .map(|p| format!("{} {}", p.name.trim(), fmt_marks(p.mark)))
        .collect::<Vec<_>>()
        .join(" - ");

    let final_line = if subject.marks != 0.0 {
        Some(fmt_marks(subject.marks))
    } else {
        None
    };

    match (parts_line.is_empty(), final_line) {
        (false, Some(fin)) => format!("{parts_line}\n{fin}"),
        (false, None) => parts_line,
        (true, Some(fin)) => fin,
        (true, None) => String::new(),
    }
}

fn class_rows(set: &ResultSet) -> Vec<Vec<String>> {
    set.students
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let mut row = vec![
                (i + 1).to_string(),
                s.student_name.clone(),
                s.student_number.clone(),
            ];
            row.extend(s.subjects.iter().map(subject_cell_text));
            row.push(fmt_marks(s.total_marks));
            row.push(format!("{:.2}", s.average));
            row.push(s.division.clone());
            row.push(s.position.to_string());
            row
        })
        .collect()
}

/// `<prefix>_<sanitized-name>_<iso-date>.pdf`, or `<prefix>_<iso-date>.pdf`
/// without a student component. Spaces become underscores; a blank name
/// falls back to a fixed placeholder.
pub fn report_file_name(prefix: &str, student_name: Option<&str>, date: NaiveDate) -> String {
    let date = date.format("%Y-%m-%d");
    match student_name {
        Some(name) => {
            let trimmed = name.trim();
            let component = if trimmed.is_empty() {
                NAME_PLACEHOLDER.to_string()
            } else {
                trimmed.replace(' ', "_")
            };
            format!("{prefix}_{component}_{date}.pdf")
        }
        None => format!("{prefix}_{date}.pdf"),
    }
}

/// Draw the optional title line and return the cursor the table starts at.
fn draw_title<S: RenderSurface>(surface: &mut S, config: &ReportConfig) -> f32 {
    let Some(title) = config.title.as_deref() else {
        return config.page.margin_top;
    };
    surface.set_font(FontStyle::Bold);
    surface.set_font_size(config.table.header_font_size + 2.0);
    surface.draw_text(title, config.page.margin_left, config.page.margin_top + 5.0);
    config.page.margin_top + 9.0
}

/// Class result sheet: one row per student, one dynamic column per subject.
pub fn draw_class_results<S: RenderSurface>(
    surface: &mut S,
    set: &ResultSet,
    config: &ReportConfig,
) {
    let columns = class_columns(&set.subjects);
    let layout = TableLayout::new(&config.page, &config.table, &columns);
    let start = draw_title(surface, config);
    layout.draw(surface, &class_rows(set), start);
}

/// Single-student sheet: one row per subject, trailed by the summary lines.
pub fn draw_student_result<S: RenderSurface>(
    surface: &mut S,
    student: &StudentSummary,
    config: &ReportConfig,
) {
    let columns = vec![
        ColumnSpec::fixed("Subject", 60.0),
        ColumnSpec::dynamic("Assessments"),
        ColumnSpec::fixed("Marks", 25.0),
        ColumnSpec::fixed("Grade", 20.0),
    ];
    let rows: Vec<Vec<String>> = student
        .subjects
        .iter()
        .map(|s| {
            vec![
                s.subject.clone(),
                s.parts
                    .iter()
                    .filter(|p| !p.name.trim().is_empty())
                    .map(|p| format!("{} {}", p.name.trim(), fmt_marks(p.mark)))
                    .collect::<Vec<_>>()
                    .join(" - "),
                fmt_marks(s.marks),
                s.grade.clone(),
            ]
        })
        .collect();

    let layout = TableLayout::new(&config.page, &config.table, &columns);
    let start = draw_title(surface, config);
    let end = layout.draw(surface, &rows, start);

    let st = &config.table;
    let trailer = [
        format!("Total: {}", fmt_marks(student.total_marks)),
        format!("Average: {:.2}", student.average),
        format!("Division: {}", student.division),
        format!("Position: {}", student.position),
    ];

    // The trailer paginates like a row: when the table ends too close to the
    // printable bottom, it moves to a fresh page instead of dropping off it.
    let trailer_height = st.line_height * trailer.len() as f32;
    let base = if end + trailer_height > config.page.printable_bottom() {
        surface.add_page();
        config.page.margin_top
    } else {
        end
    };
    for (i, line) in trailer.iter().enumerate() {
        surface.draw_text(
            line,
            config.page.margin_left + st.cell_padding,
            base + st.line_height * (i as f32 + 1.0),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AssessmentPart;

    fn subject(marks: f64, parts: Vec<AssessmentPart>) -> SubjectMarks {
        SubjectMarks {
            subject: "Math".to_string(),
            marks,
            grade: "B".to_string(),
            parts,
        }
    }

    fn part(name: &str, mark: f64) -> AssessmentPart {
        AssessmentPart {
            name: name.to_string(),
            mark,
        }
    }

    #[test]
    fn subject_cell_joins_parts_and_final() {
        let s = subject(80.0, vec![part("CA", 30.0), part("Exam", 50.0)]);
        assert_eq!(subject_cell_text(&s), "CA 30 - Exam 50\n80");
    }

    #[test]
    fn subject_cell_skips_zero_final() {
        let s = subject(0.0, vec![part("CA", 30.0)]);
        assert_eq!(subject_cell_text(&s), "CA 30");
    }

    #[test]
    fn subject_cell_empty_when_nothing_to_show() {
        assert_eq!(subject_cell_text(&subject(0.0, vec![])), "");
    }

    #[test]
    fn subject_cell_final_only() {
        assert_eq!(subject_cell_text(&subject(62.5, vec![])), "62.5");
    }

    #[test]
    fn file_name_sanitizes_spaces() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
        assert_eq!(
            report_file_name("results", Some("Asha Juma Mushi"), date),
            "results_Asha_Juma_Mushi_2026-08-29.pdf"
        );
    }

    #[test]
    fn file_name_falls_back_on_blank_name() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
        assert_eq!(
            report_file_name("results", Some("   "), date),
            "results_student_2026-08-29.pdf"
        );
        assert_eq!(
            report_file_name("results", None, date),
            "results_2026-08-29.pdf"
        );
    }

    #[test]
    fn marks_format_trims_trailing_zeros() {
        assert_eq!(fmt_marks(80.0), "80");
        assert_eq!(fmt_marks(80.5), "80.5");
        assert_eq!(fmt_marks(33.33), "33.33");
    }
}
