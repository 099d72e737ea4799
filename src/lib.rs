mod aggregate;
mod error;
mod fonts;
mod model;
mod pdf;
mod report;
mod surface;

pub use aggregate::{aggregate, assign_positions, division_label, division_points, grade_point};
pub use error::Error;
pub use model::{
    AssessmentPart, PageConfig, ReportConfig, ResultSet, StudentSummary, SubjectMarks,
    SubjectRecord, TableStyle,
};
pub use pdf::PdfSurface;
pub use report::table::{ColumnSpec, ColumnWidth, TableLayout, resolve_column_widths};
pub use report::{draw_class_results, draw_student_result, report_file_name, subject_cell_text};
pub use surface::{FontStyle, RenderSurface};

use std::path::{Path, PathBuf};
use std::time::Instant;

/// Aggregate `records` and write the class result sheet into `output_dir`.
///
/// Returns the path of the written file, or `Ok(None)` when there is nothing
/// to export (empty record set) — that case produces no file and no error.
pub fn export_class_results(
    records: &[SubjectRecord],
    config: &ReportConfig,
    output_dir: &Path,
) -> Result<Option<PathBuf>, Error> {
    let t0 = Instant::now();

    let set = aggregate(records);
    if set.students.is_empty() {
        log::info!("class results: nothing to export");
        return Ok(None);
    }
    let t_aggregate = t0.elapsed();

    let mut surface = PdfSurface::new(&config.page);
    report::draw_class_results(&mut surface, &set, config);
    let pages = surface.page_count();
    let t_layout = t0.elapsed();

    let name = report_file_name(&config.file_prefix, None, today());
    let path = output_dir.join(name);
    surface.save(&path)?;

    log::info!(
        "class results: {} students, {} pages; aggregate={:.1}ms, layout={:.1}ms, total={:.1}ms",
        set.students.len(),
        pages,
        t_aggregate.as_secs_f64() * 1000.0,
        (t_layout - t_aggregate).as_secs_f64() * 1000.0,
        t0.elapsed().as_secs_f64() * 1000.0,
    );

    Ok(Some(path))
}

/// Write a single student's result sheet into `output_dir`.
///
/// The sheet covers only that student's own records (the subject union is
/// theirs alone). Returns `Ok(None)` when the student has no records.
pub fn export_student_result(
    records: &[SubjectRecord],
    student_id: &str,
    config: &ReportConfig,
    output_dir: &Path,
) -> Result<Option<PathBuf>, Error> {
    let t0 = Instant::now();

    let own: Vec<SubjectRecord> = records
        .iter()
        .filter(|r| r.student_id == student_id)
        .cloned()
        .collect();
    let set = aggregate(&own);
    let Some(student) = set.students.first() else {
        log::info!("student result: no records for {student_id}, nothing to export");
        return Ok(None);
    };

    let mut surface = PdfSurface::new(&config.page);
    report::draw_student_result(&mut surface, student, config);

    let name = report_file_name(
        &config.file_prefix,
        Some(student.student_name.as_str()),
        today(),
    );
    let path = output_dir.join(name);
    surface.save(&path)?;

    log::info!(
        "student result for {}: {} subjects; total={:.1}ms",
        student.student_id,
        student.subjects.len(),
        t0.elapsed().as_secs_f64() * 1000.0,
    );

    Ok(Some(path))
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
