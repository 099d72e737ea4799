mod common;

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use common::{MockSurface, Op};
use marksheet_pdf::{
    ReportConfig, SubjectRecord, aggregate, draw_class_results, draw_student_result,
    export_class_results, export_student_result,
};

fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

fn rec(student: &str, name: &str, subject: &str, marks: f64, grade: &str) -> SubjectRecord {
    SubjectRecord {
        student_id: student.to_string(),
        student_name: name.to_string(),
        student_number: format!("S-{student}"),
        subject_name: subject.to_string(),
        marks,
        grade: grade.to_string(),
        parts: Vec::new(),
    }
}

fn sample_records() -> Vec<SubjectRecord> {
    vec![
        rec("s1", "Asha Mushi", "Math", 80.0, "B"),
        rec("s1", "Asha Mushi", "English", 71.0, "B"),
        rec("s1", "Asha Mushi", "Physics", 65.0, "C"),
        rec("s2", "Juma Kondo", "Math", 44.0, "D"),
        rec("s2", "Juma Kondo", "English", 52.0, "C"),
    ]
}

#[test]
fn class_export_writes_a_pdf() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = temp_dir("marksheet-class");
    let config = ReportConfig {
        title: Some("Form IV Results".to_string()),
        file_prefix: "class_results".to_string(),
        ..ReportConfig::default()
    };

    let path = export_class_results(&sample_records(), &config, &dir)
        .expect("export")
        .expect("a file should be produced");

    assert!(path.exists());
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("class_results_"), "{name}");
    assert!(name.ends_with(".pdf"), "{name}");

    let bytes = std::fs::read(&path).expect("read pdf");
    assert!(bytes.starts_with(b"%PDF-"));
    let haystack = String::from_utf8_lossy(&bytes);
    assert!(haystack.contains("Helvetica"));
}

#[test]
fn empty_input_is_a_no_op() {
    let dir = temp_dir("marksheet-empty");
    let config = ReportConfig::default();

    let out = export_class_results(&[], &config, &dir).expect("export");
    assert!(out.is_none());
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
}

#[test]
fn student_export_names_the_file_after_the_student() {
    let dir = temp_dir("marksheet-student");
    let config = ReportConfig::default();

    let path = export_student_result(&sample_records(), "s1", &config, &dir)
        .expect("export")
        .expect("a file should be produced");
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.contains("Asha_Mushi"), "{name}");
    assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF-"));
}

#[test]
fn unknown_student_exports_nothing() {
    let dir = temp_dir("marksheet-missing");
    let config = ReportConfig::default();

    let out = export_student_result(&sample_records(), "nope", &config, &dir).expect("export");
    assert!(out.is_none());
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
}

#[test]
fn class_sheet_renders_every_student_row() {
    let set = aggregate(&sample_records());
    let config = ReportConfig::default();

    let mut surface = MockSurface::new();
    draw_class_results(&mut surface, &set, &config);

    let texts = surface.texts();
    assert!(texts.contains(&"Asha Mushi"));
    assert!(texts.contains(&"Juma Kondo"));
    // Header titles include the subject union and the summary columns.
    for title in ["No", "Name", "Index", "Math", "English", "Physics", "Total", "Average", "Division", "Position"] {
        assert!(texts.contains(&title), "missing header {title}");
    }
    // s2 never sat Physics: totals and averages still come out over the union.
    assert!(texts.contains(&"96"));
    assert!(texts.contains(&"32.00"));
}

#[test]
fn student_sheet_has_summary_trailer() {
    let set = aggregate(&sample_records());
    let asha = set
        .students
        .iter()
        .find(|s| s.student_id == "s1")
        .unwrap();
    let config = ReportConfig::default();

    let mut surface = MockSurface::new();
    draw_student_result(&mut surface, asha, &config);

    let texts = surface.texts();
    assert!(texts.contains(&"Total: 216"));
    assert!(texts.contains(&"Average: 72.00"));
    assert!(texts.contains(&"Division: Division 1 . 7"));
    assert!(texts.contains(&"Position: 1"));
}

#[test]
fn trailer_moves_to_a_fresh_page_when_the_table_ends_low() {
    // 72 single-line subject rows fill two pages to the last row slot
    // (cursor ends at 199 mm against a printable bottom of 200 mm), so the
    // four trailer lines no longer fit and must paginate like a row would.
    let records: Vec<SubjectRecord> = (0..72)
        .map(|i| rec("s1", "Asha Mushi", &format!("Subject {i}"), 50.0, "C"))
        .collect();
    let set = aggregate(&records);
    let config = ReportConfig::default();

    let mut surface = MockSurface::new();
    draw_student_result(&mut surface, &set.students[0], &config);

    // One break inside the table, one for the trailer.
    assert_eq!(surface.page_breaks(), 2);
    assert!(surface.texts().contains(&"Total: 3600"));

    // Nothing — trailer included — may land below the printable bottom.
    let bottom = config.page.printable_bottom();
    for op in &surface.ops {
        if let Op::Text { text, y, .. } = op {
            assert!(
                *y <= bottom,
                "{text:?} drawn at y={y}, below the printable bottom {bottom}"
            );
        }
    }

    // The trailer starts right under the top margin of its own page.
    let total_y = surface
        .ops
        .iter()
        .find_map(|op| match op {
            Op::Text { text, y, .. } if text.starts_with("Total:") => Some(*y),
            _ => None,
        })
        .unwrap();
    assert_eq!(total_y, config.page.margin_top + config.table.line_height);
}
