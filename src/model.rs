use serde::{Deserialize, Deserializer, Serialize};

/// One flat input row: a single student's result in a single subject.
/// Records arrive as JSON from a host application, so field names are
/// camelCase and `marks` tolerates numeric strings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRecord {
    pub student_id: String,
    pub student_name: String,
    #[serde(default)]
    pub student_number: String,
    pub subject_name: String,
    #[serde(default, deserialize_with = "lenient_marks")]
    pub marks: f64,
    #[serde(default = "missing_grade")]
    pub grade: String,
    #[serde(default)]
    pub parts: Vec<AssessmentPart>,
}

/// A named sub-assessment mark inside one subject (e.g. "CA 30", "Exam 50").
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentPart {
    pub name: String,
    #[serde(default, deserialize_with = "lenient_marks")]
    pub mark: f64,
}

pub(crate) fn missing_grade() -> String {
    "-".to_string()
}

/// Marks come from form inputs and may be a JSON number or a numeric string.
/// Anything unparseable coerces to 0.0; this is a silent-default policy, not
/// a failure.
fn lenient_marks<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Num(n) => n,
        Raw::Text(s) => s.trim().parse().unwrap_or(0.0),
        Raw::Other(_) => 0.0,
    })
}

/// One subject's result inside a [`StudentSummary`]. Backfilled entries
/// (subjects the student never sat) carry `marks: 0.0`, `grade: "-"` and no
/// parts.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectMarks {
    pub subject: String,
    pub marks: f64,
    pub grade: String,
    pub parts: Vec<AssessmentPart>,
}

/// One aggregated row per student. `subjects` holds exactly the union of
/// subject names seen anywhere in the aggregation run, in first-observation
/// order — the same set and order for every student of that run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub student_id: String,
    pub student_name: String,
    pub student_number: String,
    pub subjects: Vec<SubjectMarks>,
    pub total_marks: f64,
    pub average: f64,
    pub points: i64,
    pub division: String,
    pub position: usize,
}

/// Output of one aggregation run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSet {
    pub subjects: Vec<String>,
    pub students: Vec<StudentSummary>,
}

/// Page geometry in millimetres, top-left origin.
#[derive(Clone, Copy, Debug)]
pub struct PageConfig {
    pub width: f32,
    pub height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
}

impl PageConfig {
    pub fn usable_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    /// Lowest y a row may still end on.
    pub fn printable_bottom(&self) -> f32 {
        self.height - self.margin_bottom
    }
}

impl Default for PageConfig {
    /// A4 landscape with 8.5 mm side margins: 280 mm of usable width.
    fn default() -> Self {
        PageConfig {
            width: 297.0,
            height: 210.0,
            margin_top: 10.0,
            margin_bottom: 10.0,
            margin_left: 8.5,
            margin_right: 8.5,
        }
    }
}

/// Table metrics. Heights and padding in millimetres, font sizes in points.
#[derive(Clone, Copy, Debug)]
pub struct TableStyle {
    pub header_height: f32,
    pub line_height: f32,
    pub cell_padding: f32,
    pub font_size: f32,
    pub header_font_size: f32,
}

impl Default for TableStyle {
    fn default() -> Self {
        TableStyle {
            header_height: 9.0,
            line_height: 5.0,
            cell_padding: 1.5,
            font_size: 9.0,
            header_font_size: 10.0,
        }
    }
}

/// Everything an export call needs besides the records themselves.
#[derive(Clone, Debug)]
pub struct ReportConfig {
    pub page: PageConfig,
    pub table: TableStyle,
    /// Drawn above the table on the first page when set.
    pub title: Option<String>,
    /// Leading component of the output file name.
    pub file_prefix: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            page: PageConfig::default(),
            table: TableStyle::default(),
            title: None,
            file_prefix: "results".to_string(),
        }
    }
}
