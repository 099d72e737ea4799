use std::collections::HashMap;

use crate::model::{ResultSet, StudentSummary, SubjectMarks, SubjectRecord, missing_grade};

/// Grade point for a letter grade. Lower is better: A=1 .. F=6.
///
/// Unrecognized grades (including the "-" placeholder for an absent grade)
/// score 0, which ranks *better* than an F. That matches the system this
/// replaces and is kept for compatibility; see the flagged test below.
pub fn grade_point(grade: &str) -> i64 {
    match grade {
        "A" => 1,
        "B" => 2,
        "C" => 3,
        "D" => 4,
        "E" => 5,
        "F" => 6,
        _ => 0,
    }
}

/// Division points for one student: the sum of grade points over at most the
/// best 7 subjects. With more than 7 subjects the 7 *smallest* point values
/// count (smaller = better), regardless of subject order. The sort is stable
/// on point value; which of several equal-point subjects is picked is
/// unspecified and does not affect the sum.
pub fn division_points(subjects: &[SubjectMarks]) -> i64 {
    let mut points: Vec<i64> = subjects.iter().map(|s| grade_point(&s.grade)).collect();
    if points.len() > 7 {
        points.sort();
        points.truncate(7);
    }
    points.iter().sum()
}

/// Division label for a point total, with the raw points appended for
/// display. Total: every input maps to a label.
pub fn division_label(points: i64) -> String {
    let bucket = match points {
        1..=17 => "Division 1",
        18..=20 => "Division 2",
        21..=24 => "Division 3",
        25..=29 => "Division 4",
        _ => "Division 0",
    };
    format!("{bucket} . {points}")
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

struct StudentGroup {
    name: String,
    number: String,
    by_subject: HashMap<String, SubjectMarks>,
}

/// Collapse flat (student, subject) records into one summary per student.
///
/// The subject union is built in first-observation order and every summary is
/// backfilled to exactly that set. Duplicate (student, subject) pairs merge
/// with a last-write-wins policy: the later record replaces the earlier one
/// outright. Pure and stateless; aggregating the same input twice yields
/// structurally identical output.
pub fn aggregate(records: &[SubjectRecord]) -> ResultSet {
    let mut subjects: Vec<String> = Vec::new();
    let mut student_order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, StudentGroup> = HashMap::new();

    for rec in records {
        if !subjects.iter().any(|s| s == &rec.subject_name) {
            subjects.push(rec.subject_name.clone());
        }
        let group = groups.entry(rec.student_id.clone()).or_insert_with(|| {
            student_order.push(rec.student_id.clone());
            StudentGroup {
                name: rec.student_name.clone(),
                number: rec.student_number.clone(),
                by_subject: HashMap::new(),
            }
        });
        // Last write wins for repeated (student, subject) pairs.
        group.by_subject.insert(
            rec.subject_name.clone(),
            SubjectMarks {
                subject: rec.subject_name.clone(),
                marks: rec.marks,
                grade: rec.grade.clone(),
                parts: rec.parts.clone(),
            },
        );
    }

    let mut students: Vec<StudentSummary> = Vec::with_capacity(student_order.len());
    for id in &student_order {
        let group = &groups[id];
        let subject_marks: Vec<SubjectMarks> = subjects
            .iter()
            .map(|name| {
                group.by_subject.get(name).cloned().unwrap_or(SubjectMarks {
                    subject: name.clone(),
                    marks: 0.0,
                    grade: missing_grade(),
                    parts: Vec::new(),
                })
            })
            .collect();

        let total_marks: f64 = subject_marks.iter().map(|s| s.marks).sum();
        let average = if subjects.is_empty() {
            0.0
        } else {
            round2(total_marks / subjects.len() as f64)
        };
        let points = division_points(&subject_marks);

        students.push(StudentSummary {
            student_id: id.clone(),
            student_name: group.name.clone(),
            student_number: group.number.clone(),
            subjects: subject_marks,
            total_marks,
            average,
            points,
            division: division_label(points),
            position: 0,
        });
    }

    assign_positions(&mut students);

    log::debug!(
        "aggregated {} records into {} students over {} subjects",
        records.len(),
        students.len(),
        subjects.len()
    );

    ResultSet { subjects, students }
}

/// Competition ranking on descending total marks: students with equal totals
/// share a position and the next distinct total skips the tied count
/// (1, 2, 2, 4). Input order is preserved.
pub fn assign_positions(students: &mut [StudentSummary]) {
    let mut order: Vec<usize> = (0..students.len()).collect();
    order.sort_by(|&a, &b| {
        students[b]
            .total_marks
            .partial_cmp(&students[a].total_marks)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut prev_total = f64::NAN;
    let mut prev_position = 0;
    for (rank, &idx) in order.iter().enumerate() {
        let total = students[idx].total_marks;
        let position = if total == prev_total {
            prev_position
        } else {
            rank + 1
        };
        students[idx].position = position;
        prev_total = total;
        prev_position = position;
    }
}
