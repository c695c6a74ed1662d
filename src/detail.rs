//! Detail row flattener
//!
//! Flattens one student's subtree into one row per (course, assignment)
//! with resolved display names, year-aware date strings, and graded-point
//! rollups. The only filter is URL validity: an assignment with no
//! navigable target is dropped silently (upstream data incompleteness,
//! not an error).

use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;

use crate::adapter;
use crate::dates::{clamped_pct, year_aware};
use crate::types::{DetailRow, Student};

/// Column labels paired with [`detail_rows`] output.
pub const DETAIL_HEADER: [&str; 11] = [
    "Student",
    "Course",
    "Teacher",
    "Assignment",
    "Status",
    "Points",
    "Grade",
    "%",
    "Due",
    "Turned in",
    "Graded on",
];

/// Flatten a student's courses into detail rows.
pub fn detail_rows(student: &Student, as_of: DateTime<Utc>, tz: Tz) -> Vec<DetailRow> {
    let reference_year = as_of.with_timezone(&tz).year();
    let student_name = adapter::student_display_name(student);

    let mut rows = Vec::new();
    for course in student.courses.values() {
        let course_name = adapter::course_display_name(course);
        let teacher_name = adapter::teacher_display_name(course);

        for assignment in course.assignments.values() {
            let Some(url) = adapter::resolve_url(assignment) else {
                continue;
            };

            let points_possible = assignment.canvas.points_possible.filter(|p| *p >= 0.0);
            let points_graded = adapter::graded_points(assignment);
            let grade_pct = points_possible
                .filter(|p| *p > 0.0)
                .map(|p| clamped_pct(points_graded, p));

            let display = |instant: Option<DateTime<Utc>>| {
                instant.map(|i| year_aware(i, tz, reference_year))
            };
            let submission = assignment.submissions.values().next();

            rows.push(DetailRow {
                student: student_name.to_string(),
                course: course_name.to_string(),
                teacher: teacher_name.to_string(),
                assignment: assignment.canvas.name.clone(),
                status: assignment.meta.checkpoint_status.clone(),
                points_possible,
                points_graded,
                grade_pct,
                url: url.to_string(),
                due: display(assignment.canvas.due_at),
                submitted: display(submission.and_then(|s| s.submitted_at)),
                graded: display(submission.and_then(|s| s.graded_at)),
            });
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::Los_Angeles;
    use pretty_assertions::assert_eq;

    const AS_OF: &str = "2025-10-08T17:00:00Z";

    fn as_of() -> DateTime<Utc> {
        AS_OF.parse().unwrap()
    }

    fn sample_student_json() -> &'static str {
        r#"{
            "id": "s1",
            "preferredName": "Maya",
            "legalName": "Maya Chen",
            "courses": {
                "c1": {
                    "id": "c1",
                    "shortName": "Algebra",
                    "teacher": "Ms. Rivera",
                    "period": 2,
                    "assignments": {
                        "a1": {
                            "id": "a1",
                            "canvas": {
                                "name": "Graded quiz",
                                "due_at": "2025-10-07T19:00:00Z",
                                "points_possible": 10,
                                "html_url": "https://canvas.test/a1"
                            },
                            "meta": { "checkpointStatus": "Graded" },
                            "submissions": {
                                "sub1": {
                                    "pointsGraded": 9,
                                    "submittedAt": "2025-10-06T22:00:00Z",
                                    "gradedAt": "2024-12-20T19:00:00Z"
                                }
                            }
                        },
                        "a2": {
                            "id": "a2",
                            "link": "notes only, no link",
                            "canvas": { "name": "No url anywhere" },
                            "meta": { "checkpointStatus": "Due" }
                        },
                        "a3": {
                            "id": "a3",
                            "canvas": {
                                "name": "Ungraded survey",
                                "points_possible": 0,
                                "html_url": "https://canvas.test/a3"
                            },
                            "meta": { "checkpointStatus": "Submitted (Late)" }
                        }
                    }
                }
            }
        }"#
    }

    fn sample_student() -> Student {
        serde_json::from_str(sample_student_json()).unwrap()
    }

    #[test]
    fn test_one_row_per_linked_assignment() {
        let rows = detail_rows(&sample_student(), as_of(), Los_Angeles);
        // a2 has no resolvable URL and is dropped
        let names: Vec<_> = rows.iter().map(|r| r.assignment.as_str()).collect();
        assert_eq!(names, vec!["Graded quiz", "Ungraded survey"]);
    }

    #[test]
    fn test_name_resolution() {
        let rows = detail_rows(&sample_student(), as_of(), Los_Angeles);
        assert_eq!(rows[0].student, "Maya");
        assert_eq!(rows[0].course, "Algebra");
        assert_eq!(rows[0].teacher, "Ms. Rivera");
    }

    #[test]
    fn test_points_and_percentage() {
        let rows = detail_rows(&sample_student(), as_of(), Los_Angeles);
        let quiz = &rows[0];
        assert_eq!(quiz.points_possible, Some(10.0));
        assert_eq!(quiz.points_graded, 9.0);
        assert_eq!(quiz.grade_pct, Some(90));

        // Zero points possible: no percentage, never a division
        let survey = &rows[1];
        assert_eq!(survey.points_possible, Some(0.0));
        assert_eq!(survey.grade_pct, None);
    }

    #[test]
    fn test_year_aware_dates() {
        let rows = detail_rows(&sample_student(), as_of(), Los_Angeles);
        let quiz = &rows[0];
        assert_eq!(quiz.due.as_deref(), Some("10/7"));
        assert_eq!(quiz.submitted.as_deref(), Some("10/6"));
        // Graded in a previous year carries the two-digit year
        assert_eq!(quiz.graded.as_deref(), Some("12/20/24"));
    }

    #[test]
    fn test_status_passes_through_verbatim() {
        let rows = detail_rows(&sample_student(), as_of(), Los_Angeles);
        assert_eq!(rows[1].status.as_str(), "Submitted (Late)");
    }

    #[test]
    fn test_header_labels() {
        assert_eq!(DETAIL_HEADER.len(), 11);
        assert_eq!(DETAIL_HEADER[0], "Student");
        assert_eq!(DETAIL_HEADER[7], "%");
        assert_eq!(DETAIL_HEADER[10], "Graded on");
    }
}
