//! Progress aggregator
//!
//! Groups one student's eligible assignments by course, then by status,
//! with earned/possible/percentage rollups at every level. Eligibility is
//! a single shared filter: Vector-type assignments are excluded entirely,
//! and only graded, submitted, or overdue-missing work enters the totals.

use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;

use crate::adapter;
use crate::dates::{percent_display, year_aware};
use crate::types::{
    Assignment, Course, CourseProgress, ProgressAssignment, ProgressTable, StatusGroupProgress,
    StudentTree,
};

/// Build the progress rollup for one student, or `None` when the student
/// does not exist in the tree.
pub fn progress_table(
    tree: &StudentTree,
    student_id: &str,
    as_of: DateTime<Utc>,
    tz: Tz,
) -> Option<ProgressTable> {
    let student = tree.student(student_id)?;
    let reference_year = as_of.with_timezone(&tz).year();

    let mut courses: Vec<&Course> = student.courses.values().collect();
    courses.sort_by(|a, b| {
        let period = |c: &Course| c.period.unwrap_or(u32::MAX);
        period(a).cmp(&period(b)).then_with(|| {
            adapter::course_display_name(a)
                .to_lowercase()
                .cmp(&adapter::course_display_name(b).to_lowercase())
        })
    });

    let mut rollup = ProgressTable {
        student_id: student.id.clone(),
        student_name: adapter::student_display_name(student).to_string(),
        courses: Vec::with_capacity(courses.len()),
        earned: 0.0,
        possible: 0.0,
        percent: String::new(),
    };

    for course in courses {
        let progress = course_progress(course, as_of, tz, reference_year);
        rollup.earned += progress.earned;
        rollup.possible += progress.possible;
        rollup.courses.push(progress);
    }
    rollup.percent = percent_display(rollup.earned, rollup.possible);
    Some(rollup)
}

fn course_progress(
    course: &Course,
    as_of: DateTime<Utc>,
    tz: Tz,
    reference_year: i32,
) -> CourseProgress {
    let mut eligible: Vec<&Assignment> = course
        .assignments
        .values()
        .filter(|a| is_eligible(a, as_of))
        .collect();
    eligible.sort_by(|a, b| adapter::due_then_name(a, b));

    // Stable group partition: status priority first, then the shared
    // (due, name) order already applied above
    eligible.sort_by_key(|a| a.meta.checkpoint_status.priority());

    let mut groups: Vec<StatusGroupProgress> = Vec::new();
    for assignment in eligible {
        let status = &assignment.meta.checkpoint_status;
        if groups.last().map(|g| &g.status) != Some(status) {
            groups.push(StatusGroupProgress {
                status: status.clone(),
                assignments: Vec::new(),
                earned: 0.0,
                possible: 0.0,
                percent: String::new(),
            });
        }
        let earned = if earns_points(assignment) {
            adapter::graded_points(assignment)
        } else {
            0.0
        };
        if let Some(group) = groups.last_mut() {
            group.possible += assignment.canvas.points_possible.unwrap_or(0.0).max(0.0);
            group.earned += earned;
            group.assignments.push(ProgressAssignment {
                id: assignment.id.clone(),
                name: assignment.canvas.name.clone(),
                status: status.clone(),
                points_possible: assignment.canvas.points_possible.filter(|p| *p >= 0.0),
                points_earned: earned,
                due: assignment
                    .canvas
                    .due_at
                    .map(|due| year_aware(due, tz, reference_year)),
            });
        }
    }

    let mut progress = CourseProgress {
        course_id: course.id.clone(),
        course_name: adapter::course_display_name(course).to_string(),
        period: course.period,
        groups,
        earned: 0.0,
        possible: 0.0,
        percent: String::new(),
    };
    for group in progress.groups.iter_mut() {
        group.percent = percent_display(group.earned, group.possible);
        progress.earned += group.earned;
        progress.possible += group.possible;
    }
    progress.percent = percent_display(progress.earned, progress.possible);
    progress
}

/// Shared eligibility filter for both the course and status groupings.
fn is_eligible(assignment: &Assignment, as_of: DateTime<Utc>) -> bool {
    if assignment.meta.assignment_type.as_deref() == Some("Vector") {
        return false;
    }
    match assignment.meta.checkpoint_status.as_str() {
        "Graded" | "Submitted" | "Submitted (Late)" => true,
        "Missing" => assignment
            .canvas
            .due_at
            .map(|due| due < as_of)
            .unwrap_or(false),
        _ => false,
    }
}

/// Missing work stays in the denominator but never earns points.
fn earns_points(assignment: &Assignment) -> bool {
    matches!(
        assignment.meta.checkpoint_status.as_str(),
        "Graded" | "Submitted" | "Submitted (Late)"
    )
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

    fn sample_tree_json() -> &'static str {
        r#"{
            "students": {
                "s1": {
                    "id": "s1",
                    "preferredName": "Maya",
                    "courses": {
                        "c-art": {
                            "id": "c-art",
                            "shortName": "Art",
                            "period": 5,
                            "assignments": {
                                "a1": {
                                    "id": "a1",
                                    "canvas": {
                                        "name": "Sketchbook",
                                        "due_at": "2025-10-03T19:00:00Z",
                                        "points_possible": 20,
                                        "html_url": "https://canvas.test/a1"
                                    },
                                    "meta": { "checkpointStatus": "Graded" },
                                    "submissions": { "sub1": { "pointsGraded": 18 } }
                                }
                            }
                        },
                        "c-alg": {
                            "id": "c-alg",
                            "shortName": "Algebra",
                            "period": 2,
                            "assignments": {
                                "b1": {
                                    "id": "b1",
                                    "canvas": {
                                        "name": "Overdue worksheet",
                                        "due_at": "2025-10-02T19:00:00Z",
                                        "points_possible": 10,
                                        "html_url": "https://canvas.test/b1"
                                    },
                                    "meta": { "checkpointStatus": "Missing" }
                                },
                                "b2": {
                                    "id": "b2",
                                    "canvas": {
                                        "name": "Late essay",
                                        "due_at": "2025-10-06T19:00:00Z",
                                        "points_possible": 10,
                                        "html_url": "https://canvas.test/b2"
                                    },
                                    "meta": { "checkpointStatus": "Submitted (Late)" },
                                    "submissions": { "sub1": { "score": 8 } }
                                },
                                "b3": {
                                    "id": "b3",
                                    "canvas": {
                                        "name": "Practice vector",
                                        "points_possible": 100,
                                        "html_url": "https://canvas.test/b3"
                                    },
                                    "meta": {
                                        "checkpointStatus": "Graded",
                                        "assignmentType": "Vector"
                                    }
                                },
                                "b4": {
                                    "id": "b4",
                                    "canvas": {
                                        "name": "Future missing",
                                        "due_at": "2025-10-20T19:00:00Z",
                                        "points_possible": 10,
                                        "html_url": "https://canvas.test/b4"
                                    },
                                    "meta": { "checkpointStatus": "Missing" }
                                },
                                "b5": {
                                    "id": "b5",
                                    "canvas": {
                                        "name": "Unsubmitted, no date",
                                        "points_possible": 10,
                                        "html_url": "https://canvas.test/b5"
                                    },
                                    "meta": { "checkpointStatus": "Due" }
                                }
                            }
                        }
                    }
                }
            }
        }"#
    }

    fn sample_tree() -> StudentTree {
        serde_json::from_str(sample_tree_json()).unwrap()
    }

    #[test]
    fn test_unknown_student_is_none() {
        assert!(progress_table(&sample_tree(), "ghost", as_of(), Los_Angeles).is_none());
    }

    #[test]
    fn test_courses_ordered_by_period() {
        let table = progress_table(&sample_tree(), "s1", as_of(), Los_Angeles).unwrap();
        let names: Vec<_> = table.courses.iter().map(|c| c.course_name.as_str()).collect();
        assert_eq!(names, vec!["Algebra", "Art"]);
    }

    #[test]
    fn test_eligibility_filter() {
        let table = progress_table(&sample_tree(), "s1", as_of(), Los_Angeles).unwrap();
        let algebra = &table.courses[0];
        let ids: Vec<_> = algebra
            .groups
            .iter()
            .flat_map(|g| g.assignments.iter().map(|a| a.id.as_str()))
            .collect();
        // b3 (Vector), b4 (Missing but not yet due), b5 (Due) are excluded
        assert_eq!(ids, vec!["b1", "b2"]);
    }

    #[test]
    fn test_status_groups_follow_priority_order() {
        let table = progress_table(&sample_tree(), "s1", as_of(), Los_Angeles).unwrap();
        let statuses: Vec<_> = table.courses[0]
            .groups
            .iter()
            .map(|g| g.status.as_str())
            .collect();
        assert_eq!(statuses, vec!["Missing", "Submitted (Late)"]);
    }

    #[test]
    fn test_missing_counts_toward_possible_not_earned() {
        let table = progress_table(&sample_tree(), "s1", as_of(), Los_Angeles).unwrap();
        let algebra = &table.courses[0];
        assert_eq!(algebra.possible, 20.0);
        assert_eq!(algebra.earned, 8.0);
        assert_eq!(algebra.percent, "40%");

        let missing = &algebra.groups[0];
        assert_eq!(missing.possible, 10.0);
        assert_eq!(missing.earned, 0.0);
        assert_eq!(missing.percent, "0%");
    }

    #[test]
    fn test_student_totals_roll_up() {
        let table = progress_table(&sample_tree(), "s1", as_of(), Los_Angeles).unwrap();
        assert_eq!(table.student_name, "Maya");
        assert_eq!(table.possible, 40.0);
        assert_eq!(table.earned, 26.0);
        assert_eq!(table.percent, "65%");
    }

    #[test]
    fn test_empty_course_percent_guards_zero() {
        let mut tree = sample_tree();
        tree.students
            .get_mut("s1")
            .unwrap()
            .courses
            .get_mut("c-art")
            .unwrap()
            .assignments
            .clear();

        let table = progress_table(&tree, "s1", as_of(), Los_Angeles).unwrap();
        let art = table.courses.iter().find(|c| c.course_name == "Art").unwrap();
        assert!(art.groups.is_empty());
        assert_eq!(art.percent, "—");
    }

    #[test]
    fn test_idempotent() {
        let tree = sample_tree();
        let first = progress_table(&tree, "s1", as_of(), Los_Angeles).unwrap();
        let second = progress_table(&tree, "s1", as_of(), Los_Angeles).unwrap();
        assert_eq!(first, second);
    }
}
