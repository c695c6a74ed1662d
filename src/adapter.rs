//! Input model adapter
//!
//! Projects nodes of the normalized tree into the simplified views the
//! engine components consume: display-name fallback chains, deep-link URL
//! resolution, open-status to grid-status conversion, graded-point
//! resolution, and the shared (due date, name) comparator.

use std::cmp::Ordering;

use crate::types::{Assignment, CheckpointStatus, Course, Student};

/// First candidate that is non-empty after trimming, else the fallback.
fn first_named<'a>(candidates: &[Option<&'a str>], fallback: &'a str) -> &'a str {
    candidates
        .iter()
        .flatten()
        .find(|name| !name.trim().is_empty())
        .copied()
        .unwrap_or(fallback)
}

/// Student display name: preferredName → legalName → id.
pub fn student_display_name(student: &Student) -> &str {
    first_named(
        &[
            student.preferred_name.as_deref(),
            student.legal_name.as_deref(),
        ],
        &student.id,
    )
}

/// Course display name: shortName → canvas name → id.
pub fn course_display_name(course: &Course) -> &str {
    first_named(
        &[course.short_name.as_deref(), course.canvas.name.as_deref()],
        &course.id,
    )
}

/// Teacher display name: teacher → instructor → empty string.
pub fn teacher_display_name(course: &Course) -> &str {
    first_named(&[course.teacher.as_deref(), course.instructor.as_deref()], "")
}

pub fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Deep-link URL for an assignment: the Canvas URL when present, else the
/// secondary link when it is a real http(s) URL. `None` means the
/// assignment has no navigable target.
pub fn resolve_url(assignment: &Assignment) -> Option<&str> {
    if let Some(url) = assignment.canvas.html_url.as_deref() {
        if !url.trim().is_empty() {
            return Some(url);
        }
    }
    assignment.link.as_deref().filter(|link| is_http_url(link))
}

/// Closed grid status for an assignment, when its open status converts.
pub fn grid_status(assignment: &Assignment) -> Option<CheckpointStatus> {
    assignment.meta.checkpoint_status.grid_status()
}

/// Graded points for an assignment: the first submission's graded points,
/// falling back to its raw score, defaulting to 0 with no submission.
pub fn graded_points(assignment: &Assignment) -> f64 {
    assignment
        .submissions
        .values()
        .next()
        .map(|s| s.points_graded.or(s.score).unwrap_or(0.0))
        .unwrap_or(0.0)
}

/// Shared bucket/group ordering: ascending due instant (undated last),
/// ties by case-insensitive name.
pub fn due_then_name(a: &Assignment, b: &Assignment) -> Ordering {
    let by_due = match (a.canvas.due_at, b.canvas.due_at) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_due.then_with(|| {
        a.canvas
            .name
            .to_lowercase()
            .cmp(&b.canvas.name.to_lowercase())
    })
}
