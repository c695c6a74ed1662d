//! Item formatting and attention classification
//!
//! Converts one ordered batch of (assignment, status) pairs into validated
//! display items. Output length and order always match the input; the only
//! failure modes are the two per-item validation errors.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::adapter;
use crate::dates::{local_date, month_day, points_display, previous_school_day, weekday_abbrev};
use crate::error::EngineError;
use crate::types::{Assignment, AttentionType, CheckpointStatus, FormatType, GridItem};

/// Convert a batch of (assignment, status) pairs into grid items.
///
/// Validates each item (non-empty id, http(s) URL), builds the bucket-
/// appropriate title, and classifies attention against `as_of`. Pure;
/// same-length, same-order output.
pub fn to_grid_items(
    pairs: &[(&Assignment, CheckpointStatus)],
    format: FormatType,
    as_of: DateTime<Utc>,
    tz: Tz,
) -> Result<Vec<GridItem>, EngineError> {
    // One reference day per call, not per item
    let reference_day = previous_school_day(local_date(as_of, tz));

    pairs
        .iter()
        .map(|&(assignment, status)| build_item(assignment, status, format, reference_day, tz))
        .collect()
}

fn build_item(
    assignment: &Assignment,
    status: CheckpointStatus,
    format: FormatType,
    reference_day: NaiveDate,
    tz: Tz,
) -> Result<GridItem, EngineError> {
    let id = assignment.id.trim();
    if id.is_empty() {
        return Err(EngineError::MissingItemId(assignment.canvas.name.clone()));
    }

    let url = adapter::resolve_url(assignment)
        .filter(|url| adapter::is_http_url(url))
        .ok_or_else(|| EngineError::InvalidItemUrl(assignment.canvas.name.clone()))?;

    let points = assignment.canvas.points_possible.map(|p| p.max(0.0));
    let due_local = assignment.canvas.due_at.map(|due| local_date(due, tz));

    Ok(GridItem {
        id: id.to_string(),
        title: title_for(assignment, points, due_local, format),
        due_at: assignment.canvas.due_at,
        points,
        url: url.to_string(),
        attention_type: classify(status, due_local, reference_day),
    })
}

fn title_for(
    assignment: &Assignment,
    points: Option<f64>,
    due_local: Option<NaiveDate>,
    format: FormatType,
) -> String {
    let name = collapse_whitespace(&assignment.canvas.name);
    let points = points_display(points.unwrap_or(0.0));

    match (format, due_local) {
        (FormatType::Prior, Some(due)) => format!("{}: {} ({})", month_day(due), name, points),
        (FormatType::Next, Some(due)) => format!("{}: {} ({})", weekday_abbrev(due), name, points),
        // Weekday format, and the fallback for undated Prior/Next items
        _ => format!("{name} ({points})"),
    }
}

/// Attention state machine. A Missing assignment due on the last school day
/// gets a question mark (maybe still gradeable); older Missing gets a
/// warning.
fn classify(
    status: CheckpointStatus,
    due_local: Option<NaiveDate>,
    reference_day: NaiveDate,
) -> AttentionType {
    match (status, due_local) {
        (CheckpointStatus::Submitted | CheckpointStatus::Graded, _) => AttentionType::Check,
        (CheckpointStatus::Due, _) => AttentionType::Thumb,
        (CheckpointStatus::Missing, Some(due)) if due == reference_day => AttentionType::Question,
        _ => AttentionType::Warning,
    }
}

fn collapse_whitespace(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}
