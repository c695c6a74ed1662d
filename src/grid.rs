//! Weekly grid builder
//!
//! Partitions every course's assignments into Prior / Mon-Fri / Next /
//! NoDate buckets around the Monday of `as_of`'s week, formats each bucket
//! through the item formatter, and aggregates attention counts per course
//! and per student.
//!
//! Weekend policy: the Next window is `(friday, monday + 11d]`, so an
//! assignment due on the current week's Saturday or Sunday lands in Next
//! Week rather than being dropped.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;

use crate::adapter;
use crate::dates::{local_date, month_day, points_display, resolve_tz, week_monday};
use crate::error::EngineError;
use crate::formatter::to_grid_items;
use crate::types::{
    Assignment, AttentionCounts, CheckpointStatus, Course, CourseRow, FormatType, GridHeader,
    GridItem, NoDateBucket, Student, StudentSummary, StudentTree, StudentWeekly, WeeklyGrid,
    WeeklyGridsResult,
};

/// Horizon of the Next bucket: next Friday, 11 days past the week anchor.
const NEXT_WINDOW_DAYS: i64 = 11;

/// Build the weekly grid for every student in the tree, keyed by student id.
pub fn weekly_grids(
    tree: &StudentTree,
    as_of: DateTime<Utc>,
    tz: Tz,
) -> Result<WeeklyGridsResult, EngineError> {
    let monday = week_monday(as_of, tz);

    let mut result = WeeklyGridsResult::new();
    for (student_id, student) in &tree.students {
        result.insert(student_id.clone(), student_weekly(student, monday, as_of, tz)?);
    }
    Ok(result)
}

/// Column index (2..=6) highlighting `as_of`'s weekday, or `None` when
/// `as_of` falls on a weekend or the timezone does not resolve.
pub fn today_column(as_of: DateTime<Utc>, timezone: &str) -> Option<usize> {
    let tz = resolve_tz(timezone).ok()?;
    weekday_column(local_date(as_of, tz))
}

fn weekday_column(date: NaiveDate) -> Option<usize> {
    match date.weekday() {
        Weekday::Sat | Weekday::Sun => None,
        weekday => Some(2 + weekday.num_days_from_monday() as usize),
    }
}

fn student_weekly(
    student: &Student,
    monday: NaiveDate,
    as_of: DateTime<Utc>,
    tz: Tz,
) -> Result<StudentWeekly, EngineError> {
    let mut rows = Vec::with_capacity(student.courses.len());
    let mut summary = StudentSummary::default();

    for course in student.courses.values() {
        let row = course_row(student, course, monday, as_of, tz)?;
        summary.attention_counts.add(&row.attention_counts);
        summary.total_items += row.total_items;
        rows.push(row);
    }

    let grid = WeeklyGrid {
        header: build_header(student, &summary, monday, as_of, tz),
        rows,
    };
    Ok(StudentWeekly { summary, grid })
}

fn build_header(
    student: &Student,
    summary: &StudentSummary,
    monday: NaiveDate,
    as_of: DateTime<Utc>,
    tz: Tz,
) -> GridHeader {
    let counts = &summary.attention_counts;
    let student_header = format!(
        "{} — ⚠️:{} / ❓:{} / 👍:{} / ✅:{}",
        adapter::student_display_name(student),
        counts.warning,
        counts.question,
        counts.thumb,
        counts.check,
    );

    let day = |offset: i64| month_day(monday + Duration::days(offset));
    let columns = [
        "Class Name".to_string(),
        "Prior Weeks".to_string(),
        format!("Mon ({})", day(0)),
        format!("Tue ({})", day(1)),
        format!("Wed ({})", day(2)),
        format!("Thu ({})", day(3)),
        format!("Fri ({})", day(4)),
        "Next Week".to_string(),
        "No Date".to_string(),
    ];

    GridHeader {
        student_header,
        columns,
        monday,
        timezone: tz.name().to_string(),
        today_column: weekday_column(local_date(as_of, tz)),
    }
}

/// Per-course bucket partition before formatting.
#[derive(Default)]
struct Buckets<'a> {
    prior: Vec<(&'a Assignment, CheckpointStatus)>,
    weekdays: [Vec<(&'a Assignment, CheckpointStatus)>; 5],
    next: Vec<(&'a Assignment, CheckpointStatus)>,
    no_date_count: u32,
    no_date_points: f64,
}

fn course_row(
    student: &Student,
    course: &Course,
    monday: NaiveDate,
    as_of: DateTime<Utc>,
    tz: Tz,
) -> Result<CourseRow, EngineError> {
    let friday = monday + Duration::days(4);
    let next_friday = monday + Duration::days(NEXT_WINDOW_DAYS);

    let mut buckets = Buckets::default();
    for assignment in course.assignments.values() {
        let Some(due) = assignment.canvas.due_at else {
            buckets.no_date_count += 1;
            buckets.no_date_points += assignment.canvas.points_possible.unwrap_or(0.0).max(0.0);
            continue;
        };
        // Open statuses outside the closed grid set have no grid cell
        let Some(status) = adapter::grid_status(assignment) else {
            continue;
        };

        let due_local = local_date(due, tz);
        if due_local < monday {
            // Earlier weeks only surface actionable items
            if status == CheckpointStatus::Missing {
                buckets.prior.push((assignment, status));
            }
        } else if due_local <= friday {
            let index = (due_local - monday).num_days() as usize;
            buckets.weekdays[index].push((assignment, status));
        } else if due_local <= next_friday {
            buckets.next.push((assignment, status));
        }
        // Beyond next Friday: out of the view horizon
    }

    sort_bucket(&mut buckets.prior);
    for bucket in buckets.weekdays.iter_mut() {
        sort_bucket(bucket);
    }
    sort_bucket(&mut buckets.next);

    let prior = to_grid_items(&buckets.prior, FormatType::Prior, as_of, tz)?;
    let mut weekdays: [Vec<GridItem>; 5] = Default::default();
    for (index, bucket) in buckets.weekdays.iter().enumerate() {
        weekdays[index] = to_grid_items(bucket, FormatType::Weekday, as_of, tz)?;
    }
    let next = to_grid_items(&buckets.next, FormatType::Next, as_of, tz)?;

    let mut attention_counts = AttentionCounts::default();
    let mut total_items = 0u32;
    for item in prior.iter().chain(weekdays.iter().flatten()).chain(next.iter()) {
        attention_counts.record(item.attention_type);
        total_items += 1;
    }

    Ok(CourseRow {
        course_id: course.id.clone(),
        course_name: adapter::course_display_name(course).to_string(),
        prior,
        weekdays,
        next,
        no_date: no_date_bucket(student, course, &buckets),
        attention_counts,
        total_items,
    })
}

fn sort_bucket(bucket: &mut [(&Assignment, CheckpointStatus)]) {
    bucket.sort_by(|(a, _), (b, _)| adapter::due_then_name(a, b));
}

fn no_date_bucket(student: &Student, course: &Course, buckets: &Buckets<'_>) -> NoDateBucket {
    NoDateBucket {
        count: buckets.no_date_count,
        points: buckets.no_date_points,
        label: format!(
            "{} no due date ({} points)",
            buckets.no_date_count,
            points_display(buckets.no_date_points),
        ),
        url: format!(
            "/students/{}/courses/{}/assignments?due=none",
            student.id, course.id
        ),
    }
}
