use chrono::{NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::database::schedule_repo;
use crate::database::schedule_repo::ScheduleSlot;
use crate::database::registrant_repo;
use crate::error::{AppError, FieldError};
use crate::models::ScheduleEntryRow;
use crate::services::registration_service::email_is_valid;

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleSubmission {
    pub email: String,
    pub exercise_date: String,
    pub start_time: String,
    pub end_time: String,
    pub exercise_name: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScheduleOutcome {
    pub was_update: bool,
    pub entry_id: i64,
}

/// Existing slot for one registrant, used to prefill the schedule form.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleView {
    pub full_name: Option<String>,
    pub schedule_date: String,
    pub start_time: String,
    pub end_time: String,
    pub activity_name: String,
}

#[derive(Debug)]
struct ValidatedSchedule {
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}

/// The interval-overlap rule. The three comparisons mix open and closed
/// bounds, so exact boundary touches behave asymmetrically: a new slot
/// ending at an existing start passes, one starting at an existing end
/// also passes, but identical bounds collide.
pub fn overlaps(
    existing_start: NaiveTime,
    existing_end: NaiveTime,
    new_start: NaiveTime,
    new_end: NaiveTime,
) -> bool {
    (existing_start <= new_start && existing_end > new_start)
        || (existing_start < new_end && existing_end >= new_end)
        || (existing_start >= new_start && existing_end <= new_end)
}

/// True when the candidate interval overlaps any entry on the date,
/// regardless of who owns the entry.
pub fn has_conflict(entries: &[ScheduleEntryRow], start: NaiveTime, end: NaiveTime) -> bool {
    entries
        .iter()
        .filter_map(|entry| Some((parse_time(&entry.start_time)?, parse_time(&entry.end_time)?)))
        .any(|(existing_start, existing_end)| overlaps(existing_start, existing_end, start, end))
}

fn validate(submission: &ScheduleSubmission, today: NaiveDate) -> Result<ValidatedSchedule, AppError> {
    let mut errors = Vec::new();

    if submission.email.trim().is_empty() || !email_is_valid(&submission.email) {
        errors.push(FieldError::new("email", "Please enter a valid email."));
    }

    let date = if submission.exercise_date.trim().is_empty() {
        errors.push(FieldError::new("exercise_date", "Exercise date is required."));
        None
    } else {
        match submission.exercise_date.parse::<NaiveDate>() {
            Ok(date) if date <= today => {
                errors.push(FieldError::new(
                    "exercise_date",
                    "The exercise date must be in the future.",
                ));
                None
            }
            Ok(date) => Some(date),
            Err(_) => {
                errors.push(FieldError::new(
                    "exercise_date",
                    "Exercise date must be a valid date.",
                ));
                None
            }
        }
    };

    let start = if submission.start_time.trim().is_empty() {
        errors.push(FieldError::new("start_time", "Start time is required."));
        None
    } else {
        match parse_time(&submission.start_time) {
            Some(start) => Some(start),
            None => {
                errors.push(FieldError::new("start_time", "Start time must be a valid time."));
                None
            }
        }
    };

    let end = if submission.end_time.trim().is_empty() {
        errors.push(FieldError::new("end_time", "End time is required."));
        None
    } else {
        match parse_time(&submission.end_time) {
            Some(end) => Some(end),
            None => {
                errors.push(FieldError::new("end_time", "End time must be a valid time."));
                None
            }
        }
    };

    if submission.exercise_name.trim().is_empty() {
        errors.push(FieldError::new("exercise_name", "Exercise name is required."));
    }

    if let (Some(start), Some(end)) = (start, end) {
        if start >= end {
            errors.push(FieldError::new("start_time", "Start time must be before end time."));
            errors.push(FieldError::new("end_time", "End time must be after start time."));
        }
    }

    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    // All three are Some once errors is empty.
    match (date, start, end) {
        (Some(date), Some(start), Some(end)) => Ok(ValidatedSchedule { date, start, end }),
        _ => Err(AppError::validation("exercise_date", "Exercise date is required.")),
    }
}

/// Conflict-gated upsert keyed by the registrant's email. Only a
/// registered email may hold a slot; a rejected attempt writes nothing,
/// an accepted one overwrites the whole slot.
pub async fn schedule(
    pool: &SqlitePool,
    submission: &ScheduleSubmission,
) -> Result<ScheduleOutcome, AppError> {
    let validated = validate(submission, Utc::now().date_naive())?;

    let registrant = registrant_repo::find_by_email(pool, &submission.email)
        .await
        .map_err(AppError::ExistenceCheck)?;
    if registrant.is_none() {
        return Err(AppError::validation(
            "email",
            "No registration exists for this email.",
        ));
    }

    let date_key = validated.date.to_string();
    let entries = schedule_repo::list_by_date(pool, &date_key)
        .await
        .map_err(AppError::ExistenceCheck)?;

    if has_conflict(&entries, validated.start, validated.end) {
        return Err(AppError::Conflict(
            "An activity is already scheduled for the selected date and time.".to_string(),
        ));
    }

    let start_time = validated.start.format("%H:%M").to_string();
    let end_time = validated.end.format("%H:%M").to_string();
    let slot = ScheduleSlot {
        schedule_date: &date_key,
        start_time: &start_time,
        end_time: &end_time,
        activity_name: &submission.exercise_name,
    };

    let mut tx = pool.begin().await.map_err(AppError::ExistenceCheck)?;

    let existing = schedule_repo::find_by_email(&mut *tx, &submission.email)
        .await
        .map_err(AppError::ExistenceCheck)?;

    let outcome = match existing {
        Some(entry) => {
            schedule_repo::update_slot(&mut *tx, entry.id, slot)
                .await
                .map_err(AppError::Write)?;
            ScheduleOutcome {
                was_update: true,
                entry_id: entry.id,
            }
        }
        None => {
            let entry_id = schedule_repo::insert_entry(&mut *tx, &submission.email, slot)
                .await
                .map_err(AppError::from_write)?;
            ScheduleOutcome {
                was_update: false,
                entry_id,
            }
        }
    };

    tx.commit().await.map_err(AppError::Write)?;
    Ok(outcome)
}

/// Existing slot plus the registrant's stored name, for form prefill.
pub async fn load_for_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<ScheduleView>, AppError> {
    let Some(entry) = schedule_repo::find_by_email(pool, email)
        .await
        .map_err(AppError::ExistenceCheck)?
    else {
        return Ok(None);
    };

    let full_name = registrant_repo::find_by_email(pool, email)
        .await
        .map_err(AppError::ExistenceCheck)?
        .and_then(|r| r.full_name);

    Ok(Some(ScheduleView {
        full_name,
        schedule_date: entry.schedule_date,
        start_time: entry.start_time,
        end_time: entry.end_time,
        activity_name: entry.activity_name,
    }))
}
