use chrono::NaiveDate;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::database::roster_repo;
use crate::error::AppError;
use crate::models::RosterJoinRow;

/// One rendered grid row. Text columns are already display-formatted;
/// missing schedule values render as blanks, as the grid shows them.
#[derive(Debug, Clone, Serialize)]
pub struct RosterRowView {
    pub email: String,
    pub full_name: String,
    pub date_of_birth: String,
    pub age: Option<i64>,
    pub address: String,
    pub country: String,
    pub location: String,
    pub activity_date: String,
    pub start_time: String,
    pub end_time: String,
    pub activity_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterColumn {
    Email,
    FullName,
    DateOfBirth,
    Age,
    Address,
    Country,
    Location,
    ActivityDate,
    StartTime,
    EndTime,
    ActivityName,
}

impl RosterColumn {
    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "email" => Some(RosterColumn::Email),
            "full_name" => Some(RosterColumn::FullName),
            "date_of_birth" => Some(RosterColumn::DateOfBirth),
            "age" => Some(RosterColumn::Age),
            "address" => Some(RosterColumn::Address),
            "country" => Some(RosterColumn::Country),
            "location" => Some(RosterColumn::Location),
            "activity_date" => Some(RosterColumn::ActivityDate),
            "start_time" => Some(RosterColumn::StartTime),
            "end_time" => Some(RosterColumn::EndTime),
            "activity_name" => Some(RosterColumn::ActivityName),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn parse(input: Option<&str>) -> Self {
        match input {
            Some("desc") => SortDirection::Descending,
            _ => SortDirection::Ascending,
        }
    }
}

/// Stored dates are ISO; the grid shows DD-MM-YYYY. Unparseable values
/// pass through untouched.
fn format_grid_date(raw: &str) -> String {
    match raw.parse::<NaiveDate>() {
        Ok(date) => date.format("%d-%m-%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

fn to_view(row: RosterJoinRow) -> RosterRowView {
    RosterRowView {
        email: row.email,
        full_name: row.full_name.unwrap_or_default(),
        date_of_birth: row
            .date_of_birth
            .as_deref()
            .map(format_grid_date)
            .unwrap_or_default(),
        age: row.age,
        address: row.address.unwrap_or_default(),
        country: row.country.unwrap_or_default(),
        location: row.location.unwrap_or_default(),
        activity_date: row
            .schedule_date
            .as_deref()
            .map(format_grid_date)
            .unwrap_or_default(),
        start_time: row.start_time.unwrap_or_default(),
        end_time: row.end_time.unwrap_or_default(),
        activity_name: row.activity_name.unwrap_or_default(),
    }
}

fn text_key(row: &RosterRowView, column: RosterColumn) -> &str {
    match column {
        RosterColumn::Email => &row.email,
        RosterColumn::FullName => &row.full_name,
        RosterColumn::DateOfBirth => &row.date_of_birth,
        RosterColumn::Address => &row.address,
        RosterColumn::Country => &row.country,
        RosterColumn::Location => &row.location,
        RosterColumn::ActivityDate => &row.activity_date,
        RosterColumn::StartTime => &row.start_time,
        RosterColumn::EndTime => &row.end_time,
        RosterColumn::ActivityName => &row.activity_name,
        RosterColumn::Age => "",
    }
}

pub fn sort_rows(rows: &mut [RosterRowView], column: RosterColumn, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let ordering = match column {
            RosterColumn::Age => a.age.cmp(&b.age),
            _ => text_key(a, column).cmp(text_key(b, column)),
        };
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

pub async fn load_roster(
    pool: &SqlitePool,
    sort: Option<(RosterColumn, SortDirection)>,
) -> Result<Vec<RosterRowView>, AppError> {
    let rows = roster_repo::load_roster(pool)
        .await
        .map_err(AppError::ExistenceCheck)?;

    let mut views: Vec<RosterRowView> = rows.into_iter().map(to_view).collect();
    if let Some((column, direction)) = sort {
        sort_rows(&mut views, column, direction);
    }
    Ok(views)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(email: &str, age: Option<i64>, country: &str) -> RosterRowView {
        RosterRowView {
            email: email.to_string(),
            full_name: String::new(),
            date_of_birth: String::new(),
            age,
            address: String::new(),
            country: country.to_string(),
            location: String::new(),
            activity_date: String::new(),
            start_time: String::new(),
            end_time: String::new(),
            activity_name: String::new(),
        }
    }

    #[test]
    fn grid_dates_render_day_first() {
        assert_eq!(format_grid_date("2030-01-05"), "05-01-2030");
        assert_eq!(format_grid_date("not-a-date"), "not-a-date");
    }

    #[test]
    fn missing_schedule_columns_render_blank() {
        let view = to_view(RosterJoinRow {
            email: "a@b.com".to_string(),
            full_name: Some("Jane Doe".to_string()),
            age: Some(25),
            address: Some("1 Main St".to_string()),
            country: Some("India".to_string()),
            location: Some("Pune".to_string()),
            date_of_birth: Some("2000-06-15".to_string()),
            schedule_date: None,
            start_time: None,
            end_time: None,
            activity_name: None,
        });
        assert_eq!(view.date_of_birth, "15-06-2000");
        assert_eq!(view.activity_date, "");
        assert_eq!(view.start_time, "");
    }

    #[test]
    fn age_sorts_numerically() {
        let mut rows = vec![
            row("a@b.com", Some(30), ""),
            row("c@d.com", Some(9), ""),
            row("e@f.com", Some(25), ""),
        ];
        sort_rows(&mut rows, RosterColumn::Age, SortDirection::Ascending);
        let ages: Vec<Option<i64>> = rows.iter().map(|r| r.age).collect();
        assert_eq!(ages, vec![Some(9), Some(25), Some(30)]);
    }

    #[test]
    fn text_columns_sort_both_directions() {
        let mut rows = vec![
            row("x@x.com", None, "India"),
            row("y@y.com", None, "Argentina"),
        ];
        sort_rows(&mut rows, RosterColumn::Country, SortDirection::Ascending);
        assert_eq!(rows[0].country, "Argentina");
        sort_rows(&mut rows, RosterColumn::Country, SortDirection::Descending);
        assert_eq!(rows[0].country, "India");
    }

    #[test]
    fn unknown_sort_column_is_rejected_by_parse() {
        assert!(RosterColumn::parse("email").is_some());
        assert!(RosterColumn::parse("ssn").is_none());
        assert_eq!(SortDirection::parse(Some("desc")), SortDirection::Descending);
        assert_eq!(SortDirection::parse(None), SortDirection::Ascending);
    }
}
