use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::{identity_repo, registrant_repo};
use crate::database::registrant_repo::RegistrantProfile;
use crate::error::{AppError, FieldError};

/// One registration form submission. The age field is absent on purpose:
/// age is always derived from the date of birth, never taken from the user.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationSubmission {
    pub full_name: String,
    pub email: String,
    pub address: String,
    pub date_of_birth: String,
    pub country: String,
    pub location: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RegistrationOutcome {
    pub was_update: bool,
    pub registrant_id: i64,
}

#[derive(Debug)]
struct ValidatedRegistration {
    date_of_birth: NaiveDate,
    age: i64,
}

/// Whole years between birth date and `today`, decremented when the
/// birthday has not yet come around this year.
pub fn derive_age(date_of_birth: NaiveDate, today: NaiveDate) -> i64 {
    let mut age = i64::from(today.year() - date_of_birth.year());
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

/// Mirrors the form's email shape: `local@domain.tld`, no whitespace,
/// at least one dot in the domain with characters on both sides.
pub fn email_is_valid(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    matches!(
        domain.rsplit_once('.'),
        Some((host, tld)) if !host.is_empty() && !tld.is_empty()
    )
}

fn validate(
    submission: &RegistrationSubmission,
    today: NaiveDate,
) -> Result<ValidatedRegistration, AppError> {
    let mut errors = Vec::new();
    let mut validated = None;

    if submission.full_name.trim().is_empty() {
        errors.push(FieldError::new("full_name", "User selection is required."));
    }

    if submission.email.trim().is_empty() {
        errors.push(FieldError::new("email", "Please enter email."));
    } else if !email_is_valid(&submission.email) {
        errors.push(FieldError::new("email", "Please enter a valid email."));
    }

    if submission.address.trim().is_empty() {
        errors.push(FieldError::new("address", "Address is required."));
    }

    if submission.date_of_birth.trim().is_empty() {
        errors.push(FieldError::new("date_of_birth", "Date of birth is required."));
    } else {
        match submission.date_of_birth.parse::<NaiveDate>() {
            Err(_) => {
                errors.push(FieldError::new(
                    "date_of_birth",
                    "Date of birth must be a valid date.",
                ));
            }
            Ok(date_of_birth) if date_of_birth > today => {
                errors.push(FieldError::new(
                    "date_of_birth",
                    "Date of birth cannot be in the future.",
                ));
            }
            Ok(date_of_birth) => {
                let age = derive_age(date_of_birth, today);
                if age < 18 {
                    errors.push(FieldError::new(
                        "date_of_birth",
                        "Age must be at least 18 years.",
                    ));
                } else if age <= 0 || age >= 100 {
                    errors.push(FieldError::new("age", "Please enter valid age."));
                } else {
                    validated = Some(ValidatedRegistration { date_of_birth, age });
                }
            }
        }
    }

    if submission.country.trim().is_empty() {
        errors.push(FieldError::new("country", "Country is required."));
    }

    if submission.location.trim().is_empty() {
        errors.push(FieldError::new("location", "Location is required."));
    }

    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    // Unreachable without a date_of_birth error already pushed above.
    validated.ok_or_else(|| AppError::validation("date_of_birth", "Date of birth is required."))
}

/// Insert-or-update keyed by email. The lookup and the single write run in
/// one transaction; the UNIQUE key on email backstops concurrent inserts.
pub async fn register(
    pool: &SqlitePool,
    submission: &RegistrationSubmission,
) -> Result<RegistrationOutcome, AppError> {
    let validated = validate(submission, Utc::now().date_naive())?;

    let mut tx = pool.begin().await.map_err(AppError::ExistenceCheck)?;

    let identity_id = match identity_repo::find_by_login(&mut *tx, &submission.full_name)
        .await
        .map_err(AppError::ExistenceCheck)?
    {
        Some(identity) => identity.id,
        None => {
            let id = Uuid::new_v4().to_string();
            identity_repo::insert_identity(&mut *tx, &id, &submission.full_name)
                .await
                .map_err(AppError::from_write)?;
            id
        }
    };

    let date_of_birth = validated.date_of_birth.to_string();
    let profile = RegistrantProfile {
        identity_id: &identity_id,
        full_name: &submission.full_name,
        address: &submission.address,
        age: validated.age,
        date_of_birth: &date_of_birth,
        country: &submission.country,
        location: &submission.location,
    };

    let existing = registrant_repo::find_by_email(&mut *tx, &submission.email)
        .await
        .map_err(AppError::ExistenceCheck)?;

    let outcome = match existing {
        Some(row) => {
            registrant_repo::update_profile(&mut *tx, row.id, profile)
                .await
                .map_err(AppError::Write)?;
            RegistrationOutcome {
                was_update: true,
                registrant_id: row.id,
            }
        }
        None => {
            let registrant_id = registrant_repo::insert_registrant(&mut *tx, &submission.email, profile)
                .await
                .map_err(AppError::from_write)?;
            RegistrationOutcome {
                was_update: false,
                registrant_id,
            }
        }
    };

    tx.commit().await.map_err(AppError::Write)?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn submission() -> RegistrationSubmission {
        RegistrationSubmission {
            full_name: "Jane Doe".to_string(),
            email: "a@b.com".to_string(),
            address: "1 Main St".to_string(),
            date_of_birth: "1999-06-15".to_string(),
            country: "India".to_string(),
            location: "Pune".to_string(),
        }
    }

    #[test]
    fn age_counts_whole_years_only() {
        let dob = date(2000, 6, 15);
        assert_eq!(derive_age(dob, date(2025, 6, 14)), 24);
        assert_eq!(derive_age(dob, date(2025, 6, 15)), 25);
        assert_eq!(derive_age(dob, date(2025, 6, 16)), 25);
    }

    #[test]
    fn email_shape_matches_form_rule() {
        assert!(email_is_valid("a@b.com"));
        assert!(email_is_valid("first.last@sub.domain.org"));
        assert!(!email_is_valid(""));
        assert!(!email_is_valid("no-at-sign.com"));
        assert!(!email_is_valid("@domain.com"));
        assert!(!email_is_valid("a@domain"));
        assert!(!email_is_valid("a@.com"));
        assert!(!email_is_valid("a@domain."));
        assert!(!email_is_valid("a b@c.com"));
        assert!(!email_is_valid("a@b@c.com"));
    }

    #[test]
    fn future_date_of_birth_is_rejected() {
        let mut s = submission();
        s.date_of_birth = "2031-01-01".to_string();
        let err = validate(&s, date(2026, 8, 30)).unwrap_err();
        let AppError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors[0].field, "date_of_birth");
        assert_eq!(errors[0].message, "Date of birth cannot be in the future.");
    }

    #[test]
    fn under_18_is_rejected() {
        let mut s = submission();
        s.date_of_birth = "2010-01-01".to_string();
        let err = validate(&s, date(2026, 8, 30)).unwrap_err();
        let AppError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors[0].message, "Age must be at least 18 years.");
    }

    #[test]
    fn age_one_hundred_or_more_is_rejected() {
        let mut s = submission();
        s.date_of_birth = "1920-01-01".to_string();
        let err = validate(&s, date(2026, 8, 30)).unwrap_err();
        let AppError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors[0].field, "age");
    }

    #[test]
    fn blank_fields_are_each_reported() {
        let s = RegistrationSubmission {
            full_name: " ".to_string(),
            email: "".to_string(),
            address: "".to_string(),
            date_of_birth: "".to_string(),
            country: "".to_string(),
            location: "".to_string(),
        };
        let err = validate(&s, date(2026, 8, 30)).unwrap_err();
        let AppError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["full_name", "email", "address", "date_of_birth", "country", "location"]
        );
    }

    #[test]
    fn valid_submission_derives_age() {
        let v = validate(&submission(), date(2026, 8, 30)).unwrap();
        assert_eq!(v.age, 27);
        assert_eq!(v.date_of_birth, date(1999, 6, 15));
    }
}
