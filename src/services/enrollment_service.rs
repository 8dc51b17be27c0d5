use sqlx::SqlitePool;

use crate::database::registrant_repo;
use crate::error::AppError;
use crate::services::admin_policy::AdminPolicy;
use crate::services::registration_service::email_is_valid;

/// The enrollment flow a visitor walks through after submitting an email.
/// `Registered` is terminal: nothing in this flow leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollmentState {
    Unknown,
    Checking,
    NotRegistered,
    Registered { is_admin: bool },
}

impl EnrollmentState {
    /// `Unknown -> Checking`. Any other state is left where it is.
    pub fn submit_email(self) -> Self {
        match self {
            EnrollmentState::Unknown => EnrollmentState::Checking,
            other => other,
        }
    }

    /// `Checking -> Registered(is_admin)`.
    pub fn resolve_found(self, is_admin: bool) -> Self {
        match self {
            EnrollmentState::Checking => EnrollmentState::Registered { is_admin },
            other => other,
        }
    }

    /// `Checking -> NotRegistered`.
    pub fn resolve_not_found(self) -> Self {
        match self {
            EnrollmentState::Checking => EnrollmentState::NotRegistered,
            other => other,
        }
    }

    /// `NotRegistered -> Registered(is_admin)` once the form completes.
    pub fn complete_registration(self, is_admin: bool) -> Self {
        match self {
            EnrollmentState::NotRegistered => EnrollmentState::Registered { is_admin },
            other => other,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, EnrollmentState::Registered { .. })
    }
}

#[derive(Debug, Clone)]
pub struct EnrollmentStatus {
    pub state: EnrollmentState,
    pub full_name: Option<String>,
}

/// Resolves an email to its enrollment state. A failed lookup leaves the
/// state genuinely unknown, so it surfaces as `ExistenceCheck` rather than
/// defaulting to "not registered".
pub async fn check_email(
    pool: &SqlitePool,
    admins: &AdminPolicy,
    email: &str,
) -> Result<EnrollmentStatus, AppError> {
    if email.trim().is_empty() {
        return Err(AppError::validation("email", "Email is required."));
    }
    if !email_is_valid(email) {
        return Err(AppError::validation(
            "email",
            "Please enter a valid email address.",
        ));
    }

    let state = EnrollmentState::Unknown.submit_email();

    let existing = registrant_repo::find_by_email(pool, email)
        .await
        .map_err(AppError::ExistenceCheck)?;

    let status = match existing {
        Some(row) => EnrollmentStatus {
            state: state.resolve_found(admins.is_admin(email)),
            full_name: row.full_name,
        },
        None => EnrollmentStatus {
            state: state.resolve_not_found(),
            full_name: None,
        },
    };

    Ok(status)
}
