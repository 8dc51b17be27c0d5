use chrono::Utc;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use wellbeing_campaign::database::registrant_repo;
use wellbeing_campaign::error::AppError;
use wellbeing_campaign::schema;
use wellbeing_campaign::services::admin_policy::AdminPolicy;
use wellbeing_campaign::services::enrollment_service::{self, EnrollmentState};
use wellbeing_campaign::services::registration_service::{
    self, derive_age, RegistrationSubmission,
};
use wellbeing_campaign::services::roster_service;

async fn campaign_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    schema::ensure_schema(&pool).await.expect("schema");
    pool
}

fn submission(email: &str, address: &str) -> RegistrationSubmission {
    RegistrationSubmission {
        full_name: "Jane Doe".to_string(),
        email: email.to_string(),
        address: address.to_string(),
        date_of_birth: "2001-05-15".to_string(),
        country: "India".to_string(),
        location: "Pune".to_string(),
    }
}

#[tokio::test]
async fn first_registration_inserts_then_reregistration_updates_in_place() {
    let pool = campaign_pool().await;

    let first = registration_service::register(&pool, &submission("a@b.com", "1 Main St"))
        .await
        .expect("first registration");
    assert!(!first.was_update);

    let row = registrant_repo::find_by_email(&pool, "a@b.com")
        .await
        .expect("lookup")
        .expect("row exists");
    assert_eq!(row.address.as_deref(), Some("1 Main St"));
    let expected_age = derive_age("2001-05-15".parse().unwrap(), Utc::now().date_naive());
    assert_eq!(row.age, Some(expected_age));

    let second = registration_service::register(&pool, &submission("a@b.com", "2 Side St"))
        .await
        .expect("re-registration");
    assert!(second.was_update);
    assert_eq!(second.registrant_id, first.registrant_id);

    let row = registrant_repo::find_by_email(&pool, "a@b.com")
        .await
        .expect("lookup")
        .expect("row exists");
    assert_eq!(row.address.as_deref(), Some("2 Side St"));

    // Still exactly one roster row for the email.
    let roster = roster_service::load_roster(&pool, None).await.expect("roster");
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].email, "a@b.com");
}

#[tokio::test]
async fn identical_resubmission_reports_update_and_changes_nothing() {
    let pool = campaign_pool().await;
    let body = submission("a@b.com", "1 Main St");

    registration_service::register(&pool, &body).await.expect("first");
    let before = registrant_repo::find_by_email(&pool, "a@b.com")
        .await
        .expect("lookup")
        .expect("row");

    let outcome = registration_service::register(&pool, &body).await.expect("second");
    assert!(outcome.was_update);

    let after = registrant_repo::find_by_email(&pool, "a@b.com")
        .await
        .expect("lookup")
        .expect("row");
    assert_eq!(after.id, before.id);
    assert_eq!(after.address, before.address);
    assert_eq!(after.age, before.age);
    assert_eq!(after.date_of_birth, before.date_of_birth);
    assert_eq!(after.country, before.country);
    assert_eq!(after.location, before.location);
}

#[tokio::test]
async fn enrollment_check_walks_the_flow_states() {
    let pool = campaign_pool().await;
    let admins = AdminPolicy::default();

    let status = enrollment_service::check_email(&pool, &admins, "a@b.com")
        .await
        .expect("check");
    assert_eq!(status.state, EnrollmentState::NotRegistered);
    assert!(status.full_name.is_none());

    registration_service::register(&pool, &submission("a@b.com", "1 Main St"))
        .await
        .expect("register");

    let status = enrollment_service::check_email(&pool, &admins, "a@b.com")
        .await
        .expect("check");
    assert_eq!(status.state, EnrollmentState::Registered { is_admin: false });
    assert_eq!(status.full_name.as_deref(), Some("Jane Doe"));
}

#[tokio::test]
async fn registered_admin_email_is_classified_as_admin() {
    let pool = campaign_pool().await;
    let admins = AdminPolicy::default();

    registration_service::register(
        &pool,
        &submission("sarangraut5900@gmail.com", "1 Main St"),
    )
    .await
    .expect("register");

    let status = enrollment_service::check_email(&pool, &admins, "sarangraut5900@gmail.com")
        .await
        .expect("check");
    assert_eq!(status.state, EnrollmentState::Registered { is_admin: true });
}

#[tokio::test]
async fn malformed_email_fails_the_check_locally() {
    let pool = campaign_pool().await;
    let admins = AdminPolicy::default();

    let err = enrollment_service::check_email(&pool, &admins, "not-an-email")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn rejected_registration_writes_nothing() {
    let pool = campaign_pool().await;

    let mut body = submission("a@b.com", "1 Main St");
    body.date_of_birth = "2020-01-01".to_string();
    let err = registration_service::register(&pool, &body).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let row = registrant_repo::find_by_email(&pool, "a@b.com")
        .await
        .expect("lookup");
    assert!(row.is_none());
}

#[tokio::test]
async fn same_login_name_resolves_to_one_identity() {
    let pool = campaign_pool().await;

    registration_service::register(&pool, &submission("a@b.com", "1 Main St"))
        .await
        .expect("first");
    registration_service::register(&pool, &submission("c@d.com", "3 Other St"))
        .await
        .expect("second");

    let first = registrant_repo::find_by_email(&pool, "a@b.com")
        .await
        .expect("lookup")
        .expect("row");
    let second = registrant_repo::find_by_email(&pool, "c@d.com")
        .await
        .expect("lookup")
        .expect("row");
    assert!(first.identity_id.is_some());
    assert_eq!(first.identity_id, second.identity_id);
}
