use axum::routing::{get, post};
use axum::Router;
use dotenvy::dotenv;
use sqlx::sqlite::SqlitePoolOptions;
use std::net::SocketAddr;
use tower_http::catch_panic::CatchPanicLayer;

use wellbeing_campaign::config::AppConfig;
use wellbeing_campaign::schema;
use wellbeing_campaign::services::admin_policy::AdminPolicy;
use wellbeing_campaign::web::routes::{enrollment, registration, roster, schedule};
use wellbeing_campaign::web::AppState;

#[tokio::main]
async fn main() {
    dotenv().ok();

    // 1. Start logging
    tracing_subscriber::fmt::init();

    // 2. Configuration and database
    let config = AppConfig::from_env();
    let pool = SqlitePoolOptions::new()
        .connect(&config.database_url)
        .await
        .expect("Cannot connect to the database");

    schema::ensure_schema(&pool)
        .await
        .expect("Cannot apply the campaign schema");

    let state = AppState {
        pool,
        admins: AdminPolicy::new(config.admin_emails.clone()),
    };

    // 3. Routes
    let app = Router::new()
        .route("/api/enrollment/check", post(enrollment::check_enrollment_handler))
        .route("/api/registrations", post(registration::register_handler))
        .route(
            "/api/schedule",
            get(schedule::schedule_lookup_handler).post(schedule::schedule_handler),
        )
        .route("/api/roster", get(roster::roster_handler))
        .layer(CatchPanicLayer::new())
        .with_state(state);

    // 4. Serve
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Cannot parse host/port");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Cannot bind listener");

    tracing::info!("wellbeing-campaign listening on http://{}", addr);

    axum::serve(listener, app).await.unwrap();
}
