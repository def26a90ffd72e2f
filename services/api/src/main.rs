use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

mod error;
mod middleware;
mod models;
mod pagination;
mod repositories;
mod routes;
mod state;
mod validation;

use axum::http::{Method, header};
use tower_http::cors::{Any, CorsLayer};

use common::database::{DatabaseConfig, health_check, init_pool};

use crate::{
    middleware::JwtVerifier,
    repositories::{
        AgencyRepository, AttendanceRepository, EmployeeRepository, ObservationRepository,
        PerformanceRepository, UserRepository,
    },
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting personnel API service");

    // Missing connection string or signing secret is fatal; there is no
    // degraded mode.
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    let jwt_verifier = JwtVerifier::from_env()?;

    let app_state = AppState {
        db_pool: pool.clone(),
        jwt_verifier,
        user_repository: UserRepository::new(pool.clone()),
        employee_repository: EmployeeRepository::new(pool.clone()),
        agency_repository: AgencyRepository::new(pool.clone()),
        attendance_repository: AttendanceRepository::new(pool.clone()),
        performance_repository: PerformanceRepository::new(pool.clone()),
        observation_repository: ObservationRepository::new(pool),
    };

    info!("Personnel API service initialized successfully");

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let app = routes::create_router(app_state).layer(cors);

    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Personnel API service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
