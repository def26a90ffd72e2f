//! Application state shared across handlers

use sqlx::PgPool;

use crate::middleware::JwtVerifier;
use crate::repositories::{
    AgencyRepository, AttendanceRepository, EmployeeRepository, ObservationRepository,
    PerformanceRepository, UserRepository,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_verifier: JwtVerifier,
    pub user_repository: UserRepository,
    pub employee_repository: EmployeeRepository,
    pub agency_repository: AgencyRepository,
    pub attendance_repository: AttendanceRepository,
    pub performance_repository: PerformanceRepository,
    pub observation_repository: ObservationRepository,
}
