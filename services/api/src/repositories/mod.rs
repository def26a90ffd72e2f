//! Repositories for database operations
//!
//! Each repository owns the SQL for one collection and returns plain
//! `sqlx::Error` so the route layer can map constraint violations and pool
//! timeouts onto the API error taxonomy.

pub mod agency;
pub mod attendance;
pub mod employee;
pub mod observation;
pub mod performance;
pub mod user;

pub use agency::AgencyRepository;
pub use attendance::AttendanceRepository;
pub use employee::EmployeeRepository;
pub use observation::ObservationRepository;
pub use performance::PerformanceRepository;
pub use user::UserRepository;
