//! API service models
//!
//! Wire payloads keep the Spanish field names the front end already uses;
//! structs serialize with camelCase to match (`fechaContratacion`,
//! `registradoPor`, ...).

pub mod agency;
pub mod attendance;
pub mod employee;
pub mod observation;
pub mod performance;

pub use agency::{Agency, AgencyListQuery, CreateAgency, NewAgency, UpdateAgency};
pub use attendance::{
    Attendance, AttendanceListQuery, CreateAttendance, NewAttendance, UpdateAttendance,
};
pub use employee::{CreateEmployee, Employee, EmployeeListQuery, NewEmployee, UpdateEmployee};
pub use observation::{
    CreateObservation, NewObservation, Observation, ObservationListQuery, UpdateObservation,
};
pub use performance::{
    CreatePerformance, NewPerformance, Performance, PerformanceListQuery, UpdatePerformance,
};
