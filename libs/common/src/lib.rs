//! Common library for the personnel management backend
//!
//! This crate provides the shared functionality used by the auth and api
//! services: PostgreSQL connection pooling and database error handling.

pub mod database;
pub mod error;
