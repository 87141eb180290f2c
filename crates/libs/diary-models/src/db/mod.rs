//! PostgreSQL configuration and connection pooling.

pub mod config;
pub mod connection;
