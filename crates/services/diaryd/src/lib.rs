//! Diary Service (diaryd)
//!
//! REST backend for a personal diary: account registration and login, and
//! one diary entry per user per day behind bearer-token authentication.
//!
//! - `POST /api/users`, `POST /api/users/login`, `PUT /api/users/password`
//! - `GET|POST /api/diary`, `GET|PUT /api/diary/{id}`, `GET /api/diary/date/{date}`

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod prelude;
