//! Database models and store backends for the diary service.
//!
//! The rest of the service talks to persistence through the
//! [`store::UserStore`] and [`store::EntryStore`] traits. Two backends
//! implement them: [`db::connection::DbConnection`] (PostgreSQL through diesel
//! and r2d2) and [`store::memory::MemoryStore`].
//!
//! Both enforce the same unique constraints: one user per username and one
//! entry per `(owner_id, entry_date)`. A violation surfaces as
//! [`error::Error::UniqueViolation`].
//!
//! ```rust,no_run
//! use diary_models::db::{config::DbConfig, connection::DbConnection};
//! use diary_models::store::UserStore;
//!
//! let config = DbConfig::from_env().expect("DATABASE_URL not set");
//! let db = DbConnection::new(&config).unwrap().setup().unwrap();
//! let user = db.fetch_user_by_name("alice").unwrap();
//! println!("alice registered: {}", user.is_some());
//! ```

pub mod db;
pub mod diary;
pub mod error;
pub mod prelude;
mod schema;
pub mod store;
pub mod user;
