//! Registered diary users.

pub mod diary_user;
