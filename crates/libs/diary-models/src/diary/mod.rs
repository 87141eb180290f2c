//! Diary entries.

pub mod diary_entry;
