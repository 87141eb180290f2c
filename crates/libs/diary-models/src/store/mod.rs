//! Store seam used by the service layer.
//!
//! Implementations must enforce the unique constraints themselves and report
//! a violation as [`Error::UniqueViolation`](crate::error::Error) carrying
//! the constraint name.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::db::connection::DbConnection;
use crate::diary::diary_entry::{DiaryEntry, DiaryEntryCreate, DiaryEntryUpdate};
use crate::prelude::*;
use crate::user::diary_user::{DiaryUser, DiaryUserCreate};

pub mod memory;

/// Unique index on `diary_user.username`.
pub const USERNAME_CONSTRAINT: &str = "diary_user_username_key";
/// Unique index on `diary_entry (owner_id, entry_date)`.
pub const ENTRY_DATE_CONSTRAINT: &str = "diary_entry_owner_date_key";

pub trait UserStore: Send + Sync {
    fn create_user(&self, user: DiaryUserCreate) -> Result<DiaryUser>;
    fn fetch_user_by_name(&self, name: &str) -> Result<Option<DiaryUser>>;
    fn fetch_user_by_id(&self, id: &Uuid) -> Result<Option<DiaryUser>>;
    fn update_user_hash(&self, id: &Uuid, hash: &str) -> Result<Option<DiaryUser>>;
}

pub trait EntryStore: Send + Sync {
    fn create_entry(&self, entry: DiaryEntryCreate) -> Result<DiaryEntry>;
    fn fetch_entries(&self, owner: &Uuid) -> Result<Vec<DiaryEntry>>;
    fn fetch_entry(&self, owner: &Uuid, id: &Uuid) -> Result<Option<DiaryEntry>>;
    /// Exact match on the stored date.
    fn fetch_entry_at(&self, owner: &Uuid, date: &DateTime<Utc>) -> Result<Option<DiaryEntry>>;
    /// First entry in the half-open interval `[start, end)`.
    fn fetch_entry_between(
        &self,
        owner: &Uuid,
        start: &DateTime<Utc>,
        end: &DateTime<Utc>,
    ) -> Result<Option<DiaryEntry>>;
    fn update_entry(
        &self,
        owner: &Uuid,
        id: &Uuid,
        changes: DiaryEntryUpdate,
    ) -> Result<Option<DiaryEntry>>;
}

impl UserStore for DbConnection {
    fn create_user(&self, user: DiaryUserCreate) -> Result<DiaryUser> {
        user.save(self)
    }

    fn fetch_user_by_name(&self, name: &str) -> Result<Option<DiaryUser>> {
        DiaryUser::fetch_by_name(name, self)
    }

    fn fetch_user_by_id(&self, id: &Uuid) -> Result<Option<DiaryUser>> {
        DiaryUser::fetch_by_id(id, self)
    }

    fn update_user_hash(&self, id: &Uuid, hash: &str) -> Result<Option<DiaryUser>> {
        DiaryUser::update_hash(id, hash, self)
    }
}

impl EntryStore for DbConnection {
    fn create_entry(&self, entry: DiaryEntryCreate) -> Result<DiaryEntry> {
        entry.save(self)
    }

    fn fetch_entries(&self, owner: &Uuid) -> Result<Vec<DiaryEntry>> {
        DiaryEntry::fetch_all(owner, self)
    }

    fn fetch_entry(&self, owner: &Uuid, id: &Uuid) -> Result<Option<DiaryEntry>> {
        DiaryEntry::fetch_owned(owner, id, self)
    }

    fn fetch_entry_at(&self, owner: &Uuid, date: &DateTime<Utc>) -> Result<Option<DiaryEntry>> {
        DiaryEntry::fetch_at(owner, date, self)
    }

    fn fetch_entry_between(
        &self,
        owner: &Uuid,
        start: &DateTime<Utc>,
        end: &DateTime<Utc>,
    ) -> Result<Option<DiaryEntry>> {
        DiaryEntry::fetch_between(owner, start, end, self)
    }

    fn update_entry(
        &self,
        owner: &Uuid,
        id: &Uuid,
        changes: DiaryEntryUpdate,
    ) -> Result<Option<DiaryEntry>> {
        changes.save(owner, id, self)
    }
}
