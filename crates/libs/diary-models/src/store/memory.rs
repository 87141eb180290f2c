//! In-process store backend.
//!
//! Holds everything behind a single lock, so the check for a conflicting row
//! and the write are atomic just like a unique index would make them.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use uuid::Uuid;

use super::{ENTRY_DATE_CONSTRAINT, EntryStore, USERNAME_CONSTRAINT, UserStore};
use crate::diary::diary_entry::{DiaryEntry, DiaryEntryCreate, DiaryEntryUpdate};
use crate::prelude::*;
use crate::user::diary_user::{DiaryUser, DiaryUserCreate};

#[derive(Default)]
struct Tables {
    users: Vec<DiaryUser>,
    entries: Vec<DiaryEntry>,
}

/// Volatile store, lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for MemoryStore {
    fn create_user(&self, user: DiaryUserCreate) -> Result<DiaryUser> {
        let mut tables = self.tables.lock();
        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(Error::UniqueViolation(USERNAME_CONSTRAINT.to_string()));
        }
        let now = Utc::now();
        let created = DiaryUser {
            id: Uuid::new_v4(),
            username: user.username,
            hash: user.hash,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(created.clone());
        Ok(created)
    }

    fn fetch_user_by_name(&self, name: &str) -> Result<Option<DiaryUser>> {
        let tables = self.tables.lock();
        Ok(tables.users.iter().find(|u| u.username == name).cloned())
    }

    fn fetch_user_by_id(&self, id: &Uuid) -> Result<Option<DiaryUser>> {
        let tables = self.tables.lock();
        Ok(tables.users.iter().find(|u| u.id == *id).cloned())
    }

    fn update_user_hash(&self, id: &Uuid, hash: &str) -> Result<Option<DiaryUser>> {
        let mut tables = self.tables.lock();
        Ok(tables.users.iter_mut().find(|u| u.id == *id).map(|user| {
            user.hash = hash.to_string();
            user.updated_at = Utc::now();
            user.clone()
        }))
    }
}

impl EntryStore for MemoryStore {
    fn create_entry(&self, entry: DiaryEntryCreate) -> Result<DiaryEntry> {
        let mut tables = self.tables.lock();
        if tables
            .entries
            .iter()
            .any(|e| e.owner_id == entry.owner_id && e.entry_date == entry.entry_date)
        {
            return Err(Error::UniqueViolation(ENTRY_DATE_CONSTRAINT.to_string()));
        }
        let now = Utc::now();
        let created = DiaryEntry {
            id: Uuid::new_v4(),
            owner_id: entry.owner_id,
            entry_date: entry.entry_date,
            content: entry.content,
            created_at: now,
            updated_at: now,
        };
        tables.entries.push(created.clone());
        Ok(created)
    }

    fn fetch_entries(&self, owner: &Uuid) -> Result<Vec<DiaryEntry>> {
        let tables = self.tables.lock();
        Ok(tables
            .entries
            .iter()
            .filter(|e| e.owner_id == *owner)
            .cloned()
            .collect())
    }

    fn fetch_entry(&self, owner: &Uuid, id: &Uuid) -> Result<Option<DiaryEntry>> {
        let tables = self.tables.lock();
        Ok(tables
            .entries
            .iter()
            .find(|e| e.owner_id == *owner && e.id == *id)
            .cloned())
    }

    fn fetch_entry_at(&self, owner: &Uuid, date: &DateTime<Utc>) -> Result<Option<DiaryEntry>> {
        let tables = self.tables.lock();
        Ok(tables
            .entries
            .iter()
            .find(|e| e.owner_id == *owner && e.entry_date == *date)
            .cloned())
    }

    fn fetch_entry_between(
        &self,
        owner: &Uuid,
        start: &DateTime<Utc>,
        end: &DateTime<Utc>,
    ) -> Result<Option<DiaryEntry>> {
        let tables = self.tables.lock();
        Ok(tables
            .entries
            .iter()
            .filter(|e| e.owner_id == *owner && e.entry_date >= *start && e.entry_date < *end)
            .min_by_key(|e| e.entry_date)
            .cloned())
    }

    fn update_entry(
        &self,
        owner: &Uuid,
        id: &Uuid,
        changes: DiaryEntryUpdate,
    ) -> Result<Option<DiaryEntry>> {
        let mut tables = self.tables.lock();
        let Some(index) = tables
            .entries
            .iter()
            .position(|e| e.owner_id == *owner && e.id == *id)
        else {
            return Ok(None);
        };
        if tables.entries.iter().any(|e| {
            e.owner_id == *owner && e.id != *id && e.entry_date == changes.entry_date
        }) {
            return Err(Error::UniqueViolation(ENTRY_DATE_CONSTRAINT.to_string()));
        }
        let entry = &mut tables.entries[index];
        entry.entry_date = changes.entry_date;
        entry.content = changes.content;
        entry.updated_at = Utc::now();
        Ok(Some(entry.clone()))
    }
}
