//! Diary entry model.
//!
//! Every query in here is scoped by `owner_id`. An entry that belongs to
//! somebody else is indistinguishable from one that does not exist.

use crate::prelude::*;
use crate::{db::connection::DbConnection, schema::diary_entry::dsl::*};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::user::diary_user::DiaryUser;

/// One diary entry, unique per `(owner_id, entry_date)`.
#[derive(
    Debug,
    Clone,
    Queryable,
    Selectable,
    Identifiable,
    Associations,
    PartialEq,
    Serialize,
    Deserialize,
)]
#[diesel(belongs_to(DiaryUser, foreign_key = owner_id))]
#[diesel(table_name = crate::schema::diary_entry)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DiaryEntry {
    /// Unique entry ID.
    pub id: Uuid,
    /// The user that owns this entry.
    pub owner_id: Uuid,
    /// The day this entry is about. May carry a time component.
    pub entry_date: DateTime<Utc>,
    /// Entry text.
    pub content: String,
    /// When this entry was created.
    pub created_at: DateTime<Utc>,
    /// When this entry was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new entry.
#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::diary_entry)]
pub struct DiaryEntryCreate {
    pub owner_id: Uuid,
    pub entry_date: DateTime<Utc>,
    pub content: String,
}

/// Replacement values for an existing entry. The owner never changes.
#[derive(AsChangeset, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::diary_entry)]
pub struct DiaryEntryUpdate {
    pub entry_date: DateTime<Utc>,
    pub content: String,
}

impl DiaryEntryCreate {
    pub fn new(owner: Uuid, date: DateTime<Utc>, text: impl Into<String>) -> Self {
        Self {
            owner_id: owner,
            entry_date: date,
            content: text.into(),
        }
    }

    /// Inserts the entry.
    pub fn save(self, connection: &DbConnection) -> Result<DiaryEntry> {
        let conn = &mut connection.pool.get()?;

        Ok(diesel::insert_into(diary_entry)
            .values(&self)
            .returning(DiaryEntry::as_returning())
            .get_result(conn)?)
    }
}

impl DiaryEntryUpdate {
    pub fn new(date: DateTime<Utc>, text: impl Into<String>) -> Self {
        Self {
            entry_date: date,
            content: text.into(),
        }
    }

    /// Applies the update to the owner's entry, returning `None` if the owner
    /// has no entry with that ID.
    pub fn save(
        self,
        owner: &Uuid,
        target: &Uuid,
        connection: &DbConnection,
    ) -> Result<Option<DiaryEntry>> {
        let conn = &mut connection.pool.get()?;

        Ok(diesel::update(DiaryEntry::owned(owner, target))
            .set((&self, updated_at.eq(Utc::now())))
            .returning(DiaryEntry::as_returning())
            .get_result(conn)
            .optional()?)
    }
}

impl DiaryEntry {
    /// Fetches every entry of one owner.
    pub fn fetch_all(owner: &Uuid, connection: &DbConnection) -> Result<Vec<Self>> {
        let conn = &mut connection.pool.get()?;

        Ok(DiaryEntry::by_owner(owner)
            .select(DiaryEntry::as_select())
            .load(conn)?)
    }

    /// Fetches one entry by ID, scoped to its owner.
    pub fn fetch_owned(
        owner: &Uuid,
        target: &Uuid,
        connection: &DbConnection,
    ) -> Result<Option<Self>> {
        let conn = &mut connection.pool.get()?;

        Ok(DiaryEntry::owned(owner, target)
            .select(DiaryEntry::as_select())
            .first(conn)
            .optional()?)
    }

    /// Fetches the owner's entry stored at exactly `date`.
    pub fn fetch_at(
        owner: &Uuid,
        date: &DateTime<Utc>,
        connection: &DbConnection,
    ) -> Result<Option<Self>> {
        let conn = &mut connection.pool.get()?;

        Ok(DiaryEntry::by_owner(owner)
            .filter(entry_date.eq(date))
            .select(DiaryEntry::as_select())
            .first(conn)
            .optional()?)
    }

    /// Fetches the owner's earliest entry with `start <= entry_date < end`.
    pub fn fetch_between(
        owner: &Uuid,
        start: &DateTime<Utc>,
        end: &DateTime<Utc>,
        connection: &DbConnection,
    ) -> Result<Option<Self>> {
        let conn = &mut connection.pool.get()?;

        Ok(DiaryEntry::by_owner(owner)
            .filter(entry_date.ge(start))
            .filter(entry_date.lt(end))
            .order(entry_date.asc())
            .select(DiaryEntry::as_select())
            .first(conn)
            .optional()?)
    }

    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn by_owner(owner: &Uuid) -> _ {
        crate::schema::diary_entry::dsl::diary_entry.filter(owner_id.eq(owner))
    }

    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn owned<'a>(owner: &'a Uuid, target: &'a Uuid) -> _ {
        crate::schema::diary_entry::dsl::diary_entry
            .filter(owner_id.eq(owner))
            .filter(id.eq(target))
    }
}
