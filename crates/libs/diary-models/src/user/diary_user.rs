//! User account model.

use std::fmt;

use crate::prelude::*;
use crate::{db::connection::DbConnection, schema::diary_user::dsl::*};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

/// A registered user.
///
/// `hash` is the argon2 PHC string of the trimmed password; the plaintext is
/// never stored.
#[derive(Clone, Queryable, Selectable, Identifiable, PartialEq)]
#[diesel(table_name = crate::schema::diary_user)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DiaryUser {
    /// Unique user ID.
    pub id: Uuid,
    /// Login name, unique and case-sensitive.
    pub username: String,
    /// Password hash.
    pub hash: String,
    /// When this user registered.
    pub created_at: DateTime<Utc>,
    /// When this user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl fmt::Debug for DiaryUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiaryUser")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("hash", &"REDACTED")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Data for creating a new user.
#[derive(Insertable, PartialEq, Clone)]
#[diesel(table_name = crate::schema::diary_user)]
pub struct DiaryUserCreate {
    /// Login name.
    pub username: String,
    /// Already hashed password.
    pub hash: String,
}

impl DiaryUserCreate {
    pub fn new(name: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: name.into(),
            hash: password_hash.into(),
        }
    }

    /// Inserts the user.
    pub fn save(self, connection: &DbConnection) -> Result<DiaryUser> {
        let conn = &mut connection.pool.get()?;

        Ok(diesel::insert_into(diary_user)
            .values(&self)
            .returning(DiaryUser::as_returning())
            .get_result(conn)?)
    }
}

impl DiaryUser {
    /// Fetches a user by login name.
    pub fn fetch_by_name(target: &str, connection: &DbConnection) -> Result<Option<Self>> {
        let conn = &mut connection.pool.get()?;

        Ok(DiaryUser::by_name(target)
            .select(DiaryUser::as_select())
            .first(conn)
            .optional()?)
    }

    /// Fetches a user by ID.
    pub fn fetch_by_id(target: &Uuid, connection: &DbConnection) -> Result<Option<Self>> {
        let conn = &mut connection.pool.get()?;

        Ok(DiaryUser::by_id(target)
            .select(DiaryUser::as_select())
            .first(conn)
            .optional()?)
    }

    /// Replaces the stored password hash.
    pub fn update_hash(
        target: &Uuid,
        new_hash: &str,
        connection: &DbConnection,
    ) -> Result<Option<Self>> {
        let conn = &mut connection.pool.get()?;

        Ok(diesel::update(DiaryUser::by_id(target))
            .set((hash.eq(new_hash), updated_at.eq(Utc::now())))
            .returning(DiaryUser::as_returning())
            .get_result(conn)
            .optional()?)
    }

    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn by_id(target: &Uuid) -> _ {
        crate::schema::diary_user::dsl::diary_user.filter(id.eq(target))
    }

    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn by_name(target: &str) -> _ {
        crate::schema::diary_user::dsl::diary_user.filter(username.eq(target))
    }
}
