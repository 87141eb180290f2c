//! Diary entry operations.
//!
//! Every function takes the caller's [`Ctx`] and scopes the store call by its
//! user ID, so another user's entry and a missing entry both end in
//! [`Error::NotFound`] through the same path.
//!
//! Creation guards the one entry per user per day rule on the exact stored
//! instant, while [`fetch_entry_by_date`] matches any instant within the local
//! calendar day. The two lookups answer different questions and are kept
//! apart on purpose.

use diary_models::{
    diary::diary_entry::{DiaryEntry, DiaryEntryCreate, DiaryEntryUpdate},
    error::Error as ModelError,
    store::EntryStore,
};
use diary_sdk::diary_entry::{DiaryEntryApi, DiaryEntryPost};
use tracing::info;
use uuid::Uuid;

use crate::{
    calendar::{local_day_bounds, parse_calendar_day, parse_entry_date},
    ctx::Ctx,
    prelude::*,
};

impl From<DiaryEntry> for W<DiaryEntryApi> {
    fn from(value: DiaryEntry) -> Self {
        Self(DiaryEntryApi {
            id: value.id,
            user_id: value.owner_id,
            date: value.entry_date,
            content: value.content,
        })
    }
}

fn to_api(entry: DiaryEntry) -> DiaryEntryApi {
    W::from(entry).0
}

/// A malformed ID cannot name an entry, so it is reported like a missing one.
pub fn parse_entry_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| Error::NotFound)
}

fn validate_content(content: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(Error::validation("\"content\" is required"));
    }
    Ok(())
}

fn map_unique_violation(err: ModelError) -> Error {
    match err {
        ModelError::UniqueViolation(_) => Error::DuplicateDate,
        other => other.into(),
    }
}

/// All entries of the caller.
pub fn list_entries(ctx: &Ctx, entries: &dyn EntryStore) -> Result<Vec<DiaryEntryApi>> {
    Ok(entries
        .fetch_entries(&ctx.user.id)?
        .into_iter()
        .map(to_api)
        .collect())
}

/// One entry of the caller by ID.
pub fn fetch_entry(ctx: &Ctx, id: &Uuid, entries: &dyn EntryStore) -> Result<DiaryEntryApi> {
    entries
        .fetch_entry(&ctx.user.id, id)?
        .map(to_api)
        .ok_or(Error::NotFound)
}

/// The caller's entry stored anywhere within the local calendar day of `date`.
pub fn fetch_entry_by_date(
    ctx: &Ctx,
    date: &str,
    entries: &dyn EntryStore,
) -> Result<DiaryEntryApi> {
    let day = parse_calendar_day(date)?;
    let (start, end) = local_day_bounds(day)?;
    entries
        .fetch_entry_between(&ctx.user.id, &start, &end)?
        .map(to_api)
        .ok_or(Error::NotFound)
}

/// Creates an entry for the caller.
///
/// The exact-date lookup rejects most duplicates early. Two racing requests
/// can both pass it; the store's unique constraint then rejects the loser,
/// which is reported as the same [`Error::DuplicateDate`].
pub fn create_entry(
    ctx: &Ctx,
    payload: DiaryEntryPost,
    entries: &dyn EntryStore,
) -> Result<DiaryEntryApi> {
    let date = parse_entry_date(&payload.date)?;
    validate_content(&payload.content)?;

    if entries.fetch_entry_at(&ctx.user.id, &date)?.is_some() {
        return Err(Error::DuplicateDate);
    }

    let entry = entries
        .create_entry(DiaryEntryCreate::new(ctx.user.id, date, payload.content))
        .map_err(map_unique_violation)?;
    info!("User {} created entry {}", ctx.user.id, entry.id);
    Ok(to_api(entry))
}

/// Replaces date and content of one of the caller's entries.
pub fn update_entry(
    ctx: &Ctx,
    id: &Uuid,
    payload: DiaryEntryPost,
    entries: &dyn EntryStore,
) -> Result<DiaryEntryApi> {
    let date = parse_entry_date(&payload.date)?;
    validate_content(&payload.content)?;

    let entry = entries
        .update_entry(
            &ctx.user.id,
            id,
            DiaryEntryUpdate::new(date, payload.content),
        )
        .map_err(map_unique_violation)?
        .ok_or(Error::NotFound)?;
    info!("User {} updated entry {}", ctx.user.id, entry.id);
    Ok(to_api(entry))
}
