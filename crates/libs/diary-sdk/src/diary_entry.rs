use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of `POST /api/diary` and `PUT /api/diary/{id}`.
///
/// `date` is either `YYYY-MM-DD` or an RFC 3339 timestamp.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiaryEntryPost {
    pub date: String,
    pub content: String,
}

/// A diary entry as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DiaryEntryApi {
    pub id: Uuid,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub date: DateTime<Utc>,
    pub content: String,
}

impl DiaryEntryPost {
    pub fn new(date: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            content: content.into(),
        }
    }
}
