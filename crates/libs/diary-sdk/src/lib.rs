//! Wire types of the diary HTTP API, shared by the server and its clients.

pub mod diary_entry;
pub mod diary_user;

use serde::{Deserialize, Serialize};

/// Plain acknowledgement body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MessageApi {
    pub message: String,
}

impl MessageApi {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
