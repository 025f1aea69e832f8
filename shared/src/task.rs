use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque task identifier.
///
/// Fresh ids are hyphenated v4 UUIDs, but ids read back from storage are
/// taken as-is, so nothing here assumes a particular shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TaskId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for TaskId {
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub done: bool,
}

impl Task {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: TaskId::generate(),
            text: text.into(),
            done: false,
        }
    }
}
