//! Identifier types for the board domain.
//!
//! Identifiers are opaque strings issued by the remote store. Status
//! identifiers may also be synthetic (`todo`, `done`, ...) when a workspace
//! has no configured pipeline, so none of them assume a UUID shape.

use super::BoardDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a validated identifier.
            ///
            /// # Errors
            ///
            /// Returns [`BoardDomainError::EmptyIdentifier`] when the value is
            /// empty after trimming.
            pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
                let raw = value.into();
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(BoardDomainError::EmptyIdentifier { kind: $kind });
                }
                Ok(Self(trimmed.to_owned()))
            }

            /// Returns the identifier as `str`.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of a task record.
    TaskId,
    "task"
);

string_id!(
    /// Identifier of a pipeline stage (board column).
    StatusId,
    "status"
);

string_id!(
    /// Identifier of the project whose tasks are loaded.
    ProjectId,
    "project"
);

string_id!(
    /// Identifier of the workspace that owns a status pipeline.
    WorkspaceId,
    "workspace"
);

string_id!(
    /// Identifier of a workspace member.
    UserId,
    "user"
);

impl StatusId {
    /// Creates an identifier for a built-in status that is never persisted.
    pub(crate) fn synthetic(value: &'static str) -> Self {
        Self(value.to_owned())
    }
}

impl TaskId {
    /// Creates a random task identifier for locally created tasks.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}
