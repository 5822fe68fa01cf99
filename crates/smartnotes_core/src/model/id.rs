//! Opaque resource identifiers.
//!
//! # Responsibility
//! - Carry server-issued ids without interpreting them.
//! - Keep topic ids and note ids distinct at the type level.
//!
//! # Invariants
//! - An id serializes back in the same JSON form it was decoded from
//!   (number stays number, string stays string).
//! - The client never checks that an id refers to an existing resource.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Raw server identifier: the backend uses integer keys, but string keys are
/// accepted so the client does not depend on the storage choice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Number(u64),
    Text(String),
}

impl Display for ResourceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl ResourceId {
    /// Reads an id from user text.
    ///
    /// Digits-only input becomes `Number`, so ids typed on a command line
    /// compare equal to ids decoded from JSON numbers.
    pub fn from_text(value: &str) -> Self {
        let trimmed = value.trim();
        match trimmed.parse::<u64>() {
            Ok(number) => Self::Number(number),
            Err(_) => Self::Text(trimmed.to_string()),
        }
    }
}

impl FromStr for ResourceId {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_text(value))
    }
}

macro_rules! resource_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(ResourceId);

        impl $name {
            /// Returns the raw server identifier.
            pub fn raw(&self) -> &ResourceId {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Ok(Self::from(value))
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(ResourceId::Number(value))
            }
        }

        /// Same digits-to-number rule as `FromStr`.
        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(ResourceId::from_text(value))
            }
        }

        impl From<ResourceId> for $name {
            fn from(value: ResourceId) -> Self {
                Self(value)
            }
        }
    };
}

resource_id!(
    /// Identifier of a server-owned topic.
    TopicId
);

resource_id!(
    /// Identifier of a server-owned note.
    NoteId
);
