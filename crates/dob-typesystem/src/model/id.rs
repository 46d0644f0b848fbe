//! Hashed 64-bit identifiers.
//!
//! Types, channels, handlers and instances are identified by a 64-bit
//! number. Identifiers created from a name carry the name along for
//! display, but compare, order and hash on the number alone.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use sha2::{Digest, Sha256};

use crate::error::IdError;

/// Generates the 64-bit identifier for a name.
///
/// ```text
/// id = i64::from_le_bytes(SHA-256(utf8(name))[0:8])
/// ```
pub fn generate_64(name: &str) -> i64 {
    let hash = Sha256::digest(name.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash[..8]);
    i64::from_le_bytes(bytes)
}

/// Identifier of a generated object type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(i64);

impl TypeId {
    /// Creates the type id for a fully qualified type name.
    pub fn from_name(name: &str) -> Self {
        TypeId(generate_64(name))
    }

    /// Wraps a raw type id.
    pub const fn from_raw(raw: i64) -> Self {
        TypeId(raw)
    }

    /// Returns the raw 64-bit value.
    pub const fn raw_value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! hashed_id {
    ($(#[$doc:meta])* $name:ident, $kind:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $name {
            raw: i64,
            name: String,
        }

        impl $name {
            /// Creates an identifier by hashing `name`. The name is kept for display.
            pub fn new(name: &str) -> Result<Self, IdError> {
                if name.is_empty() {
                    return Err(IdError::EmptyString { kind: $kind });
                }
                Ok(Self {
                    raw: generate_64(name),
                    name: name.to_string(),
                })
            }

            /// Wraps a raw identifier that has no name.
            pub fn from_raw(raw: i64) -> Self {
                Self {
                    raw,
                    name: String::new(),
                }
            }

            /// Wraps a raw identifier together with the name it was generated from.
            ///
            /// The name is not checked against the raw value.
            pub fn with_name(raw: i64, name: impl Into<String>) -> Self {
                Self {
                    raw,
                    name: name.into(),
                }
            }

            /// Returns the raw 64-bit value.
            pub fn raw_value(&self) -> i64 {
                self.raw
            }

            /// Returns the name, or an empty string if there is none.
            pub fn raw_name(&self) -> &str {
                &self.name
            }

            /// Drops the name, keeping only the raw value.
            pub fn remove_name(&mut self) {
                self.name.clear();
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.raw == other.raw
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.raw.hash(state);
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.raw.cmp(&other.raw)
            }
        }
    };
}

hashed_id!(
    /// Identifier of a channel that entities and messages are sent on.
    ChannelId,
    "ChannelId"
);

hashed_id!(
    /// Identifier of a handler that owns entities or services requests.
    HandlerId,
    "HandlerId"
);

hashed_id!(
    /// Identifier of one instance of an entity type.
    InstanceId,
    "InstanceId"
);

const DEFAULT_CHANNEL_NAME: &str = "DEFAULT_CHANNEL";
const ALL_CHANNELS_NAME: &str = "ALL_CHANNELS";
const DEFAULT_HANDLER_NAME: &str = "DEFAULT_HANDLER";
const ALL_HANDLERS_NAME: &str = "ALL_HANDLERS";

lazy_static::lazy_static! {
    static ref DEFAULT_CHANNEL: ChannelId =
        ChannelId::with_name(generate_64(DEFAULT_CHANNEL_NAME), DEFAULT_CHANNEL_NAME);
    static ref ALL_CHANNELS: ChannelId =
        ChannelId::with_name(generate_64(ALL_CHANNELS_NAME), ALL_CHANNELS_NAME);
    static ref DEFAULT_HANDLER: HandlerId =
        HandlerId::with_name(generate_64(DEFAULT_HANDLER_NAME), DEFAULT_HANDLER_NAME);
    static ref ALL_HANDLERS: HandlerId =
        HandlerId::with_name(generate_64(ALL_HANDLERS_NAME), ALL_HANDLERS_NAME);
}

impl ChannelId {
    /// The channel used when none is specified.
    pub fn default_channel() -> Self {
        DEFAULT_CHANNEL.clone()
    }

    /// The channel that addresses every channel.
    pub fn all_channels() -> Self {
        ALL_CHANNELS.clone()
    }
}

impl Default for ChannelId {
    fn default() -> Self {
        Self::default_channel()
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.name.is_empty() {
            f.write_str(&self.name)
        } else if self.raw == DEFAULT_CHANNEL.raw {
            f.write_str(DEFAULT_CHANNEL_NAME)
        } else if self.raw == ALL_CHANNELS.raw {
            f.write_str(ALL_CHANNELS_NAME)
        } else {
            write!(f, "{}", self.raw)
        }
    }
}

impl HandlerId {
    /// The handler used when none is specified.
    pub fn default_handler() -> Self {
        DEFAULT_HANDLER.clone()
    }

    /// The handler that addresses every handler.
    pub fn all_handlers() -> Self {
        ALL_HANDLERS.clone()
    }
}

impl Default for HandlerId {
    fn default() -> Self {
        Self::default_handler()
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.name.is_empty() {
            f.write_str(&self.name)
        } else if self.raw == DEFAULT_HANDLER.raw {
            f.write_str(DEFAULT_HANDLER_NAME)
        } else if self.raw == ALL_HANDLERS.raw {
            f.write_str(ALL_HANDLERS_NAME)
        } else {
            write!(f, "{}", self.raw)
        }
    }
}

impl InstanceId {
    /// Generates a random instance id.
    pub fn generate_random() -> Self {
        let uuid = uuid::Uuid::new_v4();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&uuid.as_bytes()[..8]);
        Self::from_raw(i64::from_le_bytes(bytes))
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.raw)
        } else {
            f.write_str(&self.name)
        }
    }
}

/// Identifies one entity: its type plus its instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId {
    pub type_id: TypeId,
    pub instance_id: InstanceId,
}

impl EntityId {
    pub fn new(type_id: TypeId, instance_id: InstanceId) -> Self {
        Self {
            type_id,
            instance_id,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.type_id, self.instance_id)
    }
}
