//! Data model types for the DOB typesystem.
//!
//! This module contains the types that container members are described
//! and identified with:
//! - Identifiers (hashed 64-bit ids)
//! - Member and collection type descriptors

pub mod id;
pub mod member;

pub use id::{generate_64, ChannelId, EntityId, HandlerId, InstanceId, TypeId};
pub use member::{CollectionType, DictionaryKey, MemberType, MemberValue};
