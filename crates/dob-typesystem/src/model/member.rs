//! Member type descriptors.
//!
//! Every member of a generated object has a member type (what kind of value
//! it holds) and a collection type (how many of them, and how they are
//! addressed).

use std::fmt::Debug;
use std::hash::Hash;

use crate::model::{ChannelId, EntityId, HandlerId, InstanceId, TypeId};

/// Types a member value can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MemberType {
    Boolean = 1,
    Enumeration = 2,
    Int32 = 3,
    Int64 = 4,
    Float32 = 5,
    Float64 = 6,
    TypeId = 7,
    InstanceId = 8,
    EntityId = 9,
    ChannelId = 10,
    HandlerId = 11,
    String = 12,
    Object = 13,
    Binary = 14,
}

impl MemberType {
    /// Creates a MemberType from its numeric representation.
    pub fn from_u8(v: u8) -> Option<MemberType> {
        match v {
            1 => Some(MemberType::Boolean),
            2 => Some(MemberType::Enumeration),
            3 => Some(MemberType::Int32),
            4 => Some(MemberType::Int64),
            5 => Some(MemberType::Float32),
            6 => Some(MemberType::Float64),
            7 => Some(MemberType::TypeId),
            8 => Some(MemberType::InstanceId),
            9 => Some(MemberType::EntityId),
            10 => Some(MemberType::ChannelId),
            11 => Some(MemberType::HandlerId),
            12 => Some(MemberType::String),
            13 => Some(MemberType::Object),
            14 => Some(MemberType::Binary),
            _ => None,
        }
    }

    /// Returns true if values of this type can be used as dictionary keys.
    pub fn is_valid_key(self) -> bool {
        matches!(
            self,
            MemberType::Enumeration
                | MemberType::Int32
                | MemberType::Int64
                | MemberType::TypeId
                | MemberType::InstanceId
                | MemberType::EntityId
                | MemberType::ChannelId
                | MemberType::HandlerId
                | MemberType::String
        )
    }
}

/// Shape of a member: single value or one of the collection kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionType {
    Single,
    Array,
    Sequence,
    Dictionary,
}

/// A Rust type that can be stored in a value, sequence or dictionary container.
///
/// User enumerations implement this with [`MemberType::Enumeration`].
pub trait MemberValue: Clone + PartialEq + Debug + 'static {
    /// The member type this Rust type represents.
    const MEMBER_TYPE: MemberType;
}

/// A member value that can key a dictionary container.
pub trait DictionaryKey: MemberValue + Eq + Hash {}

macro_rules! member_values {
    ($($ty:ty => $member:ident),* $(,)?) => {
        $(
            impl MemberValue for $ty {
                const MEMBER_TYPE: MemberType = MemberType::$member;
            }
        )*
    };
}

member_values! {
    bool => Boolean,
    i32 => Int32,
    i64 => Int64,
    f32 => Float32,
    f64 => Float64,
    String => String,
    Vec<u8> => Binary,
    TypeId => TypeId,
    InstanceId => InstanceId,
    EntityId => EntityId,
    ChannelId => ChannelId,
    HandlerId => HandlerId,
}

impl DictionaryKey for i32 {}
impl DictionaryKey for i64 {}
impl DictionaryKey for String {}
impl DictionaryKey for TypeId {}
impl DictionaryKey for InstanceId {}
impl DictionaryKey for EntityId {}
impl DictionaryKey for ChannelId {}
impl DictionaryKey for HandlerId {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_type_from_u8() {
        for v in 1..=14u8 {
            let ty = MemberType::from_u8(v).unwrap();
            assert_eq!(ty as u8, v);
        }
        assert_eq!(MemberType::from_u8(0), None);
        assert_eq!(MemberType::from_u8(15), None);
    }

    #[test]
    fn test_valid_keys() {
        assert!(MemberType::String.is_valid_key());
        assert!(MemberType::EntityId.is_valid_key());
        assert!(!MemberType::Float64.is_valid_key());
        assert!(!MemberType::Object.is_valid_key());
        assert!(!MemberType::Binary.is_valid_key());
    }

    #[test]
    fn test_rust_types_map_to_member_types() {
        assert_eq!(<i32 as MemberValue>::MEMBER_TYPE, MemberType::Int32);
        assert_eq!(<Vec<u8> as MemberValue>::MEMBER_TYPE, MemberType::Binary);
        assert_eq!(<ChannelId as MemberValue>::MEMBER_TYPE, MemberType::ChannelId);
    }
}
