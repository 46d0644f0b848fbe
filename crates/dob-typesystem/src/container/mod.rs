//! Null- and change-tracked containers for object members.
//!
//! Every member of a generated object is one of:
//! - [`ValueContainer`]: a single value
//! - [`ArrayContainer`]: a fixed number of independently tracked slots
//! - [`SequenceContainer`]: a variable-length list with one change flag
//! - [`DictionaryContainer`]: keyed value containers
//! - [`ObjectContainer`]: a nested generated object
//!
//! All of them implement [`ContainerBase`].

pub mod array;
pub mod base;
pub mod dictionary;
pub mod object;
pub mod sequence;
pub mod value;

pub use array::ArrayContainer;
pub use base::{ChangeFlag, ContainerBase};
pub use dictionary::DictionaryContainer;
pub use object::{Object, ObjectContainer};
pub use sequence::SequenceContainer;
pub use value::{container_equals, value_equals, ValueContainer};

use crate::model::{ChannelId, EntityId, HandlerId, InstanceId, TypeId};

pub type BooleanContainer = ValueContainer<bool>;
pub type Int32Container = ValueContainer<i32>;
pub type Int64Container = ValueContainer<i64>;
pub type Float32Container = ValueContainer<f32>;
pub type Float64Container = ValueContainer<f64>;
pub type StringContainer = ValueContainer<String>;
pub type BinaryContainer = ValueContainer<Vec<u8>>;
pub type TypeIdContainer = ValueContainer<TypeId>;
pub type InstanceIdContainer = ValueContainer<InstanceId>;
pub type EntityIdContainer = ValueContainer<EntityId>;
pub type ChannelIdContainer = ValueContainer<ChannelId>;
pub type HandlerIdContainer = ValueContainer<HandlerId>;

pub type BooleanContainerArray = ArrayContainer<BooleanContainer>;
pub type Int32ContainerArray = ArrayContainer<Int32Container>;
pub type Int64ContainerArray = ArrayContainer<Int64Container>;
pub type Float32ContainerArray = ArrayContainer<Float32Container>;
pub type Float64ContainerArray = ArrayContainer<Float64Container>;
pub type StringContainerArray = ArrayContainer<StringContainer>;
pub type BinaryContainerArray = ArrayContainer<BinaryContainer>;
pub type EntityIdContainerArray = ArrayContainer<EntityIdContainer>;

pub type BooleanSequenceContainer = SequenceContainer<bool>;
pub type Int32SequenceContainer = SequenceContainer<i32>;
pub type Int64SequenceContainer = SequenceContainer<i64>;
pub type Float32SequenceContainer = SequenceContainer<f32>;
pub type Float64SequenceContainer = SequenceContainer<f64>;
pub type StringSequenceContainer = SequenceContainer<String>;
pub type BinarySequenceContainer = SequenceContainer<Vec<u8>>;
pub type EntityIdSequenceContainer = SequenceContainer<EntityId>;

/// SI unit members stored as 32-bit floats.
pub mod si32 {
    use super::{ArrayContainer, Float32Container, SequenceContainer};

    pub type MeterContainer = Float32Container;
    pub type SecondContainer = Float32Container;
    pub type KilogramContainer = Float32Container;
    pub type PascalContainer = Float32Container;
    pub type KelvinContainer = Float32Container;
    pub type RadianContainer = Float32Container;
    pub type MeterPerSecondContainer = Float32Container;

    pub type MeterContainerArray = ArrayContainer<MeterContainer>;
    pub type PascalContainerArray = ArrayContainer<PascalContainer>;
    pub type RadianContainerArray = ArrayContainer<RadianContainer>;

    pub type MeterSequenceContainer = SequenceContainer<f32>;
    pub type PascalSequenceContainer = SequenceContainer<f32>;
}

/// SI unit members stored as 64-bit floats.
pub mod si64 {
    use super::{ArrayContainer, Float64Container, SequenceContainer};

    pub type MeterContainer = Float64Container;
    pub type SecondContainer = Float64Container;
    pub type KilogramContainer = Float64Container;
    pub type PascalContainer = Float64Container;
    pub type KelvinContainer = Float64Container;
    pub type RadianContainer = Float64Container;
    pub type MeterPerSecondContainer = Float64Container;

    pub type MeterContainerArray = ArrayContainer<MeterContainer>;
    pub type PascalContainerArray = ArrayContainer<PascalContainer>;
    pub type RadianContainerArray = ArrayContainer<RadianContainer>;

    pub type MeterSequenceContainer = SequenceContainer<f64>;
    pub type PascalSequenceContainer = SequenceContainer<f64>;
}
