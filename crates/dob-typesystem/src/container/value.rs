//! Container for a single member value.

use std::any::Any;

use crate::container::base::{downcast_container, ChangeFlag, ContainerBase};
use crate::error::ContainerError;
use crate::model::{CollectionType, MemberType, MemberValue};

/// Holds one value of type `T`, or null, plus a change flag.
///
/// Equality between two containers is null-safe and ignores the change
/// flag. Comparing against a raw value goes through [`container_equals`]
/// and [`value_equals`].
#[derive(Debug, Clone)]
pub struct ValueContainer<T: MemberValue> {
    value: Option<T>,
    changed: ChangeFlag,
}

impl<T: MemberValue> ValueContainer<T> {
    /// Creates a null and unchanged container.
    pub fn new() -> Self {
        Self {
            value: None,
            changed: ChangeFlag::new(),
        }
    }

    /// Returns the value, or [`ContainerError::NullValue`] if the container is null.
    pub fn val(&self) -> Result<&T, ContainerError> {
        self.value.as_ref().ok_or(ContainerError::NullValue)
    }

    /// Returns the value for in-place modification, marking the container changed.
    ///
    /// Fails with [`ContainerError::NullValue`] if the container is null.
    pub fn val_mut(&mut self) -> Result<&mut T, ContainerError> {
        match self.value.as_mut() {
            Some(v) => {
                self.changed.mark();
                Ok(v)
            }
            None => Err(ContainerError::NullValue),
        }
    }

    /// Stores `value`. The container becomes non-null and changed.
    pub fn set_val(&mut self, value: T) {
        self.value = Some(value);
        self.changed.mark();
    }

    /// Returns the value if present.
    pub fn get_or_null(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Takes the value out, leaving the container null and changed.
    pub fn take(&mut self) -> Option<T> {
        self.changed.mark();
        self.value.take()
    }
}

impl<T: MemberValue> Default for ValueContainer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: MemberValue> From<T> for ValueContainer<T> {
    /// Creates a non-null container that is marked changed.
    fn from(value: T) -> Self {
        let mut c = Self::new();
        c.set_val(value);
        c
    }
}

impl<T: MemberValue> PartialEq for ValueContainer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: MemberValue> ContainerBase for ValueContainer<T> {
    fn is_null(&self) -> bool {
        self.value.is_none()
    }

    fn set_null(&mut self) {
        self.value = None;
        self.changed.mark();
    }

    fn is_changed(&self) -> bool {
        self.changed.is_set()
    }

    fn set_changed(&mut self, changed: bool) {
        self.changed.set(changed);
    }

    fn copy_from(&mut self, other: &dyn ContainerBase) -> Result<(), ContainerError> {
        let that = downcast_container::<Self>(other)?;
        self.clone_from(that);
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn ContainerBase> {
        Box::new(self.clone())
    }

    fn collection_type(&self) -> CollectionType {
        CollectionType::Single
    }

    fn member_type(&self) -> MemberType {
        T::MEMBER_TYPE
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Returns true if `container` is non-null and holds a value equal to `value`.
///
/// A null container is unequal to every value. The change flag is ignored.
pub fn container_equals<T: MemberValue>(container: &ValueContainer<T>, value: &T) -> bool {
    container.value.as_ref() == Some(value)
}

/// Symmetric form of [`container_equals`].
pub fn value_equals<T: MemberValue>(value: &T, container: &ValueContainer<T>) -> bool {
    container_equals(container, value)
}
