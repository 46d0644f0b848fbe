//! Fixed-size arrays of containers.

use std::any::Any;

use crate::container::base::{downcast_container, ContainerBase};
use crate::error::ContainerError;
use crate::model::{CollectionType, MemberType};

/// A fixed number of independently tracked slots.
///
/// The size is the schema-declared array arity and cannot change after
/// construction. Each slot carries its own null and change flags; there is
/// no array-level flag; [`ContainerBase::is_changed`] is computed from the
/// slots on every call.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayContainer<C: ContainerBase + Default + Clone> {
    slots: Vec<C>,
}

impl<C: ContainerBase + Default + Clone> ArrayContainer<C> {
    /// Creates an array of `size` null, unchanged slots.
    pub fn new(size: usize) -> Self {
        let mut slots = Vec::with_capacity(size);
        slots.resize_with(size, C::default);
        Self { slots }
    }

    /// Creates an array from pre-initialized slots. The size is fixed to `slots.len()`.
    pub fn from_slots(slots: Vec<C>) -> Self {
        Self { slots }
    }

    /// Returns the array arity.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the slot at `index`.
    pub fn slot(&self, index: usize) -> Result<&C, ContainerError> {
        self.slots
            .get(index)
            .ok_or(ContainerError::out_of_range(index, self.slots.len()))
    }

    /// Returns the slot at `index` for modification.
    pub fn slot_mut(&mut self, index: usize) -> Result<&mut C, ContainerError> {
        let len = self.slots.len();
        self.slots
            .get_mut(index)
            .ok_or(ContainerError::out_of_range(index, len))
    }

    /// Iterates over the slots in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, C> {
        self.slots.iter()
    }

    /// Iterates mutably over the slots in index order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, C> {
        self.slots.iter_mut()
    }

    /// Returns the indices of slots whose change flag is set.
    pub fn changed_indices(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_changed())
            .map(|(i, _)| i)
            .collect()
    }
}

impl<'a, C: ContainerBase + Default + Clone> IntoIterator for &'a ArrayContainer<C> {
    type Item = &'a C;
    type IntoIter = std::slice::Iter<'a, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}

impl<C: ContainerBase + Default + Clone> ContainerBase for ArrayContainer<C> {
    /// True if every slot is null.
    fn is_null(&self) -> bool {
        self.slots.iter().all(|s| s.is_null())
    }

    /// Nulls every slot, marking each one changed.
    fn set_null(&mut self) {
        for slot in &mut self.slots {
            slot.set_null();
        }
    }

    fn is_changed(&self) -> bool {
        self.slots.iter().any(|s| s.is_changed())
    }

    fn set_changed(&mut self, changed: bool) {
        for slot in &mut self.slots {
            slot.set_changed(changed);
        }
    }

    /// Copies every slot. Arrays of different arity are different types.
    fn copy_from(&mut self, other: &dyn ContainerBase) -> Result<(), ContainerError> {
        let that = downcast_container::<Self>(other)?;
        if that.slots.len() != self.slots.len() {
            return Err(ContainerError::TypeMismatch {
                expected: self.container_type_name(),
                found: other.container_type_name(),
            });
        }
        self.slots.clone_from(&that.slots);
        Ok(())
    }

    /// Merges slot by slot; unchanged slots of `from` are skipped.
    fn merge_changes(&mut self, from: &dyn ContainerBase) -> Result<(), ContainerError> {
        let that = downcast_container::<Self>(from)?;
        if that.slots.len() != self.slots.len() {
            return Err(ContainerError::TypeMismatch {
                expected: self.container_type_name(),
                found: from.container_type_name(),
            });
        }
        for (slot, src) in self.slots.iter_mut().zip(&that.slots) {
            slot.merge_changes(src)?;
        }
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn ContainerBase> {
        Box::new(self.clone())
    }

    fn collection_type(&self) -> CollectionType {
        CollectionType::Array
    }

    fn member_type(&self) -> MemberType {
        match self.slots.first() {
            Some(slot) => slot.member_type(),
            None => C::default().member_type(),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{Int32Container, StringContainer};

    #[test]
    fn test_new_array_slots_are_null() {
        let arr = ArrayContainer::<Int32Container>::new(3);
        assert_eq!(arr.len(), 3);
        assert!(arr.is_null());
        assert!(!arr.is_changed());
        for i in 0..3 {
            assert!(arr.slot(i).unwrap().is_null());
        }
    }

    #[test]
    fn test_slot_out_of_range() {
        let mut arr = ArrayContainer::<Int32Container>::new(3);
        assert_eq!(
            arr.slot(3).unwrap_err(),
            ContainerError::IndexOutOfRange { index: 3, len: 3 }
        );
        assert!(arr.slot_mut(10).is_err());
    }

    #[test]
    fn test_slots_are_independent() {
        let mut arr = ArrayContainer::<Int32Container>::new(3);
        arr.slot_mut(1).unwrap().set_val(10);

        assert!(arr.slot(0).unwrap().is_null());
        assert!(!arr.slot(0).unwrap().is_changed());
        assert!(arr.slot(1).unwrap().is_changed());
        assert!(!arr.slot(2).unwrap().is_changed());
        assert!(arr.is_changed());
        assert!(!arr.is_null());
        assert_eq!(arr.changed_indices(), vec![1]);
    }

    #[test]
    fn test_set_changed_applies_to_all_slots() {
        let mut arr = ArrayContainer::<StringContainer>::new(2);
        arr.set_changed(true);
        assert!(arr.iter().all(|s| s.is_changed()));
        arr.set_changed(false);
        assert!(!arr.is_changed());
    }

    #[test]
    fn test_set_null() {
        let mut arr = ArrayContainer::<Int32Container>::new(2);
        arr.slot_mut(0).unwrap().set_val(1);
        arr.set_changed(false);
        arr.set_null();
        assert!(arr.is_null());
        assert_eq!(arr.changed_indices(), vec![0, 1]);
    }

    #[test]
    fn test_zero_arity() {
        let arr = ArrayContainer::<Int32Container>::new(0);
        assert!(arr.is_empty());
        assert!(arr.slot(0).is_err());
        assert_eq!(arr.member_type(), MemberType::Int32);
    }

    #[test]
    fn test_copy_requires_same_arity() {
        let mut src = ArrayContainer::<Int32Container>::new(2);
        src.slot_mut(0).unwrap().set_val(4);
        let mut dst = ArrayContainer::<Int32Container>::new(2);
        dst.copy_from(&src).unwrap();
        assert_eq!(dst, src);

        let mut short = ArrayContainer::<Int32Container>::new(1);
        assert!(matches!(
            short.copy_from(&src),
            Err(ContainerError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut src = ArrayContainer::<Int32Container>::new(2);
        let mut copy = src.clone();
        copy.slot_mut(0).unwrap().set_val(1);
        assert!(src.slot(0).unwrap().is_null());
        src.slot_mut(1).unwrap().set_val(2);
        assert!(copy.slot(1).unwrap().is_null());
    }
}
