//! Variable-length sequences of values.

use std::any::Any;

use crate::container::base::{downcast_container, ChangeFlag, ContainerBase};
use crate::error::ContainerError;
use crate::model::{CollectionType, MemberType, MemberValue};

/// An ordered, variable-length list of values with one change flag.
///
/// Elements cannot be individually null; an absent element is simply not
/// in the sequence. Any insert, append, replace or removal marks the whole
/// sequence changed. An empty sequence is null.
///
/// ```
/// use dob_typesystem::container::{ContainerBase, Int32SequenceContainer};
///
/// let mut seq = Int32SequenceContainer::new();
/// seq.insert(0, 1).unwrap();
/// seq.insert(0, 2).unwrap();
/// seq.replace(2, 3).unwrap();
/// assert_eq!(seq.as_slice(), &[2, 1, 3]);
/// assert!(seq.is_changed());
/// ```
#[derive(Debug, Clone)]
pub struct SequenceContainer<T: MemberValue> {
    values: Vec<T>,
    changed: ChangeFlag,
}

impl<T: MemberValue> SequenceContainer<T> {
    /// Creates an empty, unchanged sequence.
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            changed: ChangeFlag::new(),
        }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the element at `index`.
    pub fn get(&self, index: usize) -> Result<&T, ContainerError> {
        self.values
            .get(index)
            .ok_or(ContainerError::out_of_range(index, self.values.len()))
    }

    /// Inserts `value` at `index`, shifting later elements.
    ///
    /// `index == len()` appends. Anything beyond fails and leaves the
    /// sequence untouched.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), ContainerError> {
        if index > self.values.len() {
            return Err(ContainerError::out_of_range(index, self.values.len()));
        }
        self.values.insert(index, value);
        self.changed.mark();
        Ok(())
    }

    /// Appends `value`.
    pub fn push(&mut self, value: T) {
        self.values.push(value);
        self.changed.mark();
    }

    /// Overwrites the element at `index`.
    ///
    /// `index == len()` appends instead, so that a caller can grow the
    /// sequence one element at a time without knowing its final length.
    pub fn replace(&mut self, index: usize, value: T) -> Result<(), ContainerError> {
        let len = self.values.len();
        match index.cmp(&len) {
            std::cmp::Ordering::Less => self.values[index] = value,
            std::cmp::Ordering::Equal => self.values.push(value),
            std::cmp::Ordering::Greater => {
                return Err(ContainerError::out_of_range(index, len));
            }
        }
        self.changed.mark();
        Ok(())
    }

    /// Removes and returns the element at `index`.
    pub fn remove_at(&mut self, index: usize) -> Result<T, ContainerError> {
        if index >= self.values.len() {
            return Err(ContainerError::out_of_range(index, self.values.len()));
        }
        self.changed.mark();
        Ok(self.values.remove(index))
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.values.clear();
        self.changed.mark();
    }

    /// Returns the elements as a read-only slice.
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }
}

impl<T: MemberValue> Default for SequenceContainer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: MemberValue> PartialEq for SequenceContainer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<T: MemberValue> FromIterator<T> for SequenceContainer<T> {
    /// Collects into a sequence marked changed, unless the iterator was empty.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let values: Vec<T> = iter.into_iter().collect();
        let mut changed = ChangeFlag::new();
        changed.set(!values.is_empty());
        Self { values, changed }
    }
}

impl<T: MemberValue> Extend<T> for SequenceContainer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<'a, T: MemberValue> IntoIterator for &'a SequenceContainer<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl<T: MemberValue> ContainerBase for SequenceContainer<T> {
    /// True if the sequence is empty.
    fn is_null(&self) -> bool {
        self.values.is_empty()
    }

    fn set_null(&mut self) {
        self.clear();
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
        CollectionType::Sequence
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
