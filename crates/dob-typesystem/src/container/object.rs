//! Generated objects and containers holding them.

use std::any::Any;
use std::fmt::Debug;

use crate::container::base::{downcast_container, ChangeFlag, ContainerBase};
use crate::delta;
use crate::error::ContainerError;
use crate::model::{CollectionType, MemberType, TypeId};

/// A generated object: a fixed list of named member containers.
///
/// Members are addressed by index in declaration order. Implement this by
/// hand or with [`impl_object!`](crate::impl_object).
pub trait Object: Debug + 'static {
    /// The type id of the generated type.
    fn object_type(&self) -> TypeId;

    /// The fully qualified name of the generated type.
    fn type_name(&self) -> &'static str;

    /// Number of members.
    fn member_count(&self) -> usize;

    /// Name of the member at `index`.
    fn member_name(&self, index: usize) -> Option<&'static str>;

    fn member(&self, index: usize) -> Option<&dyn ContainerBase>;

    fn member_mut(&mut self, index: usize) -> Option<&mut dyn ContainerBase>;

    /// Looks up a member index by name.
    fn member_index(&self, name: &str) -> Option<usize> {
        (0..self.member_count()).find(|&i| self.member_name(i) == Some(name))
    }
}

/// Implements [`Object`] for a struct whose fields are all containers.
///
/// Members are numbered in the order the fields are listed.
///
/// ```
/// use dob_typesystem::container::{Float64Container, Object, StringContainer};
/// use dob_typesystem::impl_object;
///
/// #[derive(Debug, Clone, Default)]
/// struct Position {
///     name: StringContainer,
///     lat: Float64Container,
/// }
///
/// impl_object!(Position, "Demo.Position", [name, lat]);
///
/// let pos = Position::default();
/// assert_eq!(pos.member_count(), 2);
/// assert_eq!(pos.member_index("lat"), Some(1));
/// ```
#[macro_export]
macro_rules! impl_object {
    ($ty:ty, $type_name:literal, [$($field:ident),* $(,)?]) => {
        impl $crate::container::Object for $ty {
            fn object_type(&self) -> $crate::model::TypeId {
                $crate::model::TypeId::from_name($type_name)
            }

            fn type_name(&self) -> &'static str {
                $type_name
            }

            fn member_count(&self) -> usize {
                let names: &[&'static str] = &[$(stringify!($field)),*];
                names.len()
            }

            fn member_name(&self, index: usize) -> Option<&'static str> {
                let names: &[&'static str] = &[$(stringify!($field)),*];
                names.get(index).copied()
            }

            #[allow(unused_assignments, unused_mut, unused_variables)]
            fn member(&self, index: usize) -> Option<&dyn $crate::container::ContainerBase> {
                let mut i = 0usize;
                $(
                    if index == i {
                        return Some(&self.$field as &dyn $crate::container::ContainerBase);
                    }
                    i += 1;
                )*
                None
            }

            #[allow(unused_assignments, unused_mut, unused_variables)]
            fn member_mut(
                &mut self,
                index: usize,
            ) -> Option<&mut dyn $crate::container::ContainerBase> {
                let mut i = 0usize;
                $(
                    if index == i {
                        return Some(&mut self.$field as &mut dyn $crate::container::ContainerBase);
                    }
                    i += 1;
                )*
                None
            }
        }
    };
}

/// Holds one generated object, or null, plus a change flag of its own.
///
/// The container reports changed if its own flag is set or if any member of
/// the held object is changed.
#[derive(Debug, Clone)]
pub struct ObjectContainer<O: Object + Clone> {
    value: Option<Box<O>>,
    changed: ChangeFlag,
}

impl<O: Object + Clone> ObjectContainer<O> {
    /// Creates a null and unchanged container.
    pub fn new() -> Self {
        Self {
            value: None,
            changed: ChangeFlag::new(),
        }
    }

    /// Returns the object, or [`ContainerError::NullValue`] if the container is null.
    pub fn obj(&self) -> Result<&O, ContainerError> {
        self.value.as_deref().ok_or(ContainerError::NullValue)
    }

    /// Returns the object for modification.
    ///
    /// Member changes are tracked by the members themselves, so this does
    /// not set the container's own flag.
    pub fn obj_mut(&mut self) -> Result<&mut O, ContainerError> {
        self.value.as_deref_mut().ok_or(ContainerError::NullValue)
    }

    /// Stores `obj`. The container becomes non-null and changed.
    pub fn set_obj(&mut self, obj: O) {
        self.value = Some(Box::new(obj));
        self.changed.mark();
    }

    /// Returns true if the container's own flag is set, ignoring members.
    pub fn is_changed_here(&self) -> bool {
        self.changed.is_set()
    }

    /// Sets the container's own flag without touching members.
    pub fn set_changed_here(&mut self, changed: bool) {
        self.changed.set(changed);
    }
}

impl<O: Object + Clone> Default for ObjectContainer<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: Object + Clone + PartialEq> PartialEq for ObjectContainer<O> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<O: Object + Clone> ContainerBase for ObjectContainer<O> {
    fn is_null(&self) -> bool {
        self.value.is_none()
    }

    fn set_null(&mut self) {
        self.value = None;
        self.changed.mark();
    }

    fn is_changed(&self) -> bool {
        self.changed.is_set() || self.value.as_deref().is_some_and(|o| delta::is_changed(o))
    }

    /// Sets the own flag and the flags of every member, recursively.
    fn set_changed(&mut self, changed: bool) {
        self.changed.set(changed);
        if let Some(obj) = self.value.as_deref_mut() {
            delta::set_changed(obj, changed);
        }
    }

    fn copy_from(&mut self, other: &dyn ContainerBase) -> Result<(), ContainerError> {
        let that = downcast_container::<Self>(other)?;
        self.clone_from(that);
        Ok(())
    }

    /// Merges member by member when both sides hold an object and `from`
    /// was not replaced wholesale.
    fn merge_changes(&mut self, from: &dyn ContainerBase) -> Result<(), ContainerError> {
        let that = downcast_container::<Self>(from)?;
        if !that.is_changed() {
            return Ok(());
        }
        if that.changed.is_set() || self.value.is_none() {
            self.clone_from(that);
            return Ok(());
        }
        if let (Some(into), Some(src)) = (self.value.as_deref_mut(), that.value.as_deref()) {
            delta::merge_changes(into, src)?;
        }
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn ContainerBase> {
        Box::new(self.clone())
    }

    fn collection_type(&self) -> CollectionType {
        CollectionType::Single
    }

    fn member_type(&self) -> MemberType {
        MemberType::Object
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
    use crate::container::{Float64Container, Int32Container, StringContainer};

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Position {
        lat: Float64Container,
        lon: Float64Container,
    }

    crate::impl_object!(Position, "Test.Position", [lat, lon]);

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Track {
        callsign: StringContainer,
        quality: Int32Container,
        position: ObjectContainer<Position>,
    }

    crate::impl_object!(Track, "Test.Track", [callsign, quality, position]);

    #[test]
    fn test_object_members() {
        let track = Track::default();
        assert_eq!(track.member_count(), 3);
        assert_eq!(track.member_name(2), Some("position"));
        assert_eq!(track.member_name(3), None);
        assert_eq!(track.member_index("quality"), Some(1));
        assert!(track.member(3).is_none());
        assert_eq!(track.member(2).unwrap().member_type(), MemberType::Object);
        assert_eq!(track.object_type(), TypeId::from_name("Test.Track"));
    }

    #[test]
    fn test_member_mut_reaches_field() {
        let mut track = Track::default();
        track.member_mut(1).unwrap().set_null();
        assert!(track.quality.is_changed());
    }

    #[test]
    fn test_null_object_container() {
        let mut c = ObjectContainer::<Position>::new();
        assert!(c.is_null());
        assert!(!c.is_changed());
        assert_eq!(c.obj().unwrap_err(), ContainerError::NullValue);
        assert!(c.obj_mut().is_err());
    }

    #[test]
    fn test_nested_change_propagates() {
        let mut c = ObjectContainer::new();
        c.set_obj(Position::default());
        c.set_changed(false);
        assert!(!c.is_changed());

        c.obj_mut().unwrap().lat.set_val(57.7);
        assert!(c.is_changed());
        assert!(!c.is_changed_here());
    }

    #[test]
    fn test_set_changed_recurses() {
        let mut track = Track::default();
        let mut pos = Position::default();
        pos.lon.set_val(11.9);
        track.position.set_obj(pos);

        track.position.set_changed(false);
        assert!(!track.position.obj().unwrap().lon.is_changed());

        track.position.set_changed(true);
        assert!(track.position.obj().unwrap().lat.is_changed());
    }

    #[test]
    fn test_merge_nested_members() {
        let mut base = ObjectContainer::new();
        let mut pos = Position::default();
        pos.lat.set_val(1.0);
        pos.lon.set_val(2.0);
        base.set_obj(pos);
        base.set_changed(false);

        let mut update = base.clone();
        update.obj_mut().unwrap().lon.set_val(3.0);

        let mut target = ObjectContainer::new();
        let mut other = Position::default();
        other.lat.set_val(10.0);
        other.lon.set_val(20.0);
        target.set_obj(other);

        target.merge_changes(&update).unwrap();
        let merged = target.obj().unwrap();
        assert_eq!(merged.lat.val(), Ok(&10.0));
        assert_eq!(merged.lon.val(), Ok(&3.0));
    }

    #[test]
    fn test_merge_replaced_object_copies_all() {
        let mut target = ObjectContainer::<Position>::new();
        let mut update = ObjectContainer::new();
        let mut pos = Position::default();
        pos.lat.set_val(5.0);
        update.set_obj(pos);

        target.merge_changes(&update).unwrap();
        assert_eq!(target, update);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut c = ObjectContainer::new();
        c.set_obj(Position::default());
        let mut copy = c.clone();
        copy.obj_mut().unwrap().lat.set_val(1.0);
        assert!(c.obj().unwrap().lat.is_null());
    }
}
