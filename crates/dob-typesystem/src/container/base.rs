//! The capability shared by every container kind.

use std::any::{type_name, Any};
use std::fmt::Debug;

use crate::error::ContainerError;
use crate::model::{CollectionType, MemberType};

/// Null and change tracking common to all containers.
///
/// Generated objects hand their members out as `&dyn ContainerBase` so that
/// serializers and editors can inspect and copy them without knowing the
/// concrete element type.
pub trait ContainerBase: Debug + Any {
    /// Returns true if the container holds no value.
    fn is_null(&self) -> bool;

    /// Clears the value. The container becomes null and changed.
    fn set_null(&mut self);

    /// Returns true if the container was modified since the change flag was last reset.
    fn is_changed(&self) -> bool;

    /// Sets or resets the change flag.
    fn set_changed(&mut self, changed: bool);

    /// Copies contents and flags from a container of the same concrete type.
    ///
    /// Fails with [`ContainerError::TypeMismatch`] otherwise, leaving `self`
    /// untouched.
    fn copy_from(&mut self, other: &dyn ContainerBase) -> Result<(), ContainerError>;

    /// Applies the changes recorded in `from` on top of `self`.
    ///
    /// Containers with per-element change flags merge only changed
    /// elements; the rest copy everything when `from` is changed and do
    /// nothing otherwise.
    fn merge_changes(&mut self, from: &dyn ContainerBase) -> Result<(), ContainerError> {
        if from.is_changed() {
            self.copy_from(from)
        } else {
            Ok(())
        }
    }

    /// Returns an independent copy with identical value and flags.
    fn clone_box(&self) -> Box<dyn ContainerBase>;

    /// Returns the shape of this container.
    fn collection_type(&self) -> CollectionType;

    /// Returns the type of the values held.
    fn member_type(&self) -> MemberType;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Name of the concrete container type, used in error reports.
    fn container_type_name(&self) -> &'static str {
        type_name::<Self>()
    }
}

impl Clone for Box<dyn ContainerBase> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Downcasts `other` to the concrete container type `C`.
pub(crate) fn downcast_container<C: ContainerBase>(
    other: &dyn ContainerBase,
) -> Result<&C, ContainerError> {
    match other.as_any().downcast_ref::<C>() {
        Some(c) => Ok(c),
        None => {
            let err = ContainerError::TypeMismatch {
                expected: type_name::<C>(),
                found: other.container_type_name(),
            };
            #[cfg(feature = "tracing")]
            tracing::debug!(error = %err, "rejected container copy");
            Err(err)
        }
    }
}

/// The change-tracked cell embedded in every container.
///
/// Containers never clear this flag on their own; only the owner resets it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeFlag(bool);

impl ChangeFlag {
    /// Creates an unchanged flag.
    pub const fn new() -> Self {
        ChangeFlag(false)
    }

    #[inline]
    pub fn is_set(self) -> bool {
        self.0
    }

    #[inline]
    pub fn set(&mut self, changed: bool) {
        self.0 = changed;
    }

    /// Marks the owning container as changed.
    #[inline]
    pub fn mark(&mut self) {
        self.0 = true;
    }
}
