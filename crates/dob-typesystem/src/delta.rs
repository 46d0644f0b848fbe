//! Object-level change tracking.
//!
//! A partial update carries only the members whose change flags are set.
//! These functions compute that set, reset it after a successful
//! transmission and apply a received delta on top of a local object.

use crate::container::{ContainerBase, Object};
use crate::error::ContainerError;

fn members(obj: &dyn Object) -> impl Iterator<Item = &dyn ContainerBase> {
    (0..obj.member_count()).filter_map(move |i| obj.member(i))
}

/// Returns true if any member of `obj` is changed, recursively.
pub fn is_changed(obj: &dyn Object) -> bool {
    members(obj).any(|m| m.is_changed())
}

/// Sets or resets the change flag of every member of `obj`, recursively.
pub fn set_changed(obj: &mut dyn Object, changed: bool) {
    for i in 0..obj.member_count() {
        if let Some(member) = obj.member_mut(i) {
            member.set_changed(changed);
        }
    }
}

/// Returns the indices of the changed members of `obj`.
pub fn changed_members(obj: &dyn Object) -> Vec<usize> {
    (0..obj.member_count())
        .filter(|&i| obj.member(i).is_some_and(|m| m.is_changed()))
        .collect()
}

/// Applies every changed member of `from` to `into`.
///
/// Both objects must be of the same generated type. Collections merge
/// element-wise where they track changes per element (see
/// [`ContainerBase::merge_changes`]). Returns the number of members that
/// were changed in `from`.
pub fn merge_changes(into: &mut dyn Object, from: &dyn Object) -> Result<usize, ContainerError> {
    if into.object_type() != from.object_type() {
        return Err(ContainerError::TypeMismatch {
            expected: into.type_name(),
            found: from.type_name(),
        });
    }

    let count = into.member_count();
    let mut merged = 0;
    for i in 0..from.member_count() {
        let Some(src) = from.member(i) else { continue };
        if !src.is_changed() {
            continue;
        }
        let dst = into
            .member_mut(i)
            .ok_or(ContainerError::out_of_range(i, count))?;
        dst.merge_changes(src)?;
        merged += 1;

        #[cfg(feature = "tracing")]
        tracing::trace!(
            object = from.type_name(),
            member = from.member_name(i).unwrap_or_default(),
            "merged changed member"
        );
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{
        ArrayContainer, DictionaryContainer, Int32Container, Int64Container, StringContainer,
    };
    use crate::impl_object;

    #[derive(Debug, Clone)]
    struct Sensor {
        name: StringContainer,
        readings: ArrayContainer<Int32Container>,
        limits: DictionaryContainer<String, i64>,
    }

    impl_object!(Sensor, "Test.Sensor", [name, readings, limits]);

    impl Sensor {
        fn new() -> Self {
            Self {
                name: StringContainer::new(),
                readings: ArrayContainer::new(3),
                limits: DictionaryContainer::new(),
            }
        }
    }

    #[derive(Debug, Clone, Default)]
    struct Counter {
        count: Int64Container,
    }

    impl_object!(Counter, "Test.Counter", [count]);

    #[test]
    fn test_fresh_object_unchanged() {
        let s = Sensor::new();
        assert!(!is_changed(&s));
        assert!(changed_members(&s).is_empty());
    }

    #[test]
    fn test_changed_members() {
        let mut s = Sensor::new();
        s.limits.set("max".to_string(), 100);
        assert!(is_changed(&s));
        assert_eq!(changed_members(&s), vec![2]);

        set_changed(&mut s, false);
        assert!(!is_changed(&s));
        assert!(!s.limits.get(&"max".to_string()).unwrap().is_changed());
    }

    #[test]
    fn test_merge_applies_only_changed() {
        let mut local = Sensor::new();
        local.name.set_val("local".to_string());
        local.readings.slot_mut(0).unwrap().set_val(1);
        local.readings.slot_mut(1).unwrap().set_val(2);

        let mut delta = Sensor::new();
        delta.name.set_val("stale".to_string());
        delta.name.set_changed(false);
        delta.readings.slot_mut(1).unwrap().set_val(20);

        let merged = merge_changes(&mut local, &delta).unwrap();
        assert_eq!(merged, 1);
        assert_eq!(local.name.val().unwrap(), "local");
        assert_eq!(local.readings.slot(0).unwrap().val(), Ok(&1));
        assert_eq!(local.readings.slot(1).unwrap().val(), Ok(&20));
    }

    #[test]
    fn test_merge_dictionary_entries() {
        let mut local = Sensor::new();
        local.limits.set("min".to_string(), 0);
        local.limits.set("max".to_string(), 10);

        let mut delta = Sensor::new();
        delta.limits.set("max".to_string(), 50);
        delta.limits.set("min".to_string(), -5);
        delta.limits.set_changed(false);
        delta.limits.set("max".to_string(), 60);

        merge_changes(&mut local, &delta).unwrap();
        assert_eq!(local.limits.get(&"min".to_string()).unwrap().val(), Ok(&0));
        assert_eq!(local.limits.get(&"max".to_string()).unwrap().val(), Ok(&60));
    }

    #[test]
    fn test_merge_type_mismatch() {
        let mut sensor = Sensor::new();
        let counter = Counter::default();
        assert!(matches!(
            merge_changes(&mut sensor, &counter),
            Err(ContainerError::TypeMismatch { .. })
        ));
    }
}
