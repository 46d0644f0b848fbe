//! Keyed dictionaries of value containers.

use std::any::Any;

use rustc_hash::FxHashMap;

use crate::container::base::{downcast_container, ChangeFlag, ContainerBase};
use crate::container::value::ValueContainer;
use crate::error::ContainerError;
use crate::model::{CollectionType, DictionaryKey, MemberType, MemberValue};

/// A mapping from `K` to [`ValueContainer<V>`].
///
/// A key bound to a null container is present; [`get`](Self::get) returns
/// the null container. A key that was never inserted (or was removed) is
/// absent and [`get`](Self::get) fails with [`ContainerError::KeyNotFound`].
///
/// Entries keep their own change flags. The dictionary has one more flag
/// for structural changes (insertion and removal of keys); it reports
/// changed if that flag or any entry flag is set.
///
/// Iteration follows insertion order. Equality is keyed and ignores order.
#[derive(Debug, Clone)]
pub struct DictionaryContainer<K: DictionaryKey, V: MemberValue> {
    entries: Vec<(K, ValueContainer<V>)>,
    indices: FxHashMap<K, usize>,
    changed: ChangeFlag,
}

impl<K: DictionaryKey, V: MemberValue> DictionaryContainer<K, V> {
    /// Creates an empty, unchanged dictionary.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            indices: FxHashMap::default(),
            changed: ChangeFlag::new(),
        }
    }

    /// Returns the number of bound keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if `key` is bound, even to a null container.
    pub fn contains_key(&self, key: &K) -> bool {
        self.indices.contains_key(key)
    }

    /// Returns the container bound to `key`.
    pub fn get(&self, key: &K) -> Result<&ValueContainer<V>, ContainerError> {
        match self.indices.get(key) {
            Some(&idx) => Ok(&self.entries[idx].1),
            None => Err(ContainerError::key_not_found(key)),
        }
    }

    /// Returns the container bound to `key` for modification.
    pub fn get_mut(&mut self, key: &K) -> Result<&mut ValueContainer<V>, ContainerError> {
        match self.indices.get(key) {
            Some(&idx) => Ok(&mut self.entries[idx].1),
            None => Err(ContainerError::key_not_found(key)),
        }
    }

    /// Binds `key` to `value`.
    ///
    /// A new key gets a fresh entry marked changed. An existing entry is
    /// updated through [`ValueContainer::set_val`].
    pub fn set(&mut self, key: K, value: V) {
        if let Some(&idx) = self.indices.get(&key) {
            self.entries[idx].1.set_val(value);
        } else {
            self.bind(key, ValueContainer::from(value));
        }
    }

    /// Binds `key` to a null entry and returns it.
    ///
    /// An existing entry is set null. Either way the entry is marked changed.
    pub fn insert_null(&mut self, key: K) -> &mut ValueContainer<V> {
        let idx = match self.indices.get(&key) {
            Some(&idx) => {
                self.entries[idx].1.set_null();
                idx
            }
            None => {
                let mut entry = ValueContainer::new();
                entry.set_null();
                self.bind(key, entry)
            }
        };
        &mut self.entries[idx].1
    }

    fn bind(&mut self, key: K, entry: ValueContainer<V>) -> usize {
        let idx = self.entries.len();
        self.indices.insert(key.clone(), idx);
        self.entries.push((key, entry));
        self.changed.mark();
        idx
    }

    /// Removes the binding for `key` and returns its container.
    pub fn remove(&mut self, key: &K) -> Result<ValueContainer<V>, ContainerError> {
        let idx = self
            .indices
            .remove(key)
            .ok_or_else(|| ContainerError::key_not_found(key))?;
        let (_, entry) = self.entries.remove(idx);
        for i in self.indices.values_mut() {
            if *i > idx {
                *i -= 1;
            }
        }
        self.changed.mark();
        Ok(entry)
    }

    /// Removes every binding.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.indices.clear();
        self.changed.mark();
    }

    /// Iterates over bindings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &ValueContainer<V>)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Returns the keys whose entries are marked changed, in insertion order.
    pub fn changed_keys(&self) -> Vec<&K> {
        self.entries
            .iter()
            .filter(|(_, v)| v.is_changed())
            .map(|(k, _)| k)
            .collect()
    }

    /// Returns true if a key was inserted or removed since the flag was reset.
    ///
    /// Unlike [`ContainerBase::is_changed`] this ignores entry flags.
    pub fn is_changed_here(&self) -> bool {
        self.changed.is_set()
    }

    /// Returns the member type of the keys.
    pub fn key_type(&self) -> MemberType {
        K::MEMBER_TYPE
    }
}

impl<K: DictionaryKey, V: MemberValue> Default for DictionaryContainer<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: DictionaryKey, V: MemberValue> PartialEq for DictionaryContainer<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(k, v)| other.get(k).is_ok_and(|o| o == v))
    }
}

impl<K: DictionaryKey, V: MemberValue> ContainerBase for DictionaryContainer<K, V> {
    /// True if no key is bound.
    fn is_null(&self) -> bool {
        self.entries.is_empty()
    }

    fn set_null(&mut self) {
        self.clear();
    }

    fn is_changed(&self) -> bool {
        self.changed.is_set() || self.entries.iter().any(|(_, v)| v.is_changed())
    }

    fn set_changed(&mut self, changed: bool) {
        self.changed.set(changed);
        for (_, entry) in &mut self.entries {
            entry.set_changed(changed);
        }
    }

    fn copy_from(&mut self, other: &dyn ContainerBase) -> Result<(), ContainerError> {
        let that = downcast_container::<Self>(other)?;
        self.clone_from(that);
        Ok(())
    }

    /// Copies everything if keys were inserted or removed in `from`,
    /// otherwise only the changed entries.
    fn merge_changes(&mut self, from: &dyn ContainerBase) -> Result<(), ContainerError> {
        let that = downcast_container::<Self>(from)?;
        if that.changed.is_set() {
            self.clone_from(that);
            return Ok(());
        }
        for (key, src) in that.entries.iter().filter(|(_, v)| v.is_changed()) {
            match self.indices.get(key) {
                Some(&idx) => self.entries[idx].1.clone_from(src),
                None => {
                    self.bind(key.clone(), src.clone());
                }
            }
        }
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn ContainerBase> {
        Box::new(self.clone())
    }

    fn collection_type(&self) -> CollectionType {
        CollectionType::Dictionary
    }

    fn member_type(&self) -> MemberType {
        V::MEMBER_TYPE
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

    fn dict() -> DictionaryContainer<String, i32> {
        DictionaryContainer::new()
    }

    #[test]
    fn test_new_dictionary_is_null_and_unchanged() {
        let d = dict();
        assert!(d.is_null());
        assert!(!d.is_changed());
    }

    #[test]
    fn test_get_unset_key() {
        let d = dict();
        assert!(matches!(
            d.get(&"a".to_string()),
            Err(ContainerError::KeyNotFound { .. })
        ));
    }

    #[test]
    fn test_set_get_remove() {
        let mut d = dict();
        let key = "speed".to_string();
        d.set(key.clone(), 12);

        let entry = d.get(&key).unwrap();
        assert_eq!(entry.val(), Ok(&12));
        assert!(entry.is_changed());
        assert!(d.is_changed());

        let removed = d.remove(&key).unwrap();
        assert_eq!(removed.val(), Ok(&12));
        assert!(matches!(d.get(&key), Err(ContainerError::KeyNotFound { .. })));
        assert!(d.remove(&key).is_err());
    }

    #[test]
    fn test_update_existing_entry() {
        let mut d = dict();
        d.set("a".to_string(), 1);
        d.set("b".to_string(), 2);
        d.set_changed(false);

        d.set("a".to_string(), 10);
        assert_eq!(d.len(), 2);
        assert!(d.is_changed());
        assert!(!d.is_changed_here());
        assert_eq!(d.changed_keys(), vec![&"a".to_string()]);
        assert!(!d.get(&"b".to_string()).unwrap().is_changed());
    }

    #[test]
    fn test_null_entry_is_present() {
        let mut d = dict();
        d.insert_null("a".to_string());
        assert!(d.contains_key(&"a".to_string()));
        let entry = d.get(&"a".to_string()).unwrap();
        assert!(entry.is_null());
        assert!(entry.is_changed());
        assert!(!d.is_null());

        d.set("a".to_string(), 3);
        d.insert_null("a".to_string());
        assert!(d.get(&"a".to_string()).unwrap().is_null());
        assert_eq!(d.len(), 1);
    }

    #[test]
    fn test_remove_marks_changed() {
        let mut d = dict();
        d.set("a".to_string(), 1);
        d.set_changed(false);
        d.remove(&"a".to_string()).unwrap();
        assert!(d.is_changed());
        assert!(d.is_changed_here());
    }

    #[test]
    fn test_remove_keeps_order_and_lookup() {
        let mut d = dict();
        for (i, k) in ["a", "b", "c", "d"].iter().enumerate() {
            d.set(k.to_string(), i as i32);
        }
        d.remove(&"b".to_string()).unwrap();
        let keys: Vec<&str> = d.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "c", "d"]);
        assert_eq!(d.get(&"c".to_string()).unwrap().val(), Ok(&2));
        assert_eq!(d.get(&"d".to_string()).unwrap().val(), Ok(&3));
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let mut a = dict();
        a.set("x".to_string(), 1);
        a.set("y".to_string(), 2);
        let mut b = dict();
        b.set("y".to_string(), 2);
        b.set("x".to_string(), 1);
        b.set_changed(false);
        assert_eq!(a, b);

        b.set("y".to_string(), 3);
        assert_ne!(a, b);
    }

    #[test]
    fn test_set_changed_false_resets_entries() {
        let mut d = dict();
        d.set("a".to_string(), 1);
        d.set_changed(false);
        assert!(!d.is_changed());
        assert!(!d.get(&"a".to_string()).unwrap().is_changed());
    }

    #[test]
    fn test_copy_and_clone() {
        let mut src = dict();
        src.set("a".to_string(), 1);
        let mut dst = dict();
        dst.copy_from(&src).unwrap();
        assert_eq!(dst, src);

        let mut copy = src.clone();
        copy.set("b".to_string(), 2);
        assert_eq!(src.len(), 1);

        let mut other = DictionaryContainer::<i64, i32>::new();
        assert!(other.copy_from(&src).is_err());
    }

    #[test]
    fn test_descriptors() {
        let d = DictionaryContainer::<i64, String>::new();
        assert_eq!(d.key_type(), MemberType::Int64);
        assert_eq!(d.member_type(), MemberType::String);
        assert_eq!(d.collection_type(), CollectionType::Dictionary);
    }
}
