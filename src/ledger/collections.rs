//! Ordered entity lists with identity-based lookup.

use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};

/// Two notions of equality for ledger entities.
///
/// `identity_equals` is the weaker "is this the same record" check used for duplicate
/// detection and lookups; `structural_equals` compares every field.
pub trait Identity: PartialEq {
    /// Human-readable entity name used in error messages.
    const KIND: &'static str;

    fn identity_equals(&self, other: &Self) -> bool;

    fn structural_equals(&self, other: &Self) -> bool {
        self == other
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityList<T> {
    items: Vec<T>,
}

impl<T> Default for EntityList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Identity> EntityList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, candidate: &T) -> bool {
        self.position(candidate).is_some()
    }

    pub fn add(&mut self, item: T) {
        self.items.push(item);
    }

    /// Replaces the first entity identity-equal to `target` with `edited`.
    pub fn replace(&mut self, target: &T, edited: T) -> Result<()> {
        let idx = self.position_or_not_found(target)?;
        self.items[idx] = edited;
        Ok(())
    }

    pub fn remove(&mut self, target: &T) -> Result<T> {
        let idx = self.position_or_not_found(target)?;
        Ok(self.items.remove(idx))
    }

    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn filtered<P>(&self, predicate: P) -> Vec<&T>
    where
        P: Fn(&T) -> bool,
    {
        self.items.iter().filter(|item| predicate(item)).collect()
    }

    pub fn find<P>(&self, predicate: P) -> Option<&T>
    where
        P: Fn(&T) -> bool,
    {
        self.items.iter().find(|item| predicate(item))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn position(&self, candidate: &T) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.identity_equals(candidate))
    }

    fn position_or_not_found(&self, candidate: &T) -> Result<usize> {
        self.position(candidate)
            .ok_or_else(|| LedgerError::NotFound(T::KIND.to_string()))
    }
}

impl<T> From<Vec<T>> for EntityList<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<'a, T> IntoIterator for &'a EntityList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Tag {
        key: &'static str,
        note: &'static str,
    }

    impl Identity for Tag {
        const KIND: &'static str = "Tag";

        fn identity_equals(&self, other: &Self) -> bool {
            self.key == other.key
        }
    }

    fn tag(key: &'static str, note: &'static str) -> Tag {
        Tag { key, note }
    }

    #[test]
    fn contains_uses_identity_not_structure() {
        let mut list = EntityList::new();
        list.add(tag("a", "first"));
        assert!(list.contains(&tag("a", "other note")));
        assert!(!tag("a", "first").structural_equals(&tag("a", "other note")));
        assert!(!list.contains(&tag("b", "first")));
    }

    #[test]
    fn replace_and_remove_report_missing_targets() {
        let mut list = EntityList::from(vec![tag("a", "x"), tag("b", "y")]);
        list.replace(&tag("b", "ignored"), tag("b", "z")).unwrap();
        assert_eq!(list.as_slice()[1].note, "z");

        let err = list.replace(&tag("c", ""), tag("c", "")).unwrap_err();
        assert!(matches!(err, LedgerError::NotFound(ref kind) if kind == "Tag"));

        let removed = list.remove(&tag("a", "")).unwrap();
        assert_eq!(removed.note, "x");
        assert!(matches!(list.remove(&tag("a", "")), Err(LedgerError::NotFound(_))));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn filtered_view_keeps_order() {
        let list = EntityList::from(vec![tag("a", "keep"), tag("b", "drop"), tag("c", "keep")]);
        let keys: Vec<_> = list
            .filtered(|item| item.note == "keep")
            .into_iter()
            .map(|item| item.key)
            .collect();
        assert_eq!(keys, vec!["a", "c"]);
    }
}
