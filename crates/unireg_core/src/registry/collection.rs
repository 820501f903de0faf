//! Ordered record collection with an ID index.

use crate::entity::Record;
use std::collections::HashMap;

/// An insertion-ordered collection of records of one kind.
///
/// Records are kept in a `Vec` so iteration, searches, and sorting see them in
/// the order they were added. A side index maps each ID to its position, so
/// lookups do not scan. The index is rebuilt from the removal point onward
/// whenever a record is removed.
///
/// IDs are unique within a collection: [`Collection::insert`] refuses a
/// record whose ID is already present.
#[derive(Debug, Clone)]
pub struct Collection<T: Record> {
    items: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T: Record> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Record> Collection<T> {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the collection holds no records.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns true if a record with this ID exists.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Appends a record. Returns false, dropping nothing, if the ID is taken.
    pub fn insert(&mut self, record: T) -> bool {
        if self.index.contains_key(record.key()) {
            return false;
        }
        self.index.insert(record.key().to_string(), self.items.len());
        self.items.push(record);
        true
    }

    /// Returns the record with this ID.
    pub fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|&pos| &self.items[pos])
    }

    /// Returns the record with this ID for mutation.
    ///
    /// The record's ID must not change; IDs are immutable on every record type.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        match self.index.get(id) {
            Some(&pos) => Some(&mut self.items[pos]),
            None => None,
        }
    }

    /// Removes and returns the record with this ID, preserving the order of
    /// the remaining records.
    pub fn remove(&mut self, id: &str) -> Option<T> {
        let pos = self.index.remove(id)?;
        let record = self.items.remove(pos);
        for (offset, item) in self.items[pos..].iter().enumerate() {
            self.index.insert(item.key().to_string(), pos + offset);
        }
        Some(record)
    }

    /// Removes every record.
    pub fn clear(&mut self) {
        self.items.clear();
        self.index.clear();
    }

    /// Iterates over records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Iterates mutably over records in insertion order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Returns the records as a slice, in insertion order.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Returns records whose name contains `query`, ignoring case.
    ///
    /// An empty query matches every record.
    pub fn search_by_name(&self, query: &str) -> Vec<&T> {
        let needle = query.to_lowercase();
        self.items
            .iter()
            .filter(|item| item.name().to_lowercase().contains(&needle))
            .collect()
    }
}

impl<'a, T: Record> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Record> FromIterator<T> for Collection<T> {
    /// Builds a collection, keeping the first record for each duplicated ID.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut collection = Self::new();
        for record in iter {
            collection.insert(record);
        }
        collection
    }
}
