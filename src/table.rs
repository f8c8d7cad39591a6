//! The open-addressing hash table backing globals and the string pool
//! (spec §4.2): linear probing, tombstone deletion, grow-by-doubling past
//! a 0.75 load factor. Deliberately hand-rolled rather than built on
//! `std::collections::HashMap` — this is the core subsystem the spec
//! calls out by name.

use std::rc::Rc;

use crate::config::{grow_capacity, MIN_CAPACITY, TABLE_MAX_LOAD};
use crate::value::{ObjString, Value};

#[derive(Clone)]
pub(crate) struct Entry {
    key: Option<Rc<ObjString>>,
    value: Value,
}

impl Entry {
    fn empty() -> Self {
        Self { key: None, value: Value::Nil }
    }

    /// A tombstone is a deleted slot kept alive so later probes don't
    /// stop short of a live entry further down the chain (spec §4.2
    /// "Deletion").
    fn is_tombstone(&self) -> bool {
        self.key.is_none() && matches!(self.value, Value::Bool(true))
    }
}

pub struct Table {
    count: usize,
    entries: Vec<Entry>,
}

impl Table {
    pub fn new() -> Self {
        Self { count: 0, entries: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Linear-probes `entries` for `key`'s slot: either the slot already
    /// holding it, or the first tombstone/empty slot it could occupy
    /// (spec §4.2 "find_entry").
    fn find_entry(entries: &[Entry], key: &ObjString) -> usize {
        let capacity = entries.len();
        let mut index = (key.hash as usize) % capacity;
        let mut tombstone: Option<usize> = None;

        loop {
            let entry = &entries[index];
            match &entry.key {
                Some(k) if k.chars == key.chars => return index,
                None if entry.is_tombstone() => {
                    if tombstone.is_none() {
                        tombstone = Some(index);
                    }
                }
                None => return tombstone.unwrap_or(index),
                _ => {}
            }
            index = (index + 1) % capacity;
        }
    }

    /// Doubles capacity and rehashes every live entry into the new array,
    /// dropping tombstones in the process (spec §4.2 "Growth").
    fn grow(&mut self) {
        let new_capacity = grow_capacity(self.capacity());
        let mut new_entries = vec![Entry::empty(); new_capacity];
        let mut live = 0;

        for entry in self.entries.drain(..) {
            if let Some(key) = entry.key {
                let index = Self::find_entry(&new_entries, &key);
                new_entries[index] = Entry { key: Some(key), value: entry.value };
                live += 1;
            }
        }

        self.entries = new_entries;
        self.count = live;
    }

    /// Inserts or overwrites `key`. Returns `true` if `key` was not
    /// already present (spec §4.2 "insert").
    pub fn insert(&mut self, key: Rc<ObjString>, value: Value) -> bool {
        if self.entries.is_empty() {
            self.grow();
        } else if (self.count + 1) as f64 / self.capacity() as f64 > TABLE_MAX_LOAD {
            self.grow();
        }

        let index = Self::find_entry(&self.entries, &key);
        let is_new = self.entries[index].key.is_none() && !self.entries[index].is_tombstone();

        if is_new {
            self.count += 1;
        }
        self.entries[index] = Entry { key: Some(key), value };
        is_new
    }

    pub fn get(&self, key: &ObjString) -> Option<&Value> {
        if self.entries.is_empty() {
            return None;
        }
        let index = Self::find_entry(&self.entries, key);
        self.entries[index].key.as_ref().map(|_| &self.entries[index].value)
    }

    pub fn contains(&self, key: &ObjString) -> bool {
        self.get(key).is_some()
    }

    /// Converts `key`'s slot into a tombstone. Does not decrement `count`
    /// — tombstones keep occupying their share of the load factor until
    /// the next [`Self::grow`] (spec §4.2 "Deletion").
    pub fn delete(&mut self, key: &ObjString) -> bool {
        if self.entries.is_empty() {
            return false;
        }
        let index = Self::find_entry(&self.entries, key);
        if self.entries[index].key.is_none() {
            return false;
        }
        self.entries[index] = Entry { key: None, value: Value::Bool(true) };
        true
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> Rc<ObjString> {
        Rc::new(ObjString::new(s))
    }

    #[test]
    fn roundtrip_insert_and_get() {
        let mut table = Table::new();
        table.insert(key("x"), Value::Number(1.0));
        assert_eq!(table.get(&ObjString::new("x")).unwrap().as_number(), Some(1.0));
    }

    #[test]
    fn overwrite_returns_false() {
        let mut table = Table::new();
        assert!(table.insert(key("x"), Value::Number(1.0)));
        assert!(!table.insert(key("x"), Value::Number(2.0)));
        assert_eq!(table.get(&ObjString::new("x")).unwrap().as_number(), Some(2.0));
    }

    #[test]
    fn delete_then_not_found() {
        let mut table = Table::new();
        table.insert(key("x"), Value::Number(1.0));
        assert!(table.delete(&ObjString::new("x")));
        assert!(table.get(&ObjString::new("x")).is_none());
    }

    #[test]
    fn get_on_empty_table() {
        let table = Table::new();
        assert!(table.get(&ObjString::new("x")).is_none());
    }

    #[test]
    fn tombstone_does_not_break_probe_chain() {
        let mut table = Table::new();
        for i in 0..20 {
            table.insert(key(&format!("k{}", i)), Value::Number(i as f64));
        }
        table.delete(&ObjString::new("k5"));
        for i in 0..20 {
            if i == 5 {
                continue;
            }
            let name = format!("k{}", i);
            assert_eq!(table.get(&ObjString::new(&name)).unwrap().as_number(), Some(i as f64));
        }
    }

    #[test]
    fn grows_past_load_factor() {
        let mut table = Table::new();
        for i in 0..(MIN_CAPACITY * 3) {
            table.insert(key(&format!("k{}", i)), Value::Number(i as f64));
        }
        assert_eq!(table.len(), MIN_CAPACITY * 3);
        for i in 0..(MIN_CAPACITY * 3) {
            let name = format!("k{}", i);
            assert_eq!(table.get(&ObjString::new(&name)).unwrap().as_number(), Some(i as f64));
        }
    }
}
