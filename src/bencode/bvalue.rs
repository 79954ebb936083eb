use std::collections::BTreeMap;

use super::encode::encode_bvalue;
use super::error::BencodeError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BValue {
	ByteString(Vec<u8>), // raw bytes for any string
	Integer(i64),
	List(Vec<BValue>),
	Dict(BTreeMap<Vec<u8>, BValue>) // ordered by key bytes, so iteration and encoding are canonical
}

/// Position of an entry inside a container: a list index or a dictionary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKey<'a> {
    Index(usize),
    Key(&'a [u8]),
}

impl BValue {
    /// Number of elements in a list or entries in a dictionary.
    /// Scalars contain nothing and report 0.
    pub fn len(&self) -> usize {
        match self {
            BValue::List(items) => items.len(),
            BValue::Dict(map) => map.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ordered iteration over container entries: insertion order for lists,
    /// byte-ascending key order for dictionaries. Scalars yield nothing.
    pub fn entries(&self) -> Entries<'_> {
        let inner = match self {
            BValue::List(items) => EntriesInner::List(items.iter().enumerate()),
            BValue::Dict(map) => EntriesInner::Dict(map.iter()),
            _ => EntriesInner::Empty,
        };
        Entries { inner }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            BValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            BValue::ByteString(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// The byte string as UTF-8 text, if it is one and decodes cleanly.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            BValue::ByteString(bytes) => std::str::from_utf8(bytes).ok(),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[BValue]> {
        match self {
            BValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&BTreeMap<Vec<u8>, BValue>> {
        match self {
            BValue::Dict(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up a key if this value is a dictionary.
    pub fn get(&self, key: &[u8]) -> Option<&BValue> {
        self.as_dict()?.get(key)
    }

    /// Appends an item to a list. Fails on any other variant.
    pub fn add(&mut self, item: impl Into<BValue>) -> Result<(), BencodeError> {
        match self {
            BValue::List(items) => {
                items.push(item.into());
                Ok(())
            }
            _ => Err(BencodeError::Conversion(
                "add target is not a list".to_string(),
            )),
        }
    }

    /// Inserts or replaces a dictionary entry. The key set stays unique and
    /// the map keeps itself ordered, so no separate re-sort step exists.
    pub fn set(
        &mut self,
        key: impl Into<Vec<u8>>,
        item: impl Into<BValue>,
    ) -> Result<(), BencodeError> {
        match self {
            BValue::Dict(map) => {
                map.insert(key.into(), item.into());
                Ok(())
            }
            _ => Err(BencodeError::Conversion(
                "set target is not a dictionary".to_string(),
            )),
        }
    }

    /// Removes a dictionary entry, returning it if it was present.
    pub fn remove(&mut self, key: &[u8]) -> Option<BValue> {
        match self {
            BValue::Dict(map) => map.remove(key),
            _ => None,
        }
    }

    /// The canonical wire bytes of this value, same as `encode_bvalue`.
    pub fn to_bytes(&self) -> Vec<u8> {
        encode_bvalue(self)
    }
}

pub struct Entries<'a> {
    inner: EntriesInner<'a>,
}

enum EntriesInner<'a> {
    List(std::iter::Enumerate<std::slice::Iter<'a, BValue>>),
    Dict(std::collections::btree_map::Iter<'a, Vec<u8>, BValue>),
    Empty,
}

impl<'a> Iterator for Entries<'a> {
    type Item = (EntryKey<'a>, &'a BValue);

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            EntriesInner::List(iter) => iter.next().map(|(i, v)| (EntryKey::Index(i), v)),
            EntriesInner::Dict(iter) => iter.next().map(|(k, v)| (EntryKey::Key(k.as_slice()), v)),
            EntriesInner::Empty => None,
        }
    }
}

impl From<i64> for BValue {
    fn from(i: i64) -> Self {
        BValue::Integer(i)
    }
}

impl From<bool> for BValue {
    fn from(b: bool) -> Self {
        BValue::Integer(if b { 1 } else { 0 })
    }
}

impl From<&str> for BValue {
    fn from(s: &str) -> Self {
        BValue::ByteString(s.as_bytes().to_vec())
    }
}

impl From<String> for BValue {
    fn from(s: String) -> Self {
        BValue::ByteString(s.into_bytes())
    }
}

impl From<&[u8]> for BValue {
    fn from(bytes: &[u8]) -> Self {
        BValue::ByteString(bytes.to_vec())
    }
}

impl From<Vec<u8>> for BValue {
    fn from(bytes: Vec<u8>) -> Self {
        BValue::ByteString(bytes)
    }
}

impl From<Vec<BValue>> for BValue {
    fn from(items: Vec<BValue>) -> Self {
        BValue::List(items)
    }
}

impl From<BTreeMap<Vec<u8>, BValue>> for BValue {
    fn from(map: BTreeMap<Vec<u8>, BValue>) -> Self {
        BValue::Dict(map)
    }
}
