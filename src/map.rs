//! The key/value container behind JSON objects.
//!
//! Keys are kept sorted by default (a [`BTreeMap`]). With the `preserve_order`
//! feature the map is an [`IndexMap`] and iterates in insertion order; a key
//! that is inserted again keeps its original position.
//!
//! The iterator and entry types are those of the backing map, so their exact
//! type depends on the feature selection. Code that names them should go
//! through the aliases in this module.
//!
//! [`BTreeMap`]: std::collections::BTreeMap
//! [`IndexMap`]: https://docs.rs/indexmap/*/indexmap/map/struct.IndexMap.html

use crate::value::Value;
use serde_core::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use serde_core::ser::{Serialize, SerializeMap, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::ops;

#[cfg(not(feature = "preserve_order"))]
mod backing {
    use std::collections::btree_map;

    pub type Table<K, V> = std::collections::BTreeMap<K, V>;
    pub type RawEntry<'a, K, V> = btree_map::Entry<'a, K, V>;

    /// Borrowing iterator over the entries of a [`Map`](super::Map).
    pub type Iter<'a, K, V> = btree_map::Iter<'a, K, V>;
    /// Iterator over the entries of a [`Map`](super::Map) with mutable values.
    pub type IterMut<'a, K, V> = btree_map::IterMut<'a, K, V>;
    /// Owning iterator over the entries of a [`Map`](super::Map).
    pub type IntoIter<K, V> = btree_map::IntoIter<K, V>;
    /// Iterator over the keys of a [`Map`](super::Map).
    pub type Keys<'a, K, V> = btree_map::Keys<'a, K, V>;
    /// Iterator over the values of a [`Map`](super::Map).
    pub type Values<'a, K, V> = btree_map::Values<'a, K, V>;
}

#[cfg(feature = "preserve_order")]
mod backing {
    use indexmap::map;

    pub type Table<K, V> = indexmap::IndexMap<K, V>;
    pub type RawEntry<'a, K, V> = map::Entry<'a, K, V>;

    /// Borrowing iterator over the entries of a [`Map`](super::Map).
    pub type Iter<'a, K, V> = map::Iter<'a, K, V>;
    /// Iterator over the entries of a [`Map`](super::Map) with mutable values.
    pub type IterMut<'a, K, V> = map::IterMut<'a, K, V>;
    /// Owning iterator over the entries of a [`Map`](super::Map).
    pub type IntoIter<K, V> = map::IntoIter<K, V>;
    /// Iterator over the keys of a [`Map`](super::Map).
    pub type Keys<'a, K, V> = map::Keys<'a, K, V>;
    /// Iterator over the values of a [`Map`](super::Map).
    pub type Values<'a, K, V> = map::Values<'a, K, V>;
}

pub use self::backing::{IntoIter, Iter, IterMut, Keys, Values};

/// An ordered map from member names to values.
pub struct Map<K = String, V = Value> {
    table: backing::Table<K, V>,
}

impl<K, V> Map<K, V> {
    /// An empty map.
    pub fn new() -> Self {
        Map {
            table: backing::Table::new(),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// True if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// The value stored under `key`, if any.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q> + Ord + Hash,
        Q: ?Sized + Ord + Eq + Hash,
    {
        self.table.get(key)
    }

    /// Mutable access to the value stored under `key`, if any.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q> + Ord + Hash,
        Q: ?Sized + Ord + Eq + Hash,
    {
        self.table.get_mut(key)
    }

    /// True if something is stored under `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q> + Ord + Hash,
        Q: ?Sized + Ord + Eq + Hash,
    {
        self.table.contains_key(key)
    }

    /// Stores `value` under `key` and hands back whatever was stored there
    /// before. A replaced key keeps its position.
    pub fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        K: Ord + Hash,
    {
        self.table.insert(key, value)
    }

    /// Takes the value stored under `key` out of the map. The remaining
    /// entries keep their relative order.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q> + Ord + Hash,
        Q: ?Sized + Ord + Eq + Hash,
    {
        #[cfg(not(feature = "preserve_order"))]
        return self.table.remove(key);
        #[cfg(feature = "preserve_order")]
        return self.table.shift_remove(key);
    }

    /// The slot for `key`, occupied or not, for in-place update.
    pub fn entry<S>(&mut self, key: S) -> Entry<K, V>
    where
        K: Ord + Hash,
        S: Into<K>,
    {
        Entry {
            raw: self.table.entry(key.into()),
        }
    }

    /// Entries in iteration order.
    pub fn iter(&self) -> Iter<K, V> {
        self.table.iter()
    }

    /// Entries in iteration order, with mutable values.
    pub fn iter_mut(&mut self) -> IterMut<K, V> {
        self.table.iter_mut()
    }

    /// Keys in iteration order.
    pub fn keys(&self) -> Keys<K, V> {
        self.table.keys()
    }

    /// Values in iteration order.
    pub fn values(&self) -> Values<K, V> {
        self.table.values()
    }
}

/// One key's slot in a [`Map`], as returned by [`Map::entry`].
pub struct Entry<'a, K, V> {
    raw: backing::RawEntry<'a, K, V>,
}

impl<'a, K, V> Entry<'a, K, V>
where
    K: Ord + Hash,
{
    /// The key this slot belongs to.
    pub fn key(&self) -> &K {
        self.raw.key()
    }

    /// Fills an empty slot with `default`, then returns the value in it.
    pub fn or_insert(self, default: V) -> &'a mut V {
        self.raw.or_insert(default)
    }

    /// Runs `f` on the value if the slot is occupied.
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        Entry {
            raw: self.raw.and_modify(f),
        }
    }
}

impl<K, V> Default for Map<K, V> {
    fn default() -> Self {
        Map::new()
    }
}

impl<K, V> Clone for Map<K, V>
where
    K: Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        Map {
            table: self.table.clone(),
        }
    }
}

/// Maps are equal when they hold the same keys mapped to equal values,
/// regardless of iteration order.
impl<K, V> PartialEq for Map<K, V>
where
    K: Eq + Hash,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.table == other.table
    }
}

/// Panics if the key is absent.
impl<K, V, Q> ops::Index<&Q> for Map<K, V>
where
    K: Borrow<Q> + Ord + Hash,
    Q: ?Sized + Ord + Eq + Hash,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        &self.table[key]
    }
}

impl<K, V> fmt::Debug for Map<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for Map<K, V>
where
    K: Ord + Hash,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Map {
            table: iter.into_iter().collect(),
        }
    }
}

impl<K, V> Extend<(K, V)> for Map<K, V>
where
    K: Ord + Hash,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        self.table.extend(iter);
    }
}

impl<K, V> IntoIterator for Map<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        self.table.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a Map<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.table.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut Map<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.table.iter_mut()
    }
}

impl<K, V> Serialize for Map<K, V>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut out = tri!(serializer.serialize_map(Some(self.len())));
        for (key, value) in self {
            tri!(out.serialize_entry(key, value));
        }
        out.end()
    }
}

struct MapVisitor<K, V> {
    marker: PhantomData<Map<K, V>>,
}

impl<'de, K, V> Visitor<'de> for MapVisitor<K, V>
where
    K: Deserialize<'de> + Ord + Hash,
    V: Deserialize<'de>,
{
    type Value = Map<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON object")
    }

    fn visit_unit<E>(self) -> Result<Map<K, V>, E>
    where
        E: de::Error,
    {
        Ok(Map::new())
    }

    fn visit_map<A>(self, mut access: A) -> Result<Map<K, V>, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = Map::new();
        while let Some((key, value)) = tri!(access.next_entry()) {
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<'de, K, V> Deserialize<'de> for Map<K, V>
where
    K: Deserialize<'de> + Ord + Hash,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(MapVisitor {
            marker: PhantomData,
        })
    }
}
