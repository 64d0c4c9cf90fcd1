//! # ChainMap
//!
//! A hash map with a fixed number of buckets, resolving collisions by
//! separate chaining. Each bucket is a `Vec` of entries that is scanned
//! linearly on every lookup.
//!
//! The bucket count is chosen once at construction and never changes. There
//! is no rehashing, so as the number of keys grows past the bucket count the
//! chains grow with it and lookups degrade towards O(n). Pick a capacity in
//! the region of the expected key count; [`ChainMap::load_factor`] reports
//! how long the chains are on average.
//!
//! Keys are hashed with an unseeded SipHash, so the bucket a key lands in
//! (and therefore iteration order) is the same for every map with the same
//! capacity, across runs built with the same toolchain. The std hasher's
//! algorithm is not fixed between Rust releases.

use std::borrow::Borrow;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::mem;
use std::slice;

use tracing::{debug, trace};

use crate::error::Error;

/// Number of buckets used by [`ChainMap::new`].
pub const DEFAULT_CAPACITY: usize = 16;

/// A key-value entry in one bucket's chain.
#[derive(Clone)]
struct Entry<K, V> {
    /// Never changes once the entry exists
    key: K,
    value: V,
}

/// One slot of the bucket array, holding every entry whose key maps to it.
type Bucket<K, V> = Vec<Entry<K, V>>;

/// A fixed-bucket hash map using separate chaining.
///
/// `ChainMap` stores its entries in `capacity` buckets, selected by
/// `hash(key) % capacity`. Within a bucket, entries keep the order they were
/// inserted in, and keys are told apart by [`Eq`]: two keys with equal hashes
/// are still distinct entries.
///
/// Type Parameters:
/// - `K`: Key type, must implement `Hash + Eq`
/// - `V`: Value type, no bounds
///
/// ## Example
///
/// ```rust
/// use chainmap::ChainMap;
///
/// let mut map = ChainMap::new();
/// map.put("one", 1);
/// map.put("two", 2);
/// map.put("three", 3);
///
/// assert_eq!(map.len(), 3);
/// assert_eq!(map.get("two"), Some(&2));
///
/// for (key, value) in &map {
///     println!("{key} = {value}");
/// }
/// ```
#[derive(Clone)]
pub struct ChainMap<K, V> {
    // Fixed at construction, never resized
    buckets: Vec<Bucket<K, V>>,
    // Total number of entries across all buckets
    size: usize,
}

impl<K, V> ChainMap<K, V>
where
    K: Hash + Eq,
{
    /// Creates an empty map with [`DEFAULT_CAPACITY`] buckets.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainmap::ChainMap;
    ///
    /// let map: ChainMap<String, i32> = ChainMap::new();
    /// assert!(map.is_empty());
    /// assert_eq!(map.capacity(), 16);
    /// ```
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_CAPACITY)
    }

    /// Creates an empty map with exactly `capacity` buckets.
    ///
    /// The bucket count is fixed for the lifetime of the map.
    ///
    /// # Returns
    /// - `Ok(ChainMap)` with `capacity` empty buckets
    /// - `Err(Error::ZeroCapacity)` if `capacity` is zero
    ///
    /// # Examples
    ///
    /// ```
    /// use chainmap::{ChainMap, Error};
    ///
    /// let map = ChainMap::<u32, &str>::with_capacity(4).unwrap();
    /// assert_eq!(map.capacity(), 4);
    ///
    /// assert_eq!(
    ///     ChainMap::<u32, &str>::with_capacity(0).unwrap_err(),
    ///     Error::ZeroCapacity,
    /// );
    /// ```
    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        Ok(Self::with_buckets(capacity))
    }

    fn with_buckets(capacity: usize) -> Self {
        debug!(capacity, "creating chain map");
        let mut buckets = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, Vec::new);
        Self { buckets, size: 0 }
    }

    /// Bucket for `key`. Unsigned arithmetic, so every hash maps into range.
    fn bucket_index<Q>(&self, key: &Q) -> usize
    where
        Q: Hash + ?Sized,
    {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() % self.buckets.len() as u64) as usize
    }

    /// Inserts a key-value pair, or replaces the value of an existing key.
    ///
    /// An existing entry is updated in place: the map's size does not change
    /// and the entry keeps its position in iteration order. A new key is
    /// appended to the end of its bucket.
    ///
    /// Time Complexity: O(length of the key's bucket)
    ///
    /// # Returns
    /// - `Some(old_value)` if the key was already present
    /// - `None` if a new entry was created
    ///
    /// # Examples
    ///
    /// ```
    /// use chainmap::ChainMap;
    ///
    /// let mut map = ChainMap::new();
    /// assert_eq!(map.put(1, "one"), None);
    /// assert_eq!(map.put(1, "ONE"), Some("one"));
    /// assert_eq!(map.get(&1), Some(&"ONE"));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let index = self.bucket_index(&key);
        let bucket = &mut self.buckets[index];

        if let Some(entry) = bucket.iter_mut().find(|entry| entry.key == key) {
            return Some(mem::replace(&mut entry.value, value));
        }

        bucket.push(Entry { key, value });
        self.size += 1;
        trace!(bucket = index, size = self.size, "inserted new entry");
        None
    }

    /// Retrieves a reference to the value associated with `key`.
    ///
    /// Only the key's own bucket is scanned. A stored key matches when it
    /// compares equal to `key`; sharing a bucket or a hash is not enough.
    ///
    /// Time Complexity: O(length of the key's bucket)
    ///
    /// # Examples
    ///
    /// ```
    /// use chainmap::ChainMap;
    ///
    /// let mut map = ChainMap::new();
    /// map.put("apple".to_string(), 42);
    ///
    /// assert_eq!(map.get("apple"), Some(&42));
    /// assert_eq!(map.get("banana"), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        self.buckets[index]
            .iter()
            .find(|entry| entry.key.borrow() == key)
            .map(|entry| &entry.value)
    }

    /// Retrieves a mutable reference to the value associated with `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainmap::ChainMap;
    ///
    /// let mut map = ChainMap::new();
    /// map.put("hits", 1);
    /// if let Some(hits) = map.get_mut("hits") {
    ///     *hits += 1;
    /// }
    /// assert_eq!(map.get("hits"), Some(&2));
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        self.buckets[index]
            .iter_mut()
            .find(|entry| entry.key.borrow() == key)
            .map(|entry| &mut entry.value)
    }

    /// Returns `true` if the map holds an entry for `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Removes `key` from the map, returning its value if it was present.
    ///
    /// Removing a key that is not in the map does nothing. The remaining
    /// entries of the bucket keep their relative order.
    ///
    /// Time Complexity: O(length of the key's bucket)
    ///
    /// # Examples
    ///
    /// ```
    /// use chainmap::ChainMap;
    ///
    /// let mut map = ChainMap::new();
    /// map.put("apple", 42);
    ///
    /// assert_eq!(map.remove("apple"), Some(42));
    /// assert_eq!(map.len(), 0);
    /// assert_eq!(map.remove("apple"), None); // Already removed
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        let bucket = &mut self.buckets[index];
        let position = bucket.iter().position(|entry| entry.key.borrow() == key)?;

        let entry = bucket.remove(position);
        self.size -= 1;
        trace!(bucket = index, size = self.size, "removed entry");
        Some(entry.value)
    }
}

impl<K, V> ChainMap<K, V> {
    /// Returns the number of entries in the map.
    ///
    /// Time Complexity: O(1)
    pub fn len(&self) -> usize {
        self.size
    }

    /// Checks if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of buckets. This never changes after construction.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Average number of entries per bucket.
    ///
    /// Since the bucket count is fixed, this grows linearly with the number
    /// of keys, and so does the expected cost of `get`, `put` and `remove`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainmap::ChainMap;
    ///
    /// let mut map = ChainMap::with_capacity(4).unwrap();
    /// for i in 0..8 {
    ///     map.put(i, i);
    /// }
    /// assert_eq!(map.load_factor(), 2.0);
    /// ```
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.buckets.len() as f64
    }

    /// Removes every entry, keeping the bucket count.
    pub fn clear(&mut self) {
        for bucket in self.buckets.iter_mut() {
            bucket.clear();
        }
        self.size = 0;
    }

    /// Returns an iterator over the key-value pairs in the map.
    ///
    /// Buckets are visited in index order, starting from bucket 0, and the
    /// entries of each bucket in insertion order. Each call starts a fresh
    /// traversal of the current contents.
    ///
    /// Time Complexity: O(capacity + len) to iterate through all elements
    ///
    /// # Examples
    ///
    /// ```
    /// use chainmap::ChainMap;
    ///
    /// let mut map = ChainMap::new();
    /// map.put("one", 1);
    /// map.put("two", 2);
    ///
    /// let pairs: Vec<_> = map.iter().collect();
    /// assert_eq!(pairs.len(), 2);
    /// assert!(pairs.contains(&(&"one", &1)));
    /// assert!(pairs.contains(&(&"two", &2)));
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: &self.buckets,
            bucket_index: 0,
            entries: <&[Entry<K, V>]>::default().iter(),
            remaining: self.size,
        }
    }

    /// Iterator over the keys, in the same order as [`ChainMap::iter`].
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Iterator over the values, in the same order as [`ChainMap::iter`].
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }
}

impl<K, V> Default for ChainMap<K, V>
where
    K: Hash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for ChainMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V> IntoIterator for &'a ChainMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> Extend<(K, V)> for ChainMap<K, V>
where
    K: Hash + Eq,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ChainMap<K, V>
where
    K: Hash + Eq,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

/// Bucket-major iterator over the entries of a [`ChainMap`].
///
/// Besides [`Iterator`], it offers an explicit cursor protocol:
/// [`has_next`](Iter::has_next) to ask whether another entry follows and
/// [`try_next`](Iter::try_next), which reports [`Error::Exhausted`] instead of
/// `None` once the map has been walked.
pub struct Iter<'a, K, V> {
    buckets: &'a [Bucket<K, V>],
    // Next bucket to load into `entries`
    bucket_index: usize,
    entries: slice::Iter<'a, Entry<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    /// Returns `true` if another entry is available.
    ///
    /// Skips past empty buckets, so the following `next` or `try_next` is
    /// served from the current bucket.
    pub fn has_next(&mut self) -> bool {
        while self.entries.as_slice().is_empty() && self.bucket_index < self.buckets.len() {
            self.entries = self.buckets[self.bucket_index].iter();
            self.bucket_index += 1;
        }
        !self.entries.as_slice().is_empty()
    }

    /// Returns the next entry, or [`Error::Exhausted`] if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainmap::{ChainMap, Error};
    ///
    /// let mut map = ChainMap::new();
    /// map.put("only", 1);
    ///
    /// let mut iter = map.iter();
    /// assert!(iter.has_next());
    /// assert_eq!(iter.try_next(), Ok((&"only", &1)));
    /// assert!(!iter.has_next());
    /// assert_eq!(iter.try_next(), Err(Error::Exhausted));
    /// ```
    pub fn try_next(&mut self) -> Result<(&'a K, &'a V), Error> {
        self.next().ok_or(Error::Exhausted)
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.has_next() {
            return None;
        }
        let entry = self.entries.next()?;
        self.remaining -= 1;
        Some((&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}
