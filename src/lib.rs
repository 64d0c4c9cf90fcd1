//! # chainmap
//!
//! Two small, independent building blocks:
//!
//! - [`ChainMap`]: a hash map with a fixed number of buckets that resolves
//!   collisions by separate chaining
//! - [`heap_sort`]: an in-place heap sort over any slice of [`Ord`] values
//!
//! ## Performance Characteristics
//!
//! - `ChainMap` never rehashes. With `n` keys over `c` buckets a lookup scans
//!   about `n / c` entries, so size the map for the keys you expect
//! - Bucket placement is deterministic for a given capacity, across runs
//!   built with the same toolchain
//! - `heap_sort::sort` is O(n log n), allocation free and unstable
//!
//! ## Thread Safety
//!
//! Neither component synchronizes anything. Mutation goes through `&mut`,
//! so sharing a map between threads needs an outer lock.
//!
//! ## Example
//!
//! ```rust
//! use chainmap::{heap_sort, ChainMap};
//!
//! let mut map = ChainMap::with_capacity(8).unwrap();
//! map.put("one".to_string(), 1);
//! map.put("two".to_string(), 2);
//! assert_eq!(map.get("one"), Some(&1));
//! assert_eq!(map.len(), 2);
//!
//! let mut values = [12, 11, 13, 5, 6, 7];
//! heap_sort::sort(&mut values);
//! assert_eq!(values, [5, 6, 7, 11, 12, 13]);
//! ```

pub mod error;
pub mod heap_sort;
pub mod map;

pub use error::Error;
pub use map::{ChainMap, DEFAULT_CAPACITY};
