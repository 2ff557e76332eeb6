//! Ordered key-value collection with a fluent transformation API.
//!
//! This module provides [`Collection`], an ordered associative container
//! with unique keys and a chainable method set for mapping, filtering,
//! grouping, slicing and aggregating entries.
//!
//! # Overview
//!
//! A `Collection<K, V>` stores its entries in insertion order. Keys are
//! either assigned sequentially from zero ([`Collection::from_values`]) or
//! given explicitly ([`Collection::from_pairs`]). Small collections (up to
//! 8 entries) are stored inline without a heap allocation and spill to the
//! heap as they grow.
//!
//! Every transformation returns a *new* collection; the receiver is never
//! observed to change. The only destructive operations are
//! [`push`](Collection::push), [`push_all`](Collection::push_all) and
//! [`pop`](Collection::pop).
//!
//! Two families of transformations differ in how they treat keys:
//!
//! - **Selecting** operations (`filter`, `partition`, `slice`, `take*`,
//!   `skip*`, `chunk`) keep the original keys of surviving entries.
//! - **Rebuilding** operations (`concat`, `collapse`, `flat_map`, `zip`,
//!   `sort*`) produce value sequences and renumber keys from zero.
//!
//! # Time Complexity
//!
//! | Operation        | Complexity     |
//! |------------------|----------------|
//! | `new`            | O(1)           |
//! | `push` / `pop`   | amortized O(1) |
//! | `get` / `contains_key` | O(n)     |
//! | `map` / `filter` | O(n)           |
//! | `group_by`       | O(n * g), g groups |
//! | `sort`           | O(n log n)     |
//! | `iter`           | O(1) to create, O(n) to iterate |
//!
//! Key lookup is a linear scan: the type is tuned for the small,
//! short-lived collections that fluent pipelines produce, not for use as a
//! general-purpose map.
//!
//! # Examples
//!
//! ```rust
//! use fluentseq::Collection;
//!
//! let collection = Collection::from_values([1, 2, 3]);
//! assert_eq!(collection.all(), vec![(0, 1), (1, 2), (2, 3)]);
//!
//! let doubled = collection.map(|value| value * 2);
//! assert_eq!(doubled.values().copied().collect::<Vec<_>>(), vec![2, 4, 6]);
//!
//! // The source collection is unchanged
//! assert_eq!(collection.all(), vec![(0, 1), (1, 2), (2, 3)]);
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Bound, RangeBounds};

use rand::Rng;
use smallvec::SmallVec;

use crate::error::{EmptyCollectionError, LengthMismatchError};

// =============================================================================
// Constants
// =============================================================================

/// Number of entries stored inline before spilling to the heap.
const INLINE_CAPACITY: usize = 8;

// =============================================================================
// Entry Definition
// =============================================================================

/// A single key-value entry.
///
/// `Entry` is an internal representation detail; the public unit of
/// iteration is the `(&K, &V)` pair.
#[derive(Clone)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Inline-first storage for entries.
type EntryBuffer<K, V> = SmallVec<[Entry<K, V>; INLINE_CAPACITY]>;

// =============================================================================
// Collection Definition
// =============================================================================

/// An ordered associative container with a fluent transformation API.
///
/// Keys are unique within one collection and insertion order is preserved
/// and observable through [`iter`](Collection::iter) and
/// [`all`](Collection::all).
///
/// # Examples
///
/// ```rust
/// use fluentseq::Collection;
///
/// let scores = Collection::from_pairs([("Budi", 100), ("Eko", 65), ("Joko", 90)]);
/// let passing = scores.filter(|_, score| *score >= 90);
///
/// // Surviving entries keep their original keys
/// assert_eq!(passing.all(), vec![("Budi", 100), ("Joko", 90)]);
/// ```
#[derive(Clone)]
pub struct Collection<K, V> {
    entries: EntryBuffer<K, V>,
}

static_assertions::assert_impl_all!(Collection<usize, i32>: Send, Sync, Clone, Default);

// =============================================================================
// Construction
// =============================================================================

impl<K, V> Collection<K, V> {
    /// Creates a new empty collection.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let collection: Collection<usize, i32> = Collection::new();
    /// assert!(collection.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }

    /// Creates a collection from explicit key-value pairs.
    ///
    /// Insertion order is preserved. When a key occurs more than once, the
    /// later value wins but the entry keeps the position of the first
    /// occurrence.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let collection = Collection::from_pairs([("a", 1), ("b", 2), ("a", 3)]);
    /// assert_eq!(collection.all(), vec![("a", 3), ("b", 2)]);
    /// ```
    #[must_use]
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        K: PartialEq,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut collection = Self::new();
        for (key, value) in pairs {
            collection.insert_pair(key, value);
        }
        collection
    }

    /// Inserts a pair, overwriting the value of an existing key in place.
    fn insert_pair(&mut self, key: K, value: V)
    where
        K: PartialEq,
    {
        if let Some(position) = self.entries.iter().position(|entry| entry.key == key) {
            self.entries[position].value = value;
        } else {
            self.entries.push(Entry { key, value });
        }
    }
}

impl<V> Collection<usize, V> {
    /// Creates a sequentially keyed collection from plain values.
    ///
    /// Keys are assigned `0..n` in iteration order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let collection = Collection::from_values(["a", "b"]);
    /// assert_eq!(collection.all(), vec![(0, "a"), (1, "b")]);
    /// ```
    #[must_use]
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
    {
        Self {
            entries: values
                .into_iter()
                .enumerate()
                .map(|(key, value)| Entry { key, value })
                .collect(),
        }
    }

    /// Appends a value with the next sequential key.
    ///
    /// The new key is one past the current last key, so pushing after a
    /// `pop` reuses the freed key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let mut collection = Collection::new();
    /// collection.push(1);
    /// collection.push(2);
    /// assert_eq!(collection.all(), vec![(0, 1), (1, 2)]);
    /// ```
    pub fn push(&mut self, value: V) {
        let key = self.entries.last().map_or(0, |entry| entry.key + 1);
        self.entries.push(Entry { key, value });
    }

    /// Appends every value of an iterator with sequential keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let mut collection = Collection::new();
    /// collection.push_all([1, 2, 14]);
    /// assert_eq!(collection.all(), vec![(0, 1), (1, 2), (2, 14)]);
    /// ```
    pub fn push_all<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = V>,
    {
        for value in values {
            self.push(value);
        }
    }
}

// =============================================================================
// Inspection
// =============================================================================

impl<K, V> Collection<K, V> {
    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the collection holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if the collection holds at least one entry.
    #[must_use]
    pub fn is_not_empty(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Returns an iterator over `(&K, &V)` pairs in insertion order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let collection = Collection::from_values([10, 20]);
    /// let mut iterator = collection.iter();
    /// assert_eq!(iterator.next(), Some((&0, &10)));
    /// assert_eq!(iterator.next(), Some((&1, &20)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    #[must_use]
    pub fn iter(&self) -> CollectionIterator<'_, K, V> {
        CollectionIterator {
            inner: self.entries.iter(),
        }
    }

    /// Returns an iterator over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|entry| &entry.key)
    }

    /// Returns an iterator over the values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|entry| &entry.value)
    }

    /// Returns a snapshot of all `(key, value)` pairs in insertion order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let collection = Collection::from_values([1, 2, 3]);
    /// assert_eq!(collection.all(), vec![(0, 1), (1, 2), (2, 3)]);
    /// ```
    #[must_use]
    pub fn all(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.entries
            .iter()
            .map(|entry| (entry.key.clone(), entry.value.clone()))
            .collect()
    }

    /// Returns the value stored under `key`, if any.
    ///
    /// The key may be borrowed in any form, mirroring the standard map
    /// types: a `Collection<String, V>` can be queried with `&str`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let collection = Collection::from_pairs([("id", 12), ("age", 30)]);
    /// assert_eq!(collection.get("id"), Some(&12));
    /// assert_eq!(collection.get("name"), None);
    /// ```
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.entries
            .iter()
            .find(|entry| entry.key.borrow() == key)
            .map(|entry| &entry.value)
    }

    /// Returns `true` if `key` exists, regardless of its value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let collection = Collection::from_pairs([("id", 12)]);
    /// assert!(collection.contains_key("id"));
    /// assert!(!collection.contains_key("name"));
    /// ```
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Returns `true` if any entry's value equals `value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let collection = Collection::from_values(["Taylor", "Rachel"]);
    /// assert!(collection.contains(&"Rachel"));
    /// assert!(!collection.contains(&"Jeffrey"));
    /// ```
    #[must_use]
    pub fn contains(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.entries.iter().any(|entry| entry.value == *value)
    }

    /// Returns `true` if any entry satisfies the predicate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let collection = Collection::from_values([11, 12]);
    /// assert!(collection.any(|_, value| *value == 11));
    /// assert!(!collection.any(|key, _| *key > 5));
    /// ```
    pub fn any<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&K, &V) -> bool,
    {
        self.entries
            .iter()
            .any(|entry| predicate(&entry.key, &entry.value))
    }

    /// Returns the first value, or `None` if the collection is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let collection = Collection::from_values([1, 2, 3]);
    /// assert_eq!(collection.first(), Some(&1));
    /// ```
    #[must_use]
    pub fn first(&self) -> Option<&V> {
        self.entries.first().map(|entry| &entry.value)
    }

    /// Returns the first value satisfying the predicate, or `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let collection = Collection::from_values([1, 2, 3, 4, 5, 6, 7]);
    /// assert_eq!(collection.first_where(|_, value| *value > 5), Some(&6));
    /// assert_eq!(collection.first_where(|_, value| *value > 9), None);
    /// ```
    pub fn first_where<P>(&self, mut predicate: P) -> Option<&V>
    where
        P: FnMut(&K, &V) -> bool,
    {
        self.entries
            .iter()
            .find(|entry| predicate(&entry.key, &entry.value))
            .map(|entry| &entry.value)
    }

    /// Returns the last value, or `None` if the collection is empty.
    #[must_use]
    pub fn last(&self) -> Option<&V> {
        self.entries.last().map(|entry| &entry.value)
    }

    /// Returns the last value satisfying the predicate, scanning from the
    /// end, or `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let collection = Collection::from_values([1, 2, 3, 4, 5, 6]);
    /// assert_eq!(collection.last_where(|_, value| *value < 5), Some(&4));
    /// ```
    pub fn last_where<P>(&self, mut predicate: P) -> Option<&V>
    where
        P: FnMut(&K, &V) -> bool,
    {
        self.entries
            .iter()
            .rev()
            .find(|entry| predicate(&entry.key, &entry.value))
            .map(|entry| &entry.value)
    }

    /// Returns one uniformly selected value.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyCollectionError`] if the collection is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let collection = Collection::from_values([1, 2, 3]);
    /// let value = collection.random().unwrap();
    /// assert!(collection.contains(value));
    /// ```
    pub fn random(&self) -> Result<&V, EmptyCollectionError> {
        if self.entries.is_empty() {
            return Err(EmptyCollectionError);
        }
        let index = rand::thread_rng().gen_range(0..self.entries.len());
        Ok(&self.entries[index].value)
    }

    /// Removes and returns the last entry's value.
    ///
    /// This is one of the two destructive operations; everything else on
    /// the type returns a fresh collection.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyCollectionError`] if the collection is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let mut collection = Collection::from_values([1, 2, 14]);
    /// assert_eq!(collection.pop(), Ok(14));
    /// assert_eq!(collection.all(), vec![(0, 1), (1, 2)]);
    /// ```
    pub fn pop(&mut self) -> Result<V, EmptyCollectionError> {
        self.entries
            .pop()
            .map(|entry| entry.value)
            .ok_or(EmptyCollectionError)
    }
}

// =============================================================================
// Mapping
// =============================================================================

impl<K, V> Collection<K, V> {
    /// Transforms every value, keeping the keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let collection = Collection::from_values([22, 21, 27]);
    /// let doubled = collection.map(|value| value * 2);
    /// assert_eq!(doubled.all(), vec![(0, 44), (1, 42), (2, 54)]);
    /// ```
    #[must_use]
    pub fn map<V2, F>(&self, mut function: F) -> Collection<K, V2>
    where
        K: Clone,
        F: FnMut(&V) -> V2,
    {
        Collection {
            entries: self
                .entries
                .iter()
                .map(|entry| Entry {
                    key: entry.key.clone(),
                    value: function(&entry.value),
                })
                .collect(),
        }
    }

    /// Converts every value into `T` via its [`From`] implementation,
    /// keeping the keys.
    ///
    /// The target type is named explicitly instead of being resolved from
    /// a runtime type reference, so the conversion is checked at compile
    /// time.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let collection = Collection::from_values([1_i32, 2, 3]);
    /// let widened = collection.map_into::<i64>();
    /// assert_eq!(widened.all(), vec![(0, 1_i64), (1, 2), (2, 3)]);
    /// ```
    #[must_use]
    pub fn map_into<T>(&self) -> Collection<K, T>
    where
        K: Clone,
        V: Clone,
        T: From<V>,
    {
        self.map(|value| T::from(value.clone()))
    }

    /// Maps every entry to a `(group key, group value)` pair and gathers
    /// the group values into sub-collections.
    ///
    /// Groups appear in first-seen order; within a group, values keep
    /// their insertion order and are keyed sequentially from zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let people = Collection::from_values([
    ///     ("Eko", "Organisation"),
    ///     ("Mardhani", "Organisation"),
    ///     ("Robert", "Advocate"),
    /// ]);
    /// let groups = people.map_to_groups(|_, &(name, division)| (division, name));
    ///
    /// assert_eq!(
    ///     groups.get("Organisation").unwrap().all(),
    ///     vec![(0, "Eko"), (1, "Mardhani")],
    /// );
    /// assert_eq!(groups.get("Advocate").unwrap().all(), vec![(0, "Robert")]);
    /// ```
    #[must_use]
    pub fn map_to_groups<K2, V2, F>(&self, mut function: F) -> Collection<K2, Collection<usize, V2>>
    where
        K2: PartialEq,
        F: FnMut(&K, &V) -> (K2, V2),
    {
        let mut groups: Collection<K2, Collection<usize, V2>> = Collection::new();
        for entry in &self.entries {
            let (group_key, group_value) = function(&entry.key, &entry.value);
            if let Some(position) = groups
                .entries
                .iter()
                .position(|group| group.key == group_key)
            {
                groups.entries[position].value.push(group_value);
            } else {
                let mut members = Collection::new();
                members.push(group_value);
                groups.entries.push(Entry {
                    key: group_key,
                    value: members,
                });
            }
        }
        groups
    }

    /// Maps every value to a sequence and flattens the results into one
    /// sequentially keyed collection.
    ///
    /// Equivalent to [`map`](Collection::map) followed by
    /// [`collapse`](Collection::collapse).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let people = Collection::from_values([
    ///     vec!["Next.js", "PHP"],
    ///     vec!["React Native", "Golang"],
    /// ]);
    /// let courses = people.flat_map(|list| list.clone());
    ///
    /// assert_eq!(
    ///     courses.values().copied().collect::<Vec<_>>(),
    ///     vec!["Next.js", "PHP", "React Native", "Golang"],
    /// );
    /// ```
    #[must_use]
    pub fn flat_map<I, F>(&self, mut function: F) -> Collection<usize, I::Item>
    where
        I: IntoIterator,
        F: FnMut(&V) -> I,
    {
        let mut values = Vec::new();
        for entry in &self.entries {
            values.extend(function(&entry.value));
        }
        Collection::from_values(values)
    }

    /// Flattens one level of nesting into a sequentially keyed collection.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let nested = Collection::from_values([vec![3, 4, 5], vec![6, 7, 8]]);
    /// let flat = nested.collapse();
    /// assert_eq!(
    ///     flat.values().copied().collect::<Vec<_>>(),
    ///     vec![3, 4, 5, 6, 7, 8],
    /// );
    /// ```
    #[must_use]
    pub fn collapse<V2>(&self) -> Collection<usize, V2>
    where
        V: Clone + IntoIterator<Item = V2>,
    {
        let mut values = Vec::new();
        for entry in &self.entries {
            values.extend(entry.value.clone());
        }
        Collection::from_values(values)
    }
}

impl<K, V> Collection<K, Vec<V>> {
    /// Destructures each inner sequence as a slice argument to `function`,
    /// keeping the keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let names = Collection::from_values([
    ///     vec!["Eko", "Kunthadi"],
    ///     vec!["Edwin", "Kurniawan"],
    /// ]);
    /// let full_names = names.map_spread(|parts| parts.join(" "));
    ///
    /// assert_eq!(
    ///     full_names.all(),
    ///     vec![(0, "Eko Kunthadi".to_string()), (1, "Edwin Kurniawan".to_string())],
    /// );
    /// ```
    #[must_use]
    pub fn map_spread<V2, F>(&self, mut function: F) -> Collection<K, V2>
    where
        K: Clone,
        F: FnMut(&[V]) -> V2,
    {
        self.map(|inner| function(inner))
    }
}

// =============================================================================
// Combination
// =============================================================================

impl<K, V> Collection<K, V> {
    /// Pairs values with `other` by position.
    ///
    /// The result is truncated to the shorter of the two inputs and keyed
    /// sequentially from zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let left = Collection::from_values([1, 2, 3]);
    /// let right = Collection::from_values([4, 5, 6]);
    /// let zipped = left.zip(&right);
    ///
    /// assert_eq!(zipped.all(), vec![(0, (1, 4)), (1, (2, 5)), (2, (3, 6))]);
    /// ```
    #[must_use]
    pub fn zip<K2, V2>(&self, other: &Collection<K2, V2>) -> Collection<usize, (V, V2)>
    where
        V: Clone,
        V2: Clone,
    {
        Collection::from_values(
            self.values()
                .zip(other.values())
                .map(|(left, right)| (left.clone(), right.clone())),
        )
    }

    /// Appends the values of `other` after this collection's values.
    ///
    /// Keys are renumbered sequentially; duplicate values are allowed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let left = Collection::from_values([1, 2, 3]);
    /// let right = Collection::from_values([4, 5, 6]);
    /// let joined = left.concat(&right);
    ///
    /// assert_eq!(
    ///     joined.values().copied().collect::<Vec<_>>(),
    ///     vec![1, 2, 3, 4, 5, 6],
    /// );
    /// ```
    #[must_use]
    pub fn concat<K2>(&self, other: &Collection<K2, V>) -> Collection<usize, V>
    where
        V: Clone,
    {
        Collection::from_values(self.values().cloned().chain(other.values().cloned()))
    }

    /// Uses this collection's values as keys and `other`'s values as the
    /// corresponding values, paired by position.
    ///
    /// # Errors
    ///
    /// Returns [`LengthMismatchError`] when the two collections have
    /// different lengths, since a key would be left without a value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let keys = Collection::from_values(["name", "car"]);
    /// let values = Collection::from_values(["Eko", "Xenia"]);
    /// let combined = keys.combine(&values).unwrap();
    ///
    /// assert_eq!(combined.all(), vec![("name", "Eko"), ("car", "Xenia")]);
    /// ```
    pub fn combine<K2, V2>(
        &self,
        other: &Collection<K2, V2>,
    ) -> Result<Collection<V, V2>, LengthMismatchError>
    where
        V: PartialEq + Clone,
        V2: Clone,
    {
        if self.len() != other.len() {
            return Err(LengthMismatchError {
                left: self.len(),
                right: other.len(),
            });
        }
        Ok(Collection::from_pairs(
            self.values().cloned().zip(other.values().cloned()),
        ))
    }

    /// Joins all values into a string with `glue` between each pair.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let names = Collection::from_values(["Vicky", "Alexander", "Susanto"]);
    /// assert_eq!(names.join("-"), "Vicky-Alexander-Susanto");
    /// ```
    #[must_use]
    pub fn join(&self, glue: &str) -> String
    where
        V: fmt::Display,
    {
        self.join_final(glue, glue)
    }

    /// Joins all values into a string, using `final_glue` before the last
    /// value and `glue` everywhere else.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let names = Collection::from_values(["Vicky", "Alexander", "Susanto"]);
    /// assert_eq!(names.join_final(", ", " and "), "Vicky, Alexander and Susanto");
    /// ```
    #[must_use]
    pub fn join_final(&self, glue: &str, final_glue: &str) -> String
    where
        V: fmt::Display,
    {
        let count = self.entries.len();
        let mut output = String::new();
        for (position, entry) in self.entries.iter().enumerate() {
            if position > 0 {
                if position == count - 1 {
                    output.push_str(final_glue);
                } else {
                    output.push_str(glue);
                }
            }
            output.push_str(&entry.value.to_string());
        }
        output
    }
}

// =============================================================================
// Selection
// =============================================================================

impl<K: Clone, V: Clone> Collection<K, V> {
    /// Keeps the entries satisfying the predicate.
    ///
    /// Surviving entries keep their original keys and relative order; keys
    /// are **not** renumbered.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let scores = Collection::from_pairs([
    ///     ("Budi", 100),
    ///     ("Eko", 65),
    ///     ("Rudi", 80),
    ///     ("Joko", 90),
    /// ]);
    /// let passing = scores.filter(|_, score| *score >= 90);
    ///
    /// assert_eq!(passing.all(), vec![("Budi", 100), ("Joko", 90)]);
    /// ```
    #[must_use]
    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&K, &V) -> bool,
    {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|entry| predicate(&entry.key, &entry.value))
                .cloned()
                .collect(),
        }
    }

    /// Keeps the entries *not* satisfying the predicate.
    ///
    /// The complement of [`filter`](Collection::filter).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let scores = Collection::from_pairs([("Budi", 100), ("Eko", 65)]);
    /// let failing = scores.reject(|_, score| *score >= 90);
    /// assert_eq!(failing.all(), vec![("Eko", 65)]);
    /// ```
    #[must_use]
    pub fn reject<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&K, &V) -> bool,
    {
        self.filter(|key, value| !predicate(key, value))
    }

    /// Splits the entries into those satisfying the predicate and those
    /// that do not.
    ///
    /// Both halves preserve original keys and relative order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let scores = Collection::from_pairs([
    ///     ("Budi", 100),
    ///     ("Eko", 65),
    ///     ("Rudi", 80),
    ///     ("Joko", 90),
    /// ]);
    /// let (passing, failing) = scores.partition(|_, score| *score >= 90);
    ///
    /// assert_eq!(passing.all(), vec![("Budi", 100), ("Joko", 90)]);
    /// assert_eq!(failing.all(), vec![("Eko", 65), ("Rudi", 80)]);
    /// ```
    #[must_use]
    pub fn partition<P>(&self, mut predicate: P) -> (Self, Self)
    where
        P: FnMut(&K, &V) -> bool,
    {
        let mut matching = Self::new();
        let mut rest = Self::new();
        for entry in &self.entries {
            if predicate(&entry.key, &entry.value) {
                matching.entries.push(entry.clone());
            } else {
                rest.entries.push(entry.clone());
            }
        }
        (matching, rest)
    }

    /// Returns the positional window described by `range`.
    ///
    /// The range addresses *positions*, not keys; the entries inside the
    /// window keep their original keys. Out-of-range bounds are clamped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let collection = Collection::from_values([1, 2, 3, 4, 5, 6, 7, 8, 9]);
    ///
    /// let tail = collection.slice(4..);
    /// assert_eq!(tail.values().copied().collect::<Vec<_>>(), vec![5, 6, 7, 8, 9]);
    ///
    /// let middle = collection.slice(3..6);
    /// assert_eq!(middle.all(), vec![(3, 4), (4, 5), (5, 6)]);
    /// ```
    #[must_use]
    pub fn slice<R>(&self, range: R) -> Self
    where
        R: RangeBounds<usize>,
    {
        let start = match range.start_bound() {
            Bound::Included(&bound) => bound,
            Bound::Excluded(&bound) => bound + 1,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&bound) => bound + 1,
            Bound::Excluded(&bound) => bound,
            Bound::Unbounded => self.entries.len(),
        };
        let end = end.min(self.entries.len());
        if start >= end {
            return Self::new();
        }
        Self {
            entries: self.entries[start..end].iter().cloned().collect(),
        }
    }

    /// Returns the first `count` entries, keys preserved.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let collection = Collection::from_values([1, 2, 3, 1, 2, 3]);
    /// let front = collection.take(3);
    /// assert_eq!(front.all(), vec![(0, 1), (1, 2), (2, 3)]);
    /// ```
    #[must_use]
    pub fn take(&self, count: usize) -> Self {
        Self {
            entries: self.entries.iter().take(count).cloned().collect(),
        }
    }

    /// Returns the leading entries up to, and excluding, the first entry
    /// satisfying the predicate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let collection = Collection::from_values([1, 2, 3, 1, 2, 3]);
    /// let front = collection.take_until(|_, value| *value == 3);
    /// assert_eq!(front.values().copied().collect::<Vec<_>>(), vec![1, 2]);
    /// ```
    #[must_use]
    pub fn take_until<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&K, &V) -> bool,
    {
        let mut entries = EntryBuffer::new();
        for entry in &self.entries {
            if predicate(&entry.key, &entry.value) {
                break;
            }
            entries.push(entry.clone());
        }
        Self { entries }
    }

    /// Returns the leading entries while the predicate holds, excluding
    /// the first entry that fails it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let collection = Collection::from_values([1, 2, 3, 1, 2, 3]);
    /// let front = collection.take_while(|_, value| *value < 3);
    /// assert_eq!(front.values().copied().collect::<Vec<_>>(), vec![1, 2]);
    /// ```
    #[must_use]
    pub fn take_while<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&K, &V) -> bool,
    {
        self.take_until(|key, value| !predicate(key, value))
    }

    /// Drops the first `count` entries and returns the remainder, keys
    /// preserved.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let collection = Collection::from_values([1, 2, 3, 4, 5]);
    /// let rest = collection.skip(3);
    /// assert_eq!(rest.all(), vec![(3, 4), (4, 5)]);
    /// ```
    #[must_use]
    pub fn skip(&self, count: usize) -> Self {
        Self {
            entries: self.entries.iter().skip(count).cloned().collect(),
        }
    }

    /// Drops leading entries until the predicate first holds; the
    /// triggering entry is kept.
    ///
    /// Returns an empty collection if no entry satisfies the predicate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let collection = Collection::from_values([1, 2, 3, 4, 5]);
    /// let rest = collection.skip_until(|_, value| *value == 3);
    /// assert_eq!(rest.values().copied().collect::<Vec<_>>(), vec![3, 4, 5]);
    /// ```
    #[must_use]
    pub fn skip_until<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&K, &V) -> bool,
    {
        let mut entries = EntryBuffer::new();
        let mut triggered = false;
        for entry in &self.entries {
            if !triggered && predicate(&entry.key, &entry.value) {
                triggered = true;
            }
            if triggered {
                entries.push(entry.clone());
            }
        }
        Self { entries }
    }

    /// Drops leading entries while the predicate holds; the first entry
    /// failing it is kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let collection = Collection::from_values([1, 2, 3, 4, 5]);
    /// let rest = collection.skip_while(|_, value| *value < 3);
    /// assert_eq!(rest.values().copied().collect::<Vec<_>>(), vec![3, 4, 5]);
    /// ```
    #[must_use]
    pub fn skip_while<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&K, &V) -> bool,
    {
        self.skip_until(|key, value| !predicate(key, value))
    }

    /// Partitions the entries into consecutive sub-collections of at most
    /// `size` entries each.
    ///
    /// The final chunk may be shorter. Entries keep their original keys
    /// inside each chunk; the chunks themselves are keyed sequentially.
    /// A `size` of zero yields an empty collection.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let collection = Collection::from_values([1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    /// let chunks = collection.chunk(3);
    ///
    /// assert_eq!(chunks.len(), 4);
    /// assert_eq!(
    ///     chunks.get(&3).unwrap().values().copied().collect::<Vec<_>>(),
    ///     vec![10],
    /// );
    /// ```
    #[must_use]
    pub fn chunk(&self, size: usize) -> Collection<usize, Self> {
        if size == 0 {
            return Collection::new();
        }
        Collection::from_values(self.entries.chunks(size).map(|window| Self {
            entries: window.iter().cloned().collect(),
        }))
    }
}

// =============================================================================
// Grouping
// =============================================================================

impl<K, V> Collection<K, V> {
    /// Groups the entries by the key produced by `selector`.
    ///
    /// Groups appear in first-seen order; members keep their original keys
    /// and within-group insertion order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let scores = Collection::from_pairs([("Budi", 100), ("Eko", 65), ("Rudi", 60)]);
    /// let buckets = scores.group_by(|_, score| score / 10);
    ///
    /// assert_eq!(buckets.get(&6).unwrap().all(), vec![("Eko", 65), ("Rudi", 60)]);
    /// ```
    #[must_use]
    pub fn group_by<K2, F>(&self, mut selector: F) -> Collection<K2, Self>
    where
        K: Clone,
        V: Clone,
        K2: PartialEq,
        F: FnMut(&K, &V) -> K2,
    {
        let mut groups: Collection<K2, Self> = Collection::new();
        for entry in &self.entries {
            let group_key = selector(&entry.key, &entry.value);
            if let Some(position) = groups
                .entries
                .iter()
                .position(|group| group.key == group_key)
            {
                groups.entries[position].value.entries.push(entry.clone());
            } else {
                let mut members = Self::new();
                members.entries.push(entry.clone());
                groups.entries.push(Entry {
                    key: group_key,
                    value: members,
                });
            }
        }
        groups
    }

    /// Groups record-shaped values by the named field.
    ///
    /// Entries whose value does not expose the field are skipped. This is
    /// the statically typed counterpart of [`group_by`](Collection::group_by)
    /// for values implementing [`FieldAccess`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let people = Collection::from_values([
    ///     Collection::from_pairs([("name", "Eko"), ("dept", "IT")]),
    ///     Collection::from_pairs([("name", "Mardhani"), ("dept", "IT")]),
    ///     Collection::from_pairs([("name", "Robert"), ("dept", "HR")]),
    /// ]);
    /// let departments = people.group_by_field("dept");
    ///
    /// assert_eq!(departments.keys().copied().collect::<Vec<_>>(), vec!["IT", "HR"]);
    /// assert_eq!(departments.get("IT").unwrap().len(), 2);
    /// ```
    #[must_use]
    pub fn group_by_field(&self, field: &str) -> Collection<V::Field, Self>
    where
        K: Clone,
        V: FieldAccess + Clone,
        V::Field: PartialEq,
    {
        let mut groups: Collection<V::Field, Self> = Collection::new();
        for entry in &self.entries {
            let Some(group_key) = entry.value.field(field) else {
                continue;
            };
            if let Some(position) = groups
                .entries
                .iter()
                .position(|group| group.key == group_key)
            {
                groups.entries[position].value.entries.push(entry.clone());
            } else {
                let mut members = Self::new();
                members.entries.push(entry.clone());
                groups.entries.push(Entry {
                    key: group_key,
                    value: members,
                });
            }
        }
        groups
    }
}

// =============================================================================
// Ordering and Aggregation
// =============================================================================

impl<K, V> Collection<K, V> {
    /// Returns the values sorted ascending, reindexed from zero.
    ///
    /// The receiver is unmodified.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let collection = Collection::from_values([11, 1, 3, 2]);
    /// let sorted = collection.sort();
    /// assert_eq!(sorted.all(), vec![(0, 1), (1, 2), (2, 3), (3, 11)]);
    /// ```
    #[must_use]
    pub fn sort(&self) -> Collection<usize, V>
    where
        V: Ord + Clone,
    {
        self.sort_by(Ord::cmp)
    }

    /// Returns the values sorted descending, reindexed from zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let collection = Collection::from_values([11, 1, 3, 2]);
    /// let sorted = collection.sort_desc();
    /// assert_eq!(sorted.all(), vec![(0, 11), (1, 3), (2, 2), (3, 1)]);
    /// ```
    #[must_use]
    pub fn sort_desc(&self) -> Collection<usize, V>
    where
        V: Ord + Clone,
    {
        self.sort_by(|left, right| right.cmp(left))
    }

    /// Returns the values sorted with a caller-supplied comparator,
    /// reindexed from zero.
    ///
    /// The sort is stable.
    #[must_use]
    pub fn sort_by<F>(&self, comparator: F) -> Collection<usize, V>
    where
        V: Clone,
        F: FnMut(&V, &V) -> Ordering,
    {
        let mut values: Vec<V> = self.values().cloned().collect();
        values.sort_by(comparator);
        Collection::from_values(values)
    }

    /// Sums the values.
    ///
    /// An empty collection yields the additive identity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let collection = Collection::from_values([1, 2, 3, 4, 5, 6, 7, 8, 9]);
    /// let total: i32 = collection.sum();
    /// assert_eq!(total, 45);
    /// ```
    #[must_use]
    pub fn sum<S>(&self) -> S
    where
        V: Clone,
        S: std::iter::Sum<V>,
    {
        self.values().cloned().sum()
    }

    /// Returns the arithmetic mean of the values, or `None` if the
    /// collection is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let collection = Collection::from_values([1, 2, 3, 4, 5, 6, 7, 8, 9]);
    /// assert_eq!(collection.avg(), Some(5.0));
    /// ```
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn avg(&self) -> Option<f64>
    where
        V: Clone + Into<f64>,
    {
        if self.entries.is_empty() {
            return None;
        }
        let total: f64 = self.values().cloned().map(Into::into).sum();
        Some(total / self.entries.len() as f64)
    }

    /// Returns the largest value, or `None` if the collection is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let collection = Collection::from_values([1, 9, 4]);
    /// assert_eq!(collection.max(), Some(&9));
    /// ```
    #[must_use]
    pub fn max(&self) -> Option<&V>
    where
        V: Ord,
    {
        self.values().max()
    }

    /// Returns the smallest value, or `None` if the collection is empty.
    #[must_use]
    pub fn min(&self) -> Option<&V>
    where
        V: Ord,
    {
        self.values().min()
    }

    /// Left fold over the values in iteration order, seeded with
    /// `initial`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let collection = Collection::from_values([1, 2, 3]);
    /// let total = collection.fold(0, |carry, value| carry + value);
    /// assert_eq!(total, 6);
    /// ```
    pub fn fold<A, F>(&self, initial: A, mut function: F) -> A
    where
        F: FnMut(A, &V) -> A,
    {
        let mut accumulator = initial;
        for entry in &self.entries {
            accumulator = function(accumulator, &entry.value);
        }
        accumulator
    }

    /// Left fold seeded with the first value, or `None` if the collection
    /// is empty.
    ///
    /// `collection.reduce(f)` equals `rest.fold(first, f)` where `first`
    /// is the first value and `rest` the remaining ones.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluentseq::Collection;
    ///
    /// let collection = Collection::from_values([1, 2, 3, 4, 5, 6, 7, 8, 9]);
    /// let total = collection.reduce(|carry, value| carry + value);
    /// assert_eq!(total, Some(45));
    /// ```
    pub fn reduce<F>(&self, mut function: F) -> Option<V>
    where
        V: Clone,
        F: FnMut(V, &V) -> V,
    {
        let mut iterator = self.entries.iter();
        let first = iterator.next()?.value.clone();
        Some(iterator.fold(first, |accumulator, entry| {
            function(accumulator, &entry.value)
        }))
    }
}

// =============================================================================
// Field Access
// =============================================================================

/// Named-field lookup for record-shaped values.
///
/// Implemented for string-keyed collections so that collections of
/// "records" can be grouped with
/// [`group_by_field`](Collection::group_by_field).
pub trait FieldAccess {
    /// The type produced by a field lookup.
    type Field;

    /// Returns the value of the named field, if present.
    fn field(&self, name: &str) -> Option<Self::Field>;
}

impl<V: Clone> FieldAccess for Collection<String, V> {
    type Field = V;

    fn field(&self, name: &str) -> Option<V> {
        self.get(name).cloned()
    }
}

impl<V: Clone> FieldAccess for Collection<&str, V> {
    type Field = V;

    fn field(&self, name: &str) -> Option<V> {
        self.get(name).cloned()
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over `(&K, &V)` pairs of a [`Collection`].
pub struct CollectionIterator<'a, K, V> {
    inner: std::slice::Iter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for CollectionIterator<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| (&entry.key, &entry.value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for CollectionIterator<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner
            .next_back()
            .map(|entry| (&entry.key, &entry.value))
    }
}

impl<K, V> ExactSizeIterator for CollectionIterator<'_, K, V> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

/// An owning iterator over `(K, V)` pairs of a [`Collection`].
pub struct CollectionIntoIterator<K, V> {
    inner: smallvec::IntoIter<[Entry<K, V>; INLINE_CAPACITY]>,
}

impl<K, V> Iterator for CollectionIntoIterator<K, V> {
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| (entry.key, entry.value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for CollectionIntoIterator<K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|entry| (entry.key, entry.value))
    }
}

impl<K, V> ExactSizeIterator for CollectionIntoIterator<K, V> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> IntoIterator for Collection<K, V> {
    type Item = (K, V);
    type IntoIter = CollectionIntoIterator<K, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        CollectionIntoIterator {
            inner: self.entries.into_iter(),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a Collection<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = CollectionIterator<'a, K, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for Collection<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FromIterator<V> for Collection<usize, V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

impl<K: PartialEq, V> FromIterator<(K, V)> for Collection<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl<V> Extend<V> for Collection<usize, V> {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        self.push_all(iter);
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for Collection<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(left, right)| left == right)
    }
}

impl<K: Eq, V: Eq> Eq for Collection<K, V> {}

impl<K: Hash, V: Hash> Hash for Collection<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Hash the length first to distinguish collections of different lengths
        self.entries.len().hash(state);
        for entry in &self.entries {
            entry.key.hash(state);
            entry.value.hash(state);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Collection<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for Collection<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for entry in &self.entries {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{}: {}", entry.key, entry.value)?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for Collection<K, V>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct CollectionVisitor<K, V> {
    marker: std::marker::PhantomData<(K, V)>,
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::de::Visitor<'de> for CollectionVisitor<K, V>
where
    K: serde::Deserialize<'de> + PartialEq,
    V: serde::Deserialize<'de>,
{
    type Value = Collection<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of key-value entries")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut collection = Collection::new();
        while let Some((key, value)) = access.next_entry()? {
            collection.insert_pair(key, value);
        }
        Ok(collection)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for Collection<K, V>
where
    K: serde::Deserialize<'de> + PartialEq,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(CollectionVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::Collection;

    #[test]
    fn from_pairs_keeps_first_position_on_duplicate_key() {
        let collection = Collection::from_pairs([("a", 1), ("b", 2), ("a", 3)]);
        assert_eq!(collection.all(), vec![("a", 3), ("b", 2)]);
    }

    #[test]
    fn push_after_pop_reuses_the_freed_key() {
        let mut collection = Collection::from_values([1, 2, 3]);
        collection.pop().unwrap();
        collection.push(4);
        assert_eq!(collection.all(), vec![(0, 1), (1, 2), (2, 4)]);
    }

    #[test]
    fn push_after_filter_continues_from_last_surviving_key() {
        let mut kept = Collection::from_values([1, 2, 3, 4]).filter(|_, value| *value % 2 == 0);
        kept.push(5);
        assert_eq!(kept.all(), vec![(1, 2), (3, 4), (4, 5)]);
    }

    #[test]
    fn extend_assigns_sequential_keys() {
        let mut collection = Collection::from_values([1]);
        collection.extend([2, 3]);
        assert_eq!(collection.all(), vec![(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn display_renders_entries_in_order() {
        let collection = Collection::from_pairs([("a", 1), ("b", 2)]);
        assert_eq!(collection.to_string(), "{a: 1, b: 2}");
    }

    #[test]
    fn equality_is_order_sensitive() {
        let left = Collection::from_pairs([("a", 1), ("b", 2)]);
        let right = Collection::from_pairs([("b", 2), ("a", 1)]);
        assert_ne!(left, right);
    }
}
