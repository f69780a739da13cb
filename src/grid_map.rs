use log::debug;
use std::collections::HashMap;
use std::hash::Hash;

/// `GridMap` is a mapping from an ordered (row, column) key pair to a value,
/// with cheap row-wise access and derived column-wise projections. It behaves
/// like a sparse matrix whose axes are keyed by arbitrary hashable
/// identifiers rather than integer indices.
///
/// Storage is row-major: an outer `HashMap` from row to an inner `HashMap`
/// from column to value. A row key is present in the outer map only while it
/// has at least one entry, and the total entry count is maintained
/// incrementally so `len` never walks the nested maps.
///
/// Projection methods (`row_view`, `column_view`, `row_map_view`,
/// `column_map_view`) return independently-owned copies of the data as it
/// was at the time of the call. They never borrow internal storage, so the
/// caller may freely mutate the result without affecting the map.
#[derive(Clone)]
pub struct GridMap<R, C, V> {
    /// row -> (column -> value); a row key is retained only while it has
    /// at least one entry
    rows: HashMap<R, HashMap<C, V>>,
    /// total number of (row, column) pairs, kept in sync with `rows` on
    /// every insert and remove
    len: usize,
}

impl<R: Eq + Hash, C: Eq + Hash, V> GridMap<R, C, V> {
    pub fn new() -> Self {
        Self {
            rows: HashMap::new(),
            len: 0,
        }
    }

    pub fn with_capacity(rows: usize) -> Self {
        Self {
            rows: HashMap::with_capacity(rows),
            len: 0,
        }
    }

    /// Returns the total number of (row, column) pairs in the map.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn non_empty(&self) -> bool {
        self.len > 0
    }

    /// Inserts a value at (row, col) and returns the value previously stored
    /// there, if any. An existing pair is overwritten silently.
    pub fn insert(&mut self, row: R, col: C, value: V) -> Option<V> {
        let inner = self.rows.entry(row).or_insert_with(HashMap::new);
        let prev = inner.insert(col, value);
        if prev.is_none() {
            self.len += 1;
        }
        prev
    }

    /// Removes the value at (row, col) and returns it, or `None` if the pair
    /// is not present. Removing the last entry of a row drops the row.
    pub fn remove(&mut self, row: &R, col: &C) -> Option<V> {
        let inner = self.rows.get_mut(row)?;
        let prev = inner.remove(col)?;
        self.len -= 1;
        if inner.is_empty() {
            self.rows.remove(row);
        }
        Some(prev)
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.len = 0;
    }

    pub fn get(&self, row: &R, col: &C) -> Option<&V> {
        self.rows.get(row)?.get(col)
    }

    pub fn get_mut(&mut self, row: &R, col: &C) -> Option<&mut V> {
        self.rows.get_mut(row)?.get_mut(col)
    }

    /// Returns the value stored at (row, col), or `default` if the pair is
    /// not present.
    pub fn get_or<'a>(&'a self, row: &R, col: &C, default: &'a V) -> &'a V {
        self.get(row, col).unwrap_or(default)
    }

    pub fn contains_key(&self, row: &R, col: &C) -> bool {
        match self.rows.get(row) {
            Some(inner) => inner.contains_key(col),
            None => false,
        }
    }

    pub fn contains_row(&self, row: &R) -> bool {
        // a row key is only retained while it has entries, so presence of
        // the key alone answers this
        self.rows.contains_key(row)
    }

    /// Linear scan across all rows.
    pub fn contains_column(&self, col: &C) -> bool {
        self.rows.values().any(|inner| inner.contains_key(col))
    }

    /// Linear scan across all entries.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values().any(|v| v == value)
    }

    /// Iterates all (row, column, value) triples. Order is unspecified.
    pub fn iter(&self) -> impl Iterator<Item = (&R, &C, &V)> {
        self.rows
            .iter()
            .map(|(row, inner)| inner.iter().map(move |(col, value)| (row, col, value)))
            .flatten()
    }

    /// Iterates the row keys that currently have at least one entry.
    pub fn rows(&self) -> impl Iterator<Item = &R> {
        self.rows.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.rows.values().map(|inner| inner.values()).flatten()
    }

    /// Copies every (row, column, value) triple of `source` into this map,
    /// overwriting on conflict.
    pub fn extend_from(&mut self, source: &GridMap<R, C, V>) -> &mut Self
    where
        R: Clone,
        C: Clone,
        V: Clone,
    {
        for (row, col, value) in source.iter() {
            self.insert(row.clone(), col.clone(), value.clone());
        }
        debug!("copied {} entries from source map", source.len());
        self
    }

    /// Inserts every (column, value) pair of `entries` under `row`,
    /// overwriting on conflict.
    pub fn insert_row<I>(&mut self, row: R, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (C, V)>,
    {
        let mut entries = entries.into_iter().peekable();
        // an empty source must not leave an empty row behind
        if entries.peek().is_none() {
            return self;
        }
        let inner = self.rows.entry(row).or_insert_with(HashMap::new);
        let before = inner.len();
        inner.extend(entries);
        self.len += inner.len() - before;
        self
    }

    /// Inserts every (row, value) pair of `entries` under `col`,
    /// overwriting on conflict.
    pub fn insert_column<I>(&mut self, col: C, entries: I) -> &mut Self
    where
        C: Clone,
        I: IntoIterator<Item = (R, V)>,
    {
        for (row, value) in entries {
            self.insert(row, col.clone(), value);
        }
        self
    }

    /// Returns an independent copy of the given row, or an empty map if the
    /// row is unknown.
    pub fn row_view(&self, row: &R) -> HashMap<C, V>
    where
        C: Clone,
        V: Clone,
    {
        match self.rows.get(row) {
            Some(inner) => inner.clone(),
            None => HashMap::new(),
        }
    }

    /// Collects the (row, value) entries of the given column into an
    /// independent map. Scans every row.
    pub fn column_view(&self, col: &C) -> HashMap<R, V>
    where
        R: Clone,
        V: Clone,
    {
        let mut result = HashMap::new();
        for (row, inner) in self.rows.iter() {
            if let Some(value) = inner.get(col) {
                result.insert(row.clone(), value.clone());
            }
        }
        result
    }

    /// Returns an independent row-major copy of the whole structure.
    pub fn row_map_view(&self) -> HashMap<R, HashMap<C, V>>
    where
        R: Clone,
        C: Clone,
        V: Clone,
    {
        self.rows.clone()
    }

    /// Rebuilds the whole structure column-major; the transpose of
    /// `row_map_view`.
    pub fn column_map_view(&self) -> HashMap<C, HashMap<R, V>>
    where
        R: Clone,
        C: Clone,
        V: Clone,
    {
        let mut result: HashMap<C, HashMap<R, V>> = HashMap::new();
        for (row, col, value) in self.iter() {
            result
                .entry(col.clone())
                .or_insert_with(HashMap::new)
                .insert(row.clone(), value.clone());
        }
        result
    }

    /// Copies the (column, value) entries of `row` into `target`. Does
    /// nothing if the row is unknown.
    pub fn fill_row_into<M>(&self, row: &R, target: &mut M) -> &Self
    where
        C: Clone,
        V: Clone,
        M: Extend<(C, V)>,
    {
        if let Some(inner) = self.rows.get(row) {
            target.extend(inner.iter().map(|(col, value)| (col.clone(), value.clone())));
        }
        self
    }

    /// Copies the (row, value) entries at `col` into `target`.
    pub fn fill_column_into<M>(&self, col: &C, target: &mut M) -> &Self
    where
        R: Clone,
        V: Clone,
        M: Extend<(R, V)>,
    {
        for (row, inner) in self.rows.iter() {
            if let Some(value) = inner.get(col) {
                target.extend(Some((row.clone(), value.clone())));
            }
        }
        self
    }

    /// Builds a new map by passing every (row, column, value) triple through
    /// the three functions element-wise. If two triples collapse onto the
    /// same (row, column) in the result, the later-processed one wins;
    /// iteration order is unspecified, so which one that is is unspecified
    /// as well.
    pub fn convert<R2, C2, V2, FR, FC, FV>(
        &self,
        row_fn: FR,
        col_fn: FC,
        value_fn: FV,
    ) -> GridMap<R2, C2, V2>
    where
        R2: Eq + Hash,
        C2: Eq + Hash,
        FR: Fn(&R) -> R2,
        FC: Fn(&C) -> C2,
        FV: Fn(&V) -> V2,
    {
        let mut result = GridMap::with_capacity(self.rows.len());
        for (row, col, value) in self.iter() {
            result.insert(row_fn(row), col_fn(col), value_fn(value));
        }
        debug!(
            "converted {} entries into {} distinct pairs",
            self.len,
            result.len()
        );
        result
    }
}

impl<R: Eq + Hash, C: Eq + Hash, V> Default for GridMap<R, C, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Eq + Hash, C: Eq + Hash, V> Extend<(R, C, V)> for GridMap<R, C, V> {
    fn extend<I: IntoIterator<Item = (R, C, V)>>(&mut self, iter: I) {
        for (row, col, value) in iter {
            self.insert(row, col, value);
        }
    }
}

impl<R: Eq + Hash, C: Eq + Hash, V> core::iter::FromIterator<(R, C, V)> for GridMap<R, C, V> {
    fn from_iter<I: IntoIterator<Item = (R, C, V)>>(iter: I) -> Self {
        let mut map = GridMap::new();
        map.extend(iter);
        map
    }
}

impl<R: Eq + Hash, C: Eq + Hash, V: PartialEq> PartialEq for GridMap<R, C, V> {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
    }
}

impl<R: Eq + Hash, C: Eq + Hash, V: Eq> Eq for GridMap<R, C, V> {}

pub fn assert_map_is_well_formed<R: Eq + Hash, C: Eq + Hash, V>(map: &GridMap<R, C, V>) {
    let mut total = 0;
    for (_, inner) in map.rows.iter() {
        assert!(!inner.is_empty(), "no row should be retained without entries");
        total += inner.len();
    }
    assert_eq!(total, map.len(), "the maintained count should match storage");
}

use core::fmt::{Debug, Formatter};
impl<R: Debug, C: Debug, V: Debug> Debug for GridMap<R, C, V> {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> core::fmt::Result {
        fmt.debug_map().entries(self.rows.iter()).finish()
    }
}
