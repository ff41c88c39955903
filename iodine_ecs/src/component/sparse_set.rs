//! Index-addressed storage with contiguous values.

use std::ops::{Index, IndexMut};

/// Value stored in the dense array together with the index it belongs to.
#[derive(Debug, Clone)]
struct Entry<T> {
    index: usize,
    value: T,
}

/// Sparse set of values keyed by dense integer indices.
///
/// `sparse[index]` holds the position of the value in `dense`, which never has holes.
/// Removal swaps the last value into the freed position,
/// so iteration order is not preserved across removals.
///
#[derive(Debug, Clone)]
pub struct SparseSet<T> {
    sparse: Vec<Option<usize>>,
    dense: Vec<Entry<T>>,
}

impl<T> Default for SparseSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SparseSet<T> {
    /// Creates an empty sparse set.
    pub fn new() -> Self {
        Self {
            sparse: Vec::new(),
            dense: Vec::new(),
        }
    }

    /// Creates an empty sparse set with space for indices below `capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sparse: Vec::with_capacity(capacity),
            dense: Vec::with_capacity(capacity),
        }
    }

    /// Returns `true` if a value is stored at the index.
    pub fn contains(&self, index: usize) -> bool {
        self.position(index).is_some()
    }

    /// Stores the value at the index and returns a reference to it.
    ///
    /// # Panics
    ///
    /// Panics if a value was already stored at the index.
    ///
    pub fn emplace(&mut self, index: usize, value: T) -> &mut T {
        assert!(
            !self.contains(index),
            "sparse set already contains index {}",
            index,
        );
        if index >= self.sparse.len() {
            self.sparse.resize(index + 1, None);
        }
        let position = self.dense.len();
        self.sparse[index] = Some(position);
        self.dense.push(Entry { index, value });
        &mut self.dense[position].value
    }

    /// Retrieves an immutable reference to the value at the index.
    pub fn get(&self, index: usize) -> Option<&T> {
        let position = self.position(index)?;
        Some(&self.dense[position].value)
    }

    /// Retrieves a mutable reference to the value at the index.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let position = self.position(index)?;
        Some(&mut self.dense[position].value)
    }

    /// Removes the value at the index and returns it.
    ///
    /// # Panics
    ///
    /// Panics if there is no value at the index.
    ///
    pub fn erase(&mut self, index: usize) -> T {
        match self.remove(index) {
            Some(value) => value,
            None => panic!("sparse set does not contain index {}", index),
        }
    }

    /// Removes the value at the index, if any.
    ///
    /// The last value of the dense array takes place of the removed one.
    ///
    pub fn remove(&mut self, index: usize) -> Option<T> {
        let position = self.position(index)?;
        let removed = self.dense.swap_remove(position);
        self.sparse[index] = None;
        if let Some(moved) = self.dense.get(position) {
            self.sparse[moved.index] = Some(position);
        }
        Some(removed.value)
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// Removes all values.
    pub fn clear(&mut self) {
        self.sparse.clear();
        self.dense.clear();
    }

    /// Returns iterator over all indices in dense order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.dense.iter().map(|entry| entry.index)
    }

    /// Returns immutable iterator over all values with their indices in dense order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.dense.iter().map(|entry| (entry.index, &entry.value))
    }

    /// Returns mutable iterator over all values with their indices in dense order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        self.dense
            .iter_mut()
            .map(|entry| (entry.index, &mut entry.value))
    }

    fn position(&self, index: usize) -> Option<usize> {
        self.sparse.get(index).copied().flatten()
    }
}

impl<T> Index<usize> for SparseSet<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        match self.get(index) {
            Some(value) => value,
            None => panic!("sparse set does not contain index {}", index),
        }
    }
}

impl<T> IndexMut<usize> for SparseSet<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match self.get_mut(index) {
            Some(value) => value,
            None => panic!("sparse set does not contain index {}", index),
        }
    }
}

/// Owning iterator over values of [`SparseSet`] with their indices in dense order.
pub struct IntoIter<T> {
    dense: std::vec::IntoIter<Entry<T>>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = (usize, T);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.dense.next()?;
        Some((entry.index, entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.dense.size_hint()
    }
}

impl<T> IntoIterator for SparseSet<T> {
    type Item = (usize, T);
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            dense: self.dense.into_iter(),
        }
    }
}
