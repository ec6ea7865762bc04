#![doc = include_str!("../README.md")]

use std::ops::{Index, IndexMut};

/// A per-element attribute buffer that can be switched on and off as a whole.
///
/// While disabled, a channel holds no storage at all. While enabled, it is a
/// dense `Vec<T>` with one entry per element of the owning container, and it
/// is the container's job to keep the length in step via [Channel::resize].
///
/// # Invariants
///
/// * `self.is_enabled()` ⟺ storage is allocated
/// * enabling an enabled channel is a no-op apart from resizing (no
///   reallocation-from-scratch, existing values are preserved)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel<T> {
    data: Option<Vec<T>>,
}

impl<T> Default for Channel<T> {
    fn default() -> Self {
        Self::disabled()
    }
}

impl<T> Channel<T> {
    /// Construct a channel with no storage.
    #[inline]
    pub const fn disabled() -> Self {
        Self { data: None }
    }

    #[inline]
    pub const fn is_enabled(&self) -> bool {
        self.data.is_some()
    }

    /// Number of stored elements; 0 while disabled.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.as_ref().map_or(0, Vec::len)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop the storage and mark the channel disabled.
    #[inline]
    pub fn disable(&mut self) {
        self.data = None;
    }

    /// The stored elements, if enabled.
    #[inline]
    pub fn as_slice(&self) -> Option<&[T]> {
        self.data.as_deref()
    }

    /// The stored elements, mutably, if enabled.
    #[inline]
    pub fn as_mut_slice(&mut self) -> Option<&mut [T]> {
        self.data.as_deref_mut()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.as_ref()?.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.data.as_mut()?.get_mut(index)
    }
}

impl<T: Default + Clone> Channel<T> {
    /// Allocate storage for `len` elements, filling with `T::default()`.
    ///
    /// If the channel is already enabled its contents are kept and the
    /// storage is merely resized, so enabling twice is safe.
    pub fn enable(&mut self, len: usize) {
        match self.data {
            Some(ref mut v) => v.resize(len, T::default()),
            None => self.data = Some(vec![T::default(); len]),
        }
    }

    /// Track a change in the owning container's element count.
    ///
    /// No-op while disabled; a disabled channel has no storage to grow.
    pub fn resize(&mut self, len: usize) {
        if let Some(ref mut v) = self.data {
            v.resize(len, T::default());
        }
    }

    /// Reset every stored element to `T::default()`. No-op while disabled.
    pub fn fill_default(&mut self) {
        if let Some(ref mut v) = self.data {
            v.fill(T::default());
        }
    }
}

impl<T> Index<usize> for Channel<T> {
    type Output = T;

    /// # Panics
    ///
    /// * the channel is disabled
    /// * `index` >= `self.len()`
    fn index(&self, index: usize) -> &T {
        &self.data.as_ref().expect("indexed a disabled channel")[index]
    }
}

impl<T> IndexMut<usize> for Channel<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data.as_mut().expect("indexed a disabled channel")[index]
    }
}
