//! Fixed-capacity FIFO ring buffer
//!
//! `RingBuffer<T, N>` stores up to `N` elements in an inline `[T; N]` array and
//! hands them back oldest first. Three cursors drive everything:
//! - `read_index`: slot of the oldest live element
//! - `write_index`: slot the next push lands in
//! - `count`: number of live elements
//!
//! `write_index == (read_index + count) % N` holds after every operation.
//! Slots outside the live range keep whatever was last written there and are
//! never exposed by the safe API (see [`crate::unchecked`] for the escape hatch).

use std::fmt;

use crate::errors::{FifoError, Result};
use crate::iter::Iter;

/// FIFO over a statically sized backing array. No heap allocation.
#[derive(Clone)]
pub struct RingBuffer<T, const N: usize> {
    buffer: [T; N],
    read_index: usize,
    write_index: usize,
    count: usize,
}

impl<T, const N: usize> RingBuffer<T, N> {
    /// Total number of slots.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of live elements waiting to be read.
    #[inline]
    pub const fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub const fn is_full(&self) -> bool {
        self.count == N
    }

    /// Slots still available to a non-overwriting push.
    #[inline]
    pub const fn free_space(&self) -> usize {
        N - self.count
    }

    /// Empty the buffer. Slot contents are left as they are.
    pub fn reset(&mut self) {
        self.read_index = 0;
        self.write_index = 0;
        self.count = 0;
    }

    /// Discard up to `n` of the oldest elements without reading them.
    ///
    /// Returns how many were actually discarded, i.e. `min(n, len())`.
    pub fn drop_oldest(&mut self, n: usize) -> usize {
        let dropped = n.min(self.count);
        self.read_index = (self.read_index + dropped) % N;
        self.count -= dropped;
        self.debug_check();
        dropped
    }

    /// Oldest live element.
    pub fn peek(&self) -> Option<&T> {
        self.get(0)
    }

    /// Most recently pushed live element.
    pub fn peek_newest(&self) -> Option<&T> {
        self.count.checked_sub(1).and_then(|last| self.get(last))
    }

    /// Live element at logical offset `idx` from the oldest one.
    pub fn get(&self, idx: usize) -> Option<&T> {
        if idx < self.count {
            Some(&self.buffer[self.physical_index(idx)])
        } else {
            None
        }
    }

    /// Iterate over the live elements, oldest to newest.
    pub fn iter(&self) -> Iter<'_, T, N> {
        Iter::new(&self.buffer, self.read_index, self.count)
    }

    /// Physical slot holding logical offset `offset`.
    #[inline]
    pub(crate) fn physical_index(&self, offset: usize) -> usize {
        (self.read_index + offset % N) % N
    }

    pub(crate) fn slots(&self) -> &[T; N] {
        &self.buffer
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [T; N] {
        &mut self.buffer
    }

    /// Store `value` at the write cursor, evicting the oldest element when full.
    fn write_one(&mut self, value: T) {
        self.buffer[self.write_index] = value;
        self.write_index = (self.write_index + 1) % N;

        if self.count < N {
            self.count += 1;
        } else {
            // overwrite: the slot just written held the oldest element
            self.read_index = self.write_index;
        }
    }

    #[inline]
    fn debug_check(&self) {
        debug_assert!(self.count <= N);
        debug_assert_eq!(self.write_index, (self.read_index + self.count) % N);
    }
}

impl<T: Clone + Default, const N: usize> RingBuffer<T, N> {
    /// Create an empty buffer. Every slot starts as `T::default()`.
    pub fn new() -> Self {
        const { assert!(N > 0, "ring buffer capacity must be at least 1") };

        Self {
            buffer: std::array::from_fn(|_| T::default()),
            read_index: 0,
            write_index: 0,
            count: 0,
        }
    }

    /// Create a buffer pre-filled with `items`, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if `items` holds more than `N` elements. Use
    /// [`RingBuffer::try_from_slice`] when the length is not known to fit.
    pub fn from_slice(items: &[T]) -> Self {
        assert!(
            items.len() <= N,
            "too many elements to initialize ring buffer: {} > {}",
            items.len(),
            N
        );
        let mut fifo = Self::new();
        fifo.push_slice(items, false);
        fifo
    }

    /// Fallible form of [`RingBuffer::from_slice`].
    pub fn try_from_slice(items: &[T]) -> Result<Self> {
        if items.len() > N {
            return Err(FifoError::CapacityExceeded {
                requested: items.len(),
                capacity: N,
            });
        }
        Ok(Self::from_slice(items))
    }
}

impl<T: Clone, const N: usize> RingBuffer<T, N> {
    /// Append a batch of elements, oldest first.
    ///
    /// Without `overwrite`, the batch is written entirely or not at all: when
    /// `src` does not fit in [`free_space`](Self::free_space) nothing changes
    /// and 0 is returned. With `overwrite`, every element is written and each
    /// write past capacity evicts the current oldest element.
    ///
    /// Returns the number of elements written.
    pub fn push_slice(&mut self, src: &[T], overwrite: bool) -> usize {
        if !overwrite && src.len() > self.free_space() {
            return 0;
        }

        for element in src {
            self.write_one(element.clone());
        }
        self.debug_check();
        src.len()
    }

    /// Append a single element. Returns `false` if the buffer is full and
    /// `overwrite` is not set.
    pub fn push(&mut self, value: T, overwrite: bool) -> bool {
        if !overwrite && self.is_full() {
            return false;
        }
        self.write_one(value);
        self.debug_check();
        true
    }

    /// Remove and return the oldest element.
    pub fn pop(&mut self) -> Option<T> {
        if self.count == 0 {
            return None;
        }
        let value = self.buffer[self.read_index].clone();
        self.read_index = (self.read_index + 1) % N;
        self.count -= 1;
        self.debug_check();
        Some(value)
    }

    /// Move the oldest element into `dest`. Returns `false` and leaves `dest`
    /// untouched when the buffer is empty.
    pub fn pop_into(&mut self, dest: &mut T) -> bool {
        match self.pop() {
            Some(value) => {
                *dest = value;
                true
            }
            None => false,
        }
    }

    /// Copy the oldest `min(dest.len(), len())` elements into the front of
    /// `dest` and remove them from the buffer. The rest of `dest` is untouched.
    pub fn pull(&mut self, dest: &mut [T]) -> usize {
        let copied = self.read(dest);
        self.read_index = (self.read_index + copied) % N;
        self.count -= copied;
        self.debug_check();
        copied
    }

    /// Like [`pull`](Self::pull) but leaves the buffer unchanged, so the same
    /// elements can be read again.
    pub fn read(&self, dest: &mut [T]) -> usize {
        let mut copied = 0;
        for (slot, value) in dest.iter_mut().zip(self.iter()) {
            slot.clone_from(value);
            copied += 1;
        }
        copied
    }
}

impl<T: Clone + Default, const N: usize> Default for RingBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Default, const N: usize> TryFrom<&[T]> for RingBuffer<T, N> {
    type Error = FifoError;

    fn try_from(items: &[T]) -> Result<Self> {
        Self::try_from_slice(items)
    }
}

/// Equal when both hold the same live elements in the same order. Cursor
/// positions and stale slots do not matter.
impl<T: PartialEq, const N: usize> PartialEq for RingBuffer<T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.count == other.count && self.iter().eq(other.iter())
    }
}

impl<T: Eq, const N: usize> Eq for RingBuffer<T, N> {}

impl<T: fmt::Debug, const N: usize> fmt::Debug for RingBuffer<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a RingBuffer<T, N> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
