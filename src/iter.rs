//! Borrowing iterator over the live elements of a [`RingBuffer`](crate::RingBuffer).

use std::iter::FusedIterator;

/// Walks the live elements oldest to newest.
///
/// The number of elements is fixed when the iterator is created. A clone
/// continues from the current position; call
/// [`RingBuffer::iter`](crate::RingBuffer::iter) again for a fresh pass.
pub struct Iter<'a, T, const N: usize> {
    slots: &'a [T; N],
    position: usize,
    remaining: usize,
}

impl<'a, T, const N: usize> Iter<'a, T, N> {
    pub(crate) fn new(slots: &'a [T; N], start: usize, remaining: usize) -> Self {
        Self {
            slots,
            position: start,
            remaining,
        }
    }
}

// Manual impl: a derive would demand `T: Clone`.
impl<T, const N: usize> Clone for Iter<'_, T, N> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots,
            position: self.position,
            remaining: self.remaining,
        }
    }
}

impl<'a, T, const N: usize> Iterator for Iter<'a, T, N> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = &self.slots[self.position];
        self.position = (self.position + 1) % N;
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, const N: usize> DoubleEndedIterator for Iter<'_, T, N> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(&self.slots[(self.position + self.remaining) % N])
    }
}

impl<T, const N: usize> ExactSizeIterator for Iter<'_, T, N> {}

impl<T, const N: usize> FusedIterator for Iter<'_, T, N> {}
