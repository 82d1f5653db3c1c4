//! Unchecked direct access
//!
//! Bypasses the live-range bookkeeping of [`RingBuffer`]. Import
//! [`UncheckedAccess`] explicitly to opt in.
//!
//! Nothing here can touch memory outside the backing array: the logical index
//! is reduced modulo the capacity and every slot is always initialized. What
//! is lost is the guarantee that the slot holds a *live* element. Reading past
//! `len()` returns whatever stale value the slot last held.

use crate::fifo::RingBuffer;

/// Raw, cursor-relative slot access without a live-range check.
pub trait UncheckedAccess<T> {
    /// Slot at logical offset `idx` from the oldest element.
    ///
    /// The caller must keep `idx < len()`; otherwise the result is an
    /// arbitrary stale slot.
    fn at_unchecked(&self, idx: usize) -> &T;

    /// Mutable form of [`at_unchecked`](Self::at_unchecked). Writes land in
    /// place and are visible to later reads if the slot is live.
    fn at_unchecked_mut(&mut self, idx: usize) -> &mut T;

    /// The whole backing store in physical order, stale slots included.
    fn raw_slots(&self) -> &[T];
}

impl<T, const N: usize> UncheckedAccess<T> for RingBuffer<T, N> {
    #[inline]
    fn at_unchecked(&self, idx: usize) -> &T {
        &self.slots()[self.physical_index(idx)]
    }

    #[inline]
    fn at_unchecked_mut(&mut self, idx: usize) -> &mut T {
        let physical = self.physical_index(idx);
        &mut self.slots_mut()[physical]
    }

    fn raw_slots(&self) -> &[T] {
        self.slots()
    }
}
