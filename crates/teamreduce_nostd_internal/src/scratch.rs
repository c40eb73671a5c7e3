//! Scratch memory shared by the members of an execution group
//!
//! The storage itself is owned by a backend (e.g. a `Vec` allocated before a
//! group is launched, or a GPU block's shared memory). The members of a group
//! borrow it through a [`ScratchPool`] and collectively [`acquire`] a
//! [`ScratchBuffer`] at the start of a collective operation. The buffer is
//! released when it is dropped (so it is released on every exit path).
//!
//! Each slot holds a tagged value (`Option<T>`) rather than a sentinel. This
//! lets us distinguish a slot that a member never wrote (because it had
//! nothing to contribute) from a real value.
//!
//! [`acquire`]: ScratchPool::acquire

use core::cell::UnsafeCell;

/// A single slot of scratch memory that every member of a group can access.
///
/// Accesses are unsynchronized. Collective operations avoid data races by
/// following a simple discipline:
/// - in between 2 consecutive barriers, at most one member writes to a given
///   slot, and no other member reads from that slot
/// - a member only reads a slot written by a different member after an
///   intervening barrier
pub struct ScratchSlot<T>(UnsafeCell<Option<T>>);

// multiple members may clone the value in a slot at the same time, which is
// why T must also be Sync
unsafe impl<T: Send + Sync> Sync for ScratchSlot<T> {}

impl<T> ScratchSlot<T> {
    pub const fn empty() -> Self {
        ScratchSlot(UnsafeCell::new(None))
    }

    /// Consumes the slot and returns the value it holds (if any)
    pub fn into_inner(self) -> Option<T> {
        self.0.into_inner()
    }
}

impl<T> Default for ScratchSlot<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Provides the members of a group with access to backend-owned scratch
/// storage.
///
/// Every member of a group holds a reference to the same pool.
pub struct ScratchPool<'a, T> {
    slots: &'a [ScratchSlot<T>],
}

impl<'a, T> ScratchPool<'a, T> {
    pub fn new(slots: &'a [ScratchSlot<T>]) -> Self {
        ScratchPool { slots }
    }

    /// the maximum number of slots that can be acquired at once
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Intended to be called collectively by every member of a group. Each
    /// member gets a handle to the same `n_slots` slots.
    ///
    /// When the returned buffer is dropped, the slot at index `member_id` is
    /// cleared. Members should drop their buffers only after a barrier that
    /// follows the last read of that slot by any other member.
    ///
    /// A member must not hold more than one buffer from the same pool at a
    /// time.
    ///
    /// # Panics
    /// A pool that is too small is a configuration error that backends are
    /// expected to catch before launching a group. It is reported here with a
    /// panic if `n_slots > self.capacity()` or `member_id >= n_slots`.
    pub fn acquire(&self, member_id: usize, n_slots: usize) -> ScratchBuffer<'a, T> {
        assert!(
            n_slots <= self.capacity(),
            "tried to acquire {} scratch slots from a pool with a capacity of {}",
            n_slots,
            self.capacity()
        );
        assert!(member_id < n_slots, "member_id doesn't have a scratch slot");
        ScratchBuffer {
            slots: &self.slots[..n_slots],
            member_id,
        }
    }
}

/// A single member's handle to an acquired region of scratch memory.
///
/// The accessor methods are `unsafe` because they are unsynchronized. See
/// [`ScratchSlot`] for the discipline that callers must follow.
pub struct ScratchBuffer<'a, T> {
    slots: &'a [ScratchSlot<T>],
    member_id: usize,
}

impl<T> ScratchBuffer<'_, T> {
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Stores `value` in `slot`, dropping any value that it previously held.
    ///
    /// # Safety
    /// No other member may access `slot` until after the next barrier.
    #[inline(always)]
    pub unsafe fn store(&self, slot: usize, value: T) {
        unsafe { *self.slots[slot].0.get() = Some(value) }
    }

    /// Moves the value out of `slot`, leaving it unset.
    ///
    /// # Safety
    /// No other member may access `slot` until after the next barrier.
    #[inline(always)]
    pub unsafe fn take(&self, slot: usize) -> Option<T> {
        unsafe { (*self.slots[slot].0.get()).take() }
    }

    /// Returns a copy of the value in `slot`.
    ///
    /// # Safety
    /// No member may write to `slot` until after the next barrier (other
    /// members may concurrently read it).
    #[inline(always)]
    pub unsafe fn load(&self, slot: usize) -> Option<T>
    where
        T: Clone,
    {
        unsafe { (*self.slots[slot].0.get()).clone() }
    }
}

impl<T> Drop for ScratchBuffer<'_, T> {
    fn drop(&mut self) {
        // SAFETY: a member only ever writes to its own slot when releasing,
        // and `acquire` requires the release to follow the final barrier.
        unsafe {
            self.take(self.member_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_clears_own_slot() {
        let storage: [ScratchSlot<i32>; 3] = Default::default();
        let pool = ScratchPool::new(&storage);
        assert_eq!(pool.capacity(), 3);
        {
            let buf0 = pool.acquire(0, 2);
            let buf1 = pool.acquire(1, 2);
            assert_eq!(buf0.len(), 2);
            unsafe {
                buf0.store(0, 7);
                buf1.store(1, 9);
                assert_eq!(buf1.load(0), Some(7));
            }
            drop(buf0);
            unsafe {
                assert_eq!(buf1.load(0), None);
                assert_eq!(buf1.load(1), Some(9));
            }
        }
        let [a, b, c] = storage;
        assert_eq!((a.into_inner(), b.into_inner(), c.into_inner()), (None, None, None));
    }

    #[test]
    #[should_panic]
    fn pool_too_small() {
        let storage: [ScratchSlot<f64>; 2] = Default::default();
        let pool = ScratchPool::new(&storage);
        let _buf = pool.acquire(0, 3);
    }
}
