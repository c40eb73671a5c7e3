//! Tree reduction over scratch memory: the second phase of a group reduction
//!
//! We start with `m` live values stored in the first `m` slots of a scratch
//! buffer. Each round, the first `half = m / 2` slots are paired against the
//! last `half` slots in mirrored order: the member with id `i < half`
//! performs `slot[i] = op(slot[i], slot[m - i - 1])`. Afterwards, the live
//! count becomes `m - half`.
//! - when `m` is odd, the middle slot is neither overwritten nor paired away
//!   so it is carried forward into the next round
//! - no 2 members ever write the same slot in a round, and the slots that a
//!   member reads (its own and its mirror) aren't written by anybody else in
//!   that round. Thus, a single barrier per round is all the synchronization
//!   that we need
//!
//! # Combination Order
//! Because of the mirrored pairing, the effective order of combination is
//! **NOT** a left-to-right fold over the member ids. For 4 live values,
//! `[a, b, c, d]`, the result is `op(op(a, d), op(b, c))`. This is only
//! equivalent to a left-to-right fold when `op` is both associative and
//! commutative. This is a property of the algorithm that callers should rely
//! upon (every backend produces bitwise identical results), not a bug.

use crate::group::ExecutionGroup;
use crate::scratch::ScratchBuffer;

/// Describes a single round of a tree reduction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreeRound {
    /// the number of live values at the start of the round
    pub live: usize,
    /// the number of pairs that get combined during the round
    pub half: usize,
}

impl TreeRound {
    /// Returns the index of the slot that `member_id` combines into its own
    /// slot during this round. Returns `None` for members that sit out.
    #[inline(always)]
    pub fn mirror(&self, member_id: usize) -> Option<usize> {
        (member_id < self.half).then(|| self.live - member_id - 1)
    }
}

/// Iterates over the rounds needed to reduce `n` live values to a single
/// value.
#[derive(Clone, Debug)]
pub struct TreeRounds {
    live: usize,
}

impl TreeRounds {
    pub fn new(n: usize) -> Self {
        TreeRounds { live: n }
    }
}

impl Iterator for TreeRounds {
    type Item = TreeRound;

    fn next(&mut self) -> Option<TreeRound> {
        if self.live <= 1 {
            return None;
        }
        let round = TreeRound {
            live: self.live,
            half: self.live >> 1,
        };
        self.live -= round.half;
        Some(round)
    }
}

/// Performs the share of `round` that belongs to `member_id`.
///
/// Unset slots are skipped rather than combined, so a missing contribution
/// can never be mistaken for a value.
///
/// # Safety
/// Must be called by every member between 2 barriers, where the slots
/// `[0, round.live)` are not otherwise accessed.
#[inline]
pub unsafe fn combine_mirrored<T, F>(
    buffer: &ScratchBuffer<'_, T>,
    round: &TreeRound,
    member_id: usize,
    op: &F,
) where
    F: Fn(T, T) -> T,
{
    let Some(mirror) = round.mirror(member_id) else {
        return;
    };
    // SAFETY: during a round, `member_id` is the only member to touch
    // either of these slots (mirror >= round.half > member_id)
    unsafe {
        let combined = match (buffer.take(member_id), buffer.take(mirror)) {
            (Some(mine), Some(theirs)) => Some(op(mine, theirs)),
            (mine, None) => mine,
            (None, theirs) => theirs,
        };
        if let Some(value) = combined {
            buffer.store(member_id, value);
        }
    }
}

/// Reduces the first `n` slots of `buffer` and combines the result with
/// `init` as `op(init, tree_result)`. Every member of the group gets the
/// final value.
///
/// The contents of the buffer are destroyed. When `n` is zero, `init` is
/// returned unchanged.
///
/// This must be called collectively by every member of `group`, after a
/// barrier that follows the writes into `buffer`.
pub fn destructive_reduce_n<G, T, F>(
    group: &G,
    buffer: &ScratchBuffer<'_, T>,
    n: usize,
    init: T,
    op: &F,
) -> T
where
    G: ExecutionGroup + ?Sized,
    T: Clone,
    F: Fn(T, T) -> T,
{
    debug_assert!(n <= buffer.len());
    let member_id = group.member_id();

    for round in TreeRounds::new(n) {
        if member_id == 0 {
            log::trace!("tree round: {} live values, {} pairs", round.live, round.half);
        }
        // SAFETY: the ExecutionGroup contract makes the barrier separate
        // this round's accesses from the next round's
        unsafe { combine_mirrored(buffer, &round, member_id, op) };
        group.barrier();
    }

    // SAFETY: nobody writes to the buffer until after the closing barrier
    let root = if n > 0 {
        unsafe { buffer.load(0) }
    } else {
        None
    };
    debug_assert!((n == 0) || root.is_some(), "slot 0 was never written");

    // the scratch memory is released after we return, so nobody may still be
    // reading from it
    group.barrier();

    match root {
        Some(value) => op(init, value),
        None => init,
    }
}
