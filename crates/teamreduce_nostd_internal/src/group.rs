//! Our parallelism abstraction uses the concept of an execution group
//!
//! An execution group is composed of a fixed number of members that work
//! together in a tightly-coupled, synchronous manner:
//! - every member executes the same code, in lock-step, and only diverges on
//!   data-dependent branches (e.g. `member_id < half`)
//! - members reconverge at explicit barriers. A barrier blocks every member
//!   until all members of the group have arrived
//! - every member of the group has access to a small region of shared scratch
//!   memory (see [`crate::ScratchPool`])
//!
//! This abstraction nicely maps to hardware:
//! - on GPUs, you can imagine that each member corresponds to a separate
//!   thread in a block (and the scratch memory is the block's shared memory)
//! - on CPUs, a member can be a separate thread that synchronizes with a
//!   `std::sync::Barrier`, or the group can be simulated by a single thread
//!   that executes the work of one member at a time
//!
//! The group is passed explicitly into every collective call. There is no
//! ambient notion of a "current thread"; this keeps the algorithms portable
//! across backends.

use core::num::NonZeroUsize;

/// This struct holds the parameters that describe an execution group. They
/// are fixed for the duration of a collective call.
///
/// A group with `group_size` members consumes its input in tiles of
/// `group_size * grain_size` elements. Within a tile, each member
/// sequentially accumulates up to `grain_size` elements before any
/// synchronization happens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GroupParam {
    group_size: NonZeroUsize,
    grain_size: NonZeroUsize,
}

impl GroupParam {
    pub fn new(group_size: usize, grain_size: usize) -> Result<Self, &'static str> {
        let Some(group_size) = NonZeroUsize::new(group_size) else {
            return Err("group_size must be positive");
        };
        let Some(grain_size) = NonZeroUsize::new(grain_size) else {
            return Err("grain_size must be positive");
        };
        if group_size.checked_mul(grain_size).is_none() {
            Err("the product of group_size and grain_size overflows usize")
        } else {
            Ok(GroupParam {
                group_size,
                grain_size,
            })
        }
    }

    /// The number of members in the group
    #[inline(always)]
    pub fn group_size(&self) -> usize {
        self.group_size.get()
    }

    /// The number of elements a member accumulates per tile
    #[inline(always)]
    pub fn grain_size(&self) -> usize {
        self.grain_size.get()
    }

    /// The number of input elements the whole group consumes per tile
    #[inline(always)]
    pub fn tile_len(&self) -> usize {
        // can't overflow, this was checked during construction
        self.group_size.get() * self.grain_size.get()
    }
}

/// A handle that a single member of an execution group uses to participate
/// in collective operations.
///
/// Every member of the group holds its own handle. The methods of collective
/// operations (e.g. [`crate::reduce`]) are designed to be entered by all
/// members of a group with identical arguments (apart from the handle).
///
/// # Safety
/// Collective operations store values in shared scratch memory and rely on
/// the following guarantees to avoid data races:
/// - [`member_id`](Self::member_id) is unique within the group and lies in
///   `[0, param().group_size())`
/// - [`barrier`](Self::barrier) doesn't return until every member of the
///   group has called it, and every memory write made by any member before
///   the barrier is visible to every member after it returns
/// - every member reports the same [`param`](Self::param)
pub unsafe trait ExecutionGroup {
    fn param(&self) -> &GroupParam;

    fn member_id(&self) -> usize;

    /// Blocks until all members of the group reach the barrier
    fn barrier(&self);
}
