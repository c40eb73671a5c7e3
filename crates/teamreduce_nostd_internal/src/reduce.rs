use crate::accumulate::accumulate_partial;
use crate::group::ExecutionGroup;
use crate::input::InputRange;
use crate::scratch::ScratchPool;
use crate::tree::destructive_reduce_n;

/// Combines every element of `input` with `op`, starting from `init`, and
/// returns the result to every member of `group`.
///
/// # How to use this function
/// - all members of the group execute this function at the same time, with
///   identical `scratch`, `input`, `init` and `op` arguments. `group` is
///   tailored to the identity of each member.
/// - `scratch` must be able to provide (at least) `group_size` slots
/// - `op` must be associative. See below for the order it is applied in.
///
/// # How it works
/// 1. each member sequentially folds the elements that it is assigned from
///    every tile of the input into a private partial value (see
///    [`crate::accumulate`])
/// 2. each member that has a partial value stores it in its scratch slot,
///    then the group synchronizes
/// 3. the group performs a tree reduction over the scratch slots (see
///    [`crate::tree`]) and the tree's result is combined with `init`
///
/// # Order of Combination
/// The result is `op(init, tree_result)`. The tree combines the partial
/// values in a divide-and-conquer order that isn't a simple left-to-right
/// fold. As a consequence, the result will generally differ from a
/// sequential fold when `op` isn't commutative (and it will differ by
/// rounding when `op` is floating-point addition).
///
/// When `input` is empty, `init` is returned unchanged.
pub fn reduce<G, R, T, F>(group: &G, scratch: &ScratchPool<'_, T>, input: &R, init: T, op: F) -> T
where
    G: ExecutionGroup + ?Sized,
    R: InputRange + ?Sized,
    R::Item: Into<T>,
    T: Clone,
    F: Fn(T, T) -> T,
{
    let param = group.param();
    let member_id = group.member_id();

    // the buffer is released when it goes out of scope
    let buffer = scratch.acquire(member_id, param.group_size());

    let n = input.len();
    if n == 0 {
        // every member makes the same decision, so nobody is left waiting at
        // a barrier
        return init;
    }

    if let Some(partial) = accumulate_partial(input, member_id, param, &op) {
        // SAFETY: each member only writes its own slot and nobody reads
        // until after the barrier
        unsafe { buffer.store(member_id, partial) };
    }
    group.barrier();

    destructive_reduce_n(group, &buffer, n.min(param.group_size()), init, &op)
}
