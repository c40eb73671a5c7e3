//! Tiled local accumulation: the first phase of a group reduction
//!
//! The input is consumed in consecutive tiles of `group_size * grain_size`
//! elements. Within a tile, the member with id `t` is assigned the elements
//! at offsets `t, group_size + t, 2*group_size + t, ...`. In other words, the
//! assignment is strided rather than contiguous, so that on each step the
//! members read adjacent memory in lock-step (this is what coalesces memory
//! accesses on a GPU).
//!
//! The work within this phase is purely local to each member, so it doesn't
//! require any synchronization.

use crate::group::GroupParam;
use crate::input::InputRange;

/// A contiguous chunk of the input that is processed by the whole group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub start: usize,
    pub len: usize,
}

impl Tile {
    /// a tile is full when every member loads all `grain_size` elements
    #[inline(always)]
    pub fn is_full(&self, param: &GroupParam) -> bool {
        self.len >= param.tile_len()
    }

    /// The number of elements the member with `member_id` loads from this
    /// tile. These are the elements at the tile-offsets
    /// `group_size * i + member_id` for `i` in `0..n_assigned`.
    pub fn n_assigned(&self, member_id: usize, param: &GroupParam) -> usize {
        if self.is_full(param) {
            param.grain_size()
        } else if member_id >= self.len {
            0
        } else {
            (self.len - member_id)
                .div_ceil(param.group_size())
                .min(param.grain_size())
        }
    }
}

/// Iterates over the tiles that the group uses to consume `n_elements`.
///
/// Every tile is full except (possibly) the last one. No tiles are produced
/// when `n_elements` is zero.
#[derive(Clone, Debug)]
pub struct Tiles {
    next_start: usize,
    n_elements: usize,
    tile_len: usize,
}

impl Tiles {
    pub fn new(n_elements: usize, param: &GroupParam) -> Self {
        Tiles {
            next_start: 0,
            n_elements,
            tile_len: param.tile_len(),
        }
    }
}

impl Iterator for Tiles {
    type Item = Tile;

    fn next(&mut self) -> Option<Tile> {
        if self.next_start >= self.n_elements {
            return None;
        }
        let start = self.next_start;
        let len = self.tile_len.min(self.n_elements - start);
        self.next_start += len;
        Some(Tile { start, len })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = (self.n_elements - self.next_start.min(self.n_elements)).div_ceil(self.tile_len);
        (n, Some(n))
    }
}

impl ExactSizeIterator for Tiles {}

/// Folds every element of `input` assigned to `member_id` into a single
/// partial value.
///
/// Returns `None` when the member isn't assigned any elements (this always
/// happens for an empty input, and happens for members whose id is
/// `>= input.len()`).
///
/// The fold order is left-to-right: tile-by-tile, and within a tile, in order
/// of increasing grain-index. The very first element initializes the partial
/// value directly (there is no identity-element).
pub fn accumulate_partial<T, R, F>(
    input: &R,
    member_id: usize,
    param: &GroupParam,
    op: &F,
) -> Option<T>
where
    R: InputRange + ?Sized,
    R::Item: Into<T>,
    F: Fn(T, T) -> T,
{
    debug_assert!(member_id < param.group_size());
    let group_size = param.group_size();

    let mut partial: Option<T> = None;
    for tile in Tiles::new(input.len(), param) {
        // for a full tile, n_assigned is always grain_size. We only need to
        // worry about bounds for the final partial tile.
        let n_assigned = tile.n_assigned(member_id, param);
        for grain_idx in 0..n_assigned {
            let x: T = input
                .get(tile.start + group_size * grain_idx + member_id)
                .into();
            partial = Some(match partial {
                Some(accum) => op(accum, x),
                None => x,
            });
        }
    }
    partial
}
