/*!
Provides a group-cooperative reduction: a fixed-size group of workers (or
"members") that can synchronize with a barrier and share a small region of
scratch memory combine a sequence of values with an associative binary
operator, and every member ends up with the result.

# High-Level: How the reduction works

The work is split into 2 phases:
1. **Tiled local accumulation.** The input is consumed in tiles of
   `group_size * grain_size` elements. Within a tile, each member folds the
   `grain_size` elements it is assigned (with a stride of `group_size`) into
   a private partial value. No synchronization is required.
2. **Tree reduction.** Each member stores its partial value (if it has one)
   in scratch memory. The group then repeatedly pairs the first half of the
   live values with the mirrored second half, until a single value remains.
   This value is combined with the caller's initial value.

<div class="warning">

The tree combines values in a divide-and-conquer order. When the operator
isn't commutative, the result generally differs from a sequential
left-to-right fold. All backends use exactly the same order, so they produce
bitwise identical results.

</div>

# User Guide

```
use teamreduce::{Executor, LaunchConfig, SerialExecutor, ThreadExecutor};

let config = LaunchConfig::new(4, 2).unwrap();
let input: Vec<i64> = (1..=9).collect();

let total = SerialExecutor::new(config).reduce(&input[..], 0_i64, |a, b| a + b);
assert_eq!(total, Ok(45));

let total = ThreadExecutor::new(config).reduce(&input[..], 0_i64, |a, b| a + b);
assert_eq!(total, Ok(45));
```

# Developer Guide

The collective algorithm lives in [`teamreduce_nostd_internal`]. Backends
provide an [`ExecutionGroup`] for each member and own the scratch storage.

*/

#![deny(rustdoc::broken_intra_doc_links)]

// inform build-system of the crates in this package
mod config;
mod error;
mod executor;
mod parallel_serial;
mod parallel_threads;

// pull in symbols that visible outside of the package
pub use config::{LaunchConfig, LaunchConfigBuilder};
pub use error::Error;
pub use executor::Executor;
pub use parallel_serial::SerialExecutor;
pub use parallel_threads::{ThreadExecutor, ThreadMember};
pub use teamreduce_nostd_internal::{
    ExecutionGroup, GroupParam, InputRange, ScratchBuffer, ScratchPool, ScratchSlot, Tile, Tiles,
    TreeRound, TreeRounds, accumulate_partial, destructive_reduce_n, reduce,
};
