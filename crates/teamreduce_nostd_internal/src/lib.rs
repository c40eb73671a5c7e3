//! The reduction core of `teamreduce`.
//!
//! This crate is `no_std` and never allocates. It implements a collective
//! reduction that is executed by the members of an execution group (see
//! [`ExecutionGroup`]). Backends that actually launch groups (and own the
//! scratch storage) live in the `teamreduce` crate.
//!
//! The reduction proceeds in 2 phases:
//! 1. tiled local accumulation ([`accumulate`])
//! 2. a tree reduction over shared scratch memory ([`tree`])
//!
//! The building blocks of each phase are public so that backends which can't
//! execute barriers (e.g. a serial simulation of a group) can drive the
//! phases themselves and still produce bitwise identical results.

#![no_std]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod accumulate;
mod group;
mod input;
mod reduce;
mod scratch;
pub mod tree;

pub use accumulate::{Tile, Tiles, accumulate_partial};
pub use group::{ExecutionGroup, GroupParam};
pub use input::InputRange;
pub use reduce::reduce;
pub use scratch::{ScratchBuffer, ScratchPool, ScratchSlot};
pub use tree::{TreeRound, TreeRounds, combine_mirrored, destructive_reduce_n};
