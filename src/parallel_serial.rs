//! Implements the "serial" backend for running execution groups
//!
//! A single thread simulates every member of the group. Since a single thread
//! can't wait at a barrier for the other members, we can't simply call the
//! collective [`teamreduce_nostd_internal::reduce`]. Instead, we drive the
//! same phase functions that it's built from, one phase at a time: every
//! member performs its share of a phase before any member starts the next
//! phase. The phase boundaries are exactly where a parallel backend puts its
//! barriers.

use crate::config::LaunchConfig;
use crate::error::Error;
use crate::executor::Executor;
use teamreduce_nostd_internal::{
    InputRange, ScratchBuffer, ScratchPool, ScratchSlot, TreeRounds, accumulate_partial,
    combine_mirrored,
};

pub struct SerialExecutor {
    config: LaunchConfig,
}

impl SerialExecutor {
    pub fn new(config: LaunchConfig) -> Self {
        SerialExecutor { config }
    }
}

impl Executor for SerialExecutor {
    fn config(&self) -> &LaunchConfig {
        &self.config
    }

    fn reduce_per_member<R, T, F>(&mut self, input: &R, init: T, op: F) -> Result<Vec<T>, Error>
    where
        R: InputRange + Sync + ?Sized,
        R::Item: Into<T>,
        T: Clone + Send + Sync,
        F: Fn(T, T) -> T + Sync,
    {
        let param = self.config.param();
        let group_size = param.group_size();
        let n = input.len();
        log::debug!(
            "serial launch: {} members, grain size of {}, {} elements",
            group_size,
            param.grain_size(),
            n
        );

        let storage: Vec<ScratchSlot<T>> = (0..self.config.scratch_slots())
            .map(|_| ScratchSlot::empty())
            .collect();
        let pool = ScratchPool::new(&storage);
        // every member acquires its own handle to the scratch memory
        let buffers: Vec<ScratchBuffer<T>> = (0..group_size)
            .map(|member_id| pool.acquire(member_id, group_size))
            .collect();

        if n == 0 {
            return Ok(vec![init; group_size]);
        }

        // phase 1: tiled local accumulation
        for (member_id, buffer) in buffers.iter().enumerate() {
            if let Some(partial) = accumulate_partial(input, member_id, param, &op) {
                // SAFETY: a single thread performs every access
                unsafe { buffer.store(member_id, partial) };
            }
        }

        // phase 2: tree reduction. In a multi-threaded backend, each round is
        // followed by a barrier
        for round in TreeRounds::new(n.min(group_size)) {
            log::trace!("tree round: {} live values, {} pairs", round.live, round.half);
            for (member_id, buffer) in buffers.iter().enumerate().take(round.half) {
                // SAFETY: a single thread performs every access
                unsafe { combine_mirrored(buffer, &round, member_id, &op) };
            }
        }

        // SAFETY: a single thread performs every access
        let result = match unsafe { buffers[0].load(0) } {
            Some(root) => op(init, root),
            None => init,
        };
        Ok(vec![result; group_size])
    }
}
