//! Implements a backend where each member of a group is a separate thread
//!
//! This is the most direct mapping of an execution group onto a CPU:
//! - the members are scoped threads, so they can borrow the input, the
//!   operator and the scratch storage
//! - the group barrier is a [`std::sync::Barrier`]
//! - every member calls the collective [`teamreduce_nostd_internal::reduce`]
//!
//! This isn't fast (spawning threads for every reduction is expensive). It's
//! primarily useful for checking that the collective code is correct when the
//! members actually run concurrently.

use crate::config::LaunchConfig;
use crate::error::Error;
use crate::executor::Executor;
use std::sync::Barrier;
use std::thread;
use teamreduce_nostd_internal::{
    ExecutionGroup, GroupParam, InputRange, ScratchPool, ScratchSlot, reduce,
};

/// The handle that a single thread uses to participate in the group
pub struct ThreadMember<'a> {
    member_id: usize,
    param: &'a GroupParam,
    barrier: &'a Barrier,
}

// SAFETY: member ids are assigned uniquely when the group is launched and
// `Barrier::wait` synchronizes memory between all of the waiting threads
unsafe impl ExecutionGroup for ThreadMember<'_> {
    fn param(&self) -> &GroupParam {
        self.param
    }

    fn member_id(&self) -> usize {
        self.member_id
    }

    fn barrier(&self) {
        self.barrier.wait();
    }
}

pub struct ThreadExecutor {
    config: LaunchConfig,
}

impl ThreadExecutor {
    pub fn new(config: LaunchConfig) -> Self {
        ThreadExecutor { config }
    }
}

impl Executor for ThreadExecutor {
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
        log::debug!(
            "threaded launch: {} members, grain size of {}, {} elements",
            group_size,
            param.grain_size(),
            input.len()
        );

        let storage: Vec<ScratchSlot<T>> = (0..self.config.scratch_slots())
            .map(|_| ScratchSlot::empty())
            .collect();
        let pool = ScratchPool::new(&storage);
        let barrier = Barrier::new(group_size);
        let op = &op;

        // if a member panics, the others never make it past the next
        // barrier. That's why the `op` of a reduction must not panic
        let per_member = thread::scope(|s| {
            let handles: Vec<_> = (0..group_size)
                .map(|member_id| {
                    let member = ThreadMember {
                        member_id,
                        param,
                        barrier: &barrier,
                    };
                    let pool = &pool;
                    let init = init.clone();
                    s.spawn(move || reduce(&member, pool, input, init, op))
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
                })
                .collect::<Vec<T>>()
        });
        Ok(per_member)
    }
}
