// the reason this is named mod.rs has to do with some complexities of how
// testing is handled
//
// we are following the advice of the rust book
// https://doc.rust-lang.org/book/ch11-03-test-organization.html#submodules-in-integration-tests

#![allow(dead_code)] // not every test-binary uses every helper

use teamreduce::{Executor, LaunchConfig, SerialExecutor, ThreadExecutor};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A straightforward (and slow) reimplementation of the group reduction's
/// order of operations, written without any of the tiling or scratch-memory
/// machinery. We use it as an oracle.
///
/// - because a tile's length is always a multiple of `group_size`, element
///   `i` is always assigned to member `i % group_size` and each member folds
///   its elements in increasing order of `i`
/// - the tree pairs the first half of the live values against the mirrored
///   second half
pub fn reference_reduce<T: Clone>(
    input: &[T],
    group_size: usize,
    init: T,
    op: impl Fn(T, T) -> T,
) -> T {
    let mut partials: Vec<Option<T>> = vec![None; group_size];
    for (i, x) in input.iter().enumerate() {
        let partial = &mut partials[i % group_size];
        *partial = Some(match partial.take() {
            Some(accum) => op(accum, x.clone()),
            None => x.clone(),
        });
    }

    let mut live: Vec<T> = partials.into_iter().flatten().collect();
    while live.len() > 1 {
        let m = live.len();
        let half = m / 2;
        let tail = live.split_off(m - half);
        for (i, x) in tail.into_iter().rev().enumerate() {
            live[i] = op(live[i].clone(), x);
        }
    }

    match live.pop() {
        Some(root) => op(init, root),
        None => init,
    }
}

/// Used to parameterize tests over every backend
#[derive(Debug, Clone, Copy)]
pub enum Backend {
    Serial,
    Threads,
}

pub const BACKENDS: [Backend; 2] = [Backend::Serial, Backend::Threads];

pub fn reduce_with<T, U, F>(
    backend: Backend,
    group_size: usize,
    grain_size: usize,
    input: &[U],
    init: T,
    op: F,
) -> T
where
    U: Clone + Into<T> + Sync,
    T: Clone + Send + Sync,
    F: Fn(T, T) -> T + Sync,
{
    let config = LaunchConfig::new(group_size, grain_size).unwrap();
    let result = match backend {
        Backend::Serial => SerialExecutor::new(config).reduce(input, init, op),
        Backend::Threads => ThreadExecutor::new(config).reduce(input, init, op),
    };
    result.unwrap()
}
