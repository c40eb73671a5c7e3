use crate::config::LaunchConfig;
use crate::error::Error;
use teamreduce_nostd_internal::InputRange;

/// a trait for expressing how to launch a group reduction
///
/// The idea is that we implement this for each parallelism "backend," so we
/// have a uniform interface for easily switching between backends. Every
/// backend produces bitwise identical results for the same configuration.
///
/// **NOTE:** Types that implement this trait live entirely on the host. They
/// own the scratch storage and launch the members of a group.
pub trait Executor {
    fn config(&self) -> &LaunchConfig;

    /// Launches a group to reduce `input` and returns the value that each
    /// member computed, in order of member id.
    ///
    /// Every entry is identical. This is mostly useful for testing that a
    /// backend really does hand the result to every member.
    fn reduce_per_member<R, T, F>(&mut self, input: &R, init: T, op: F) -> Result<Vec<T>, Error>
    where
        R: InputRange + Sync + ?Sized,
        R::Item: Into<T>,
        T: Clone + Send + Sync,
        F: Fn(T, T) -> T + Sync;

    /// Launches a group to reduce `input`, with `op`, starting from `init`.
    ///
    /// See [`crate::reduce`] for a description of the order in which `op` is
    /// applied. Implementations of `op` should not panic.
    fn reduce<R, T, F>(&mut self, input: &R, init: T, op: F) -> Result<T, Error>
    where
        R: InputRange + Sync + ?Sized,
        R::Item: Into<T>,
        T: Clone + Send + Sync,
        F: Fn(T, T) -> T + Sync,
    {
        let expected = self.config().group_size();
        let per_member = self.reduce_per_member(input, init, op)?;
        let actual = per_member.len();
        match per_member.into_iter().next() {
            Some(result) if actual == expected => Ok(result),
            _ => Err(Error::MemberCount { expected, actual }),
        }
    }
}
