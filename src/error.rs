// The core (`teamreduce_nostd_internal`) intentionally has no error taxonomy:
// everything that can go wrong inside of a collective call is a violation of
// a precondition, and it's reported with an assertion. Instead, we try to
// catch these problems while configuring a launch, before any member starts
// executing. Those errors are described here.
//
// The stringly errors returned by the core's constructors get wrapped by
// `Error::GroupParam`.

/// The error type returned while configuring and launching a reduction
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The group parameters are invalid (e.g. a zero group size)
    #[error("invalid group parameters: {0}")]
    GroupParam(&'static str),
    /// The scratch memory can't hold one value per member of the group
    #[error("the scratch memory holds {available} slots, but the group needs {required}")]
    ScratchTooSmall { required: usize, available: usize },
    /// A backend produced the wrong number of member results. This indicates
    /// a bug in the backend.
    #[error("expected a result from each of the {expected} members, got {actual}")]
    MemberCount { expected: usize, actual: usize },
}
