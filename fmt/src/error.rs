use thiserror::Error;

/// Serialization failure.
///
/// Neither variant is an expected outcome for a well-formed tree: `Output`
/// means the sink rejected a write, `Internal` means a node carried metadata
/// inconsistent with its tag (a bug in whoever built the tree, not bad user
/// input). Callers never receive partial text alongside an error.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum FmtError {
    #[error("output error")]
    Output,
    #[error("internal error: {0}")]
    Internal(&'static str),
}

impl From<core::fmt::Error> for FmtError {
    fn from(_: core::fmt::Error) -> FmtError {
        FmtError::Output
    }
}
