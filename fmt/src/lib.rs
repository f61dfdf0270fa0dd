//! Text serialization for datashape types.
//!
//! Two renderings are provided. The canonical notation ([`as_string`],
//! [`as_indented_string`]) is the compact form users read and write; it is
//! deterministic and round-trips through a datashape parser. The debug form
//! ([`as_string_with_meta`]) spells out every node with its access class,
//! dimension count, layout and flags, for inspection and golden tests.
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use ndshape_types::TypeArena;
//!
//! let bump = Bump::new();
//! let arena = TypeArena::new(&bump);
//!
//! let ty = arena.fixed_dim(10, arena.int32());
//! assert_eq!(ndshape_fmt::as_string(ty), Ok("10 * int32".to_string()));
//! ```

mod ast;
mod canonical;
mod error;
mod sink;

use ndshape_types::Type;

pub use error::FmtError;

use sink::Sink;

/// Renders `t` in the canonical notation on a single line.
pub fn as_string(t: &Type<'_>) -> Result<String, FmtError> {
    let mut buf = Sink::new();
    canonical::datashape(&mut buf, t, None)?;
    tracing::trace!(len = buf.len(), "rendered canonical form");
    Ok(buf.finish())
}

/// Renders `t` in the canonical notation with record fields broken onto
/// their own lines, two spaces per nesting level.
pub fn as_indented_string(t: &Type<'_>) -> Result<String, FmtError> {
    let mut buf = Sink::new();
    canonical::datashape(&mut buf, t, Some(0))?;
    tracing::trace!(len = buf.len(), "rendered indented canonical form");
    Ok(buf.finish())
}

/// Renders `t` in the debug form: one constructor per node with the full
/// metadata (access class, ndim, datasize/align where concrete, flags and
/// per-node layout).
pub fn as_string_with_meta(t: &Type<'_>) -> Result<String, FmtError> {
    let mut buf = Sink::new();
    ast::datashape(&mut buf, t, 0, false)?;
    tracing::trace!(len = buf.len(), "rendered debug form");
    Ok(buf.finish())
}
