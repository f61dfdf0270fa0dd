//! Datashape types for array computing: an arena-allocated type algebra
//! with exact memory layout on concrete trees, plus the canonical text
//! notation and a metadata-rich debug form.
//!
//! This crate re-exports the type representation from `ndshape-types` and
//! the serializers from `ndshape-fmt`.
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use ndshape::{TypeArena, as_string, as_indented_string};
//!
//! let bump = Bump::new();
//! let arena = TypeArena::new(&bump);
//!
//! let rec = arena.record(false, &[("x", arena.int64()), ("y", arena.float64())]);
//! let ty = arena.fixed_dim(10, rec);
//!
//! assert_eq!(as_string(ty), Ok("10 * {x : int64, y : float64}".to_string()));
//! assert_eq!(
//!     as_indented_string(ty),
//!     Ok("10 * {\n  x : int64,\n  y : float64\n}".to_string())
//! );
//! ```

pub use ndshape_fmt::{FmtError, as_indented_string, as_string, as_string_with_meta};
pub use ndshape_types::{
    Access, AccessError, DimSlice, Encoding, Endian, Field, FieldLayout, FixedDimLayout,
    Type, TypeArena, TypeFlags, TypeKind, Value, VarDimLayout, fmt_g, literal,
};
