//! Datashape type representation.
//!
//! A datashape type is an immutable, arena-allocated tree describing the
//! shape, element kind and memory layout of array/tensor and record data.
//! Concrete trees carry exact layout metadata (byte sizes, alignment,
//! per-field packing, ragged-dimension addressing); abstract trees contain
//! shape or kind polymorphism and carry none.
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
//! // 10 * {x : int64, y : float64}
//! let rec = arena.record(false, &[("x", arena.int64()), ("y", arena.float64())]);
//! let ty = arena.fixed_dim(10, rec);
//!
//! assert!(ty.is_concrete());
//! assert_eq!(ty.datasize(), Ok(160));
//! ```

mod arena;
mod encoding;
mod flags;
mod kind;
mod layout;
mod ty;
mod value;

pub mod literal;

pub use arena::TypeArena;
pub use encoding::Encoding;
pub use flags::{Endian, TypeFlags};
pub use kind::{Field, TypeKind};
pub use layout::{DimSlice, FieldLayout, FixedDimLayout, VarDimLayout};
pub use ty::{Access, AccessError, Type};
pub use value::{Value, fmt_g};
