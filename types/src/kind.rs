use crate::encoding::Encoding;
use crate::flags::TypeFlags;
use crate::layout::{FieldLayout, FixedDimLayout, VarDimLayout};
use crate::ty::{Access, Type};
use crate::value::Value;

/// One named field of a record. Duplicate names are permitted; this layer
/// never looks fields up by name.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Field<'a> {
    pub name: &'a str,
    pub ty: &'a Type<'a>,
}

/// The closed tag set of the datashape algebra.
///
/// Structural variants carry their concrete layout as an `Option`: it is
/// `Some` exactly when the node is concrete, so layout can never be observed
/// uninitialized. All payloads borrow from the owning [`TypeArena`]
/// (children are shared, nodes are immutable).
///
/// [`TypeArena`]: crate::TypeArena
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum TypeKind<'a> {
    Module {
        name: &'a str,
        ty: &'a Type<'a>,
    },
    /// `pos` is always a `Tuple` node, `kwds` always a `Record` node.
    Function {
        pos: &'a Type<'a>,
        kwds: &'a Type<'a>,
        ret: &'a Type<'a>,
    },

    FixedDim {
        shape: i64,
        layout: Option<FixedDimLayout>,
        elem: &'a Type<'a>,
    },
    VarDim {
        layout: Option<VarDimLayout<'a>>,
        elem: &'a Type<'a>,
    },
    SymbolicDim {
        name: &'a str,
        elem: &'a Type<'a>,
    },
    EllipsisDim {
        name: Option<&'a str>,
        elem: &'a Type<'a>,
    },

    Tuple {
        variadic: bool,
        types: &'a [&'a Type<'a>],
        layout: Option<&'a [FieldLayout]>,
    },
    Record {
        variadic: bool,
        fields: &'a [Field<'a>],
        layout: Option<&'a [FieldLayout]>,
    },
    Ref(&'a Type<'a>),
    Constr {
        name: &'a str,
        ty: &'a Type<'a>,
    },
    /// Opaque named type with externally supplied layout.
    Nominal {
        name: &'a str,
        datasize: i64,
        align: u16,
    },

    Categorical(&'a [Value<'a>]),
    FixedString {
        size: u64,
        encoding: Encoding,
    },
    FixedBytes {
        size: u64,
        align: u16,
    },
    Bytes {
        target_align: u16,
    },
    Char(Encoding),
    String,

    Typevar(&'a str),

    Void,
    AnyKind,
    ScalarKind,
    Bool,
    SignedKind,
    Int8,
    Int16,
    Int32,
    Int64,
    UnsignedKind,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    FloatKind,
    Float16,
    Float32,
    Float64,
    ComplexKind,
    Complex32,
    Complex64,
    Complex128,
    FixedStringKind,
    FixedBytesKind,
}

impl<'a> TypeKind<'a> {
    /// Flags inherited from children, plus any flag this tag sets itself.
    pub(crate) fn compute_flags(&self) -> TypeFlags {
        use TypeKind::*;

        match self {
            Module { ty, .. } | Constr { ty, .. } | Ref(ty) => ty.flags().subtree(),
            Function { pos, kwds, ret } => {
                pos.flags().subtree() | kwds.flags().subtree() | ret.flags().subtree()
            }
            FixedDim { elem, .. } | VarDim { elem, .. } | SymbolicDim { elem, .. } => {
                elem.flags().subtree()
            }
            EllipsisDim { elem, .. } => elem.flags().subtree() | TypeFlags::ELLIPSIS,
            Tuple { types, .. } => types
                .iter()
                .fold(TypeFlags::empty(), |acc, t| acc | t.flags().subtree()),
            Record { fields, .. } => fields
                .iter()
                .fold(TypeFlags::empty(), |acc, f| acc | f.ty.flags().subtree()),
            _ => TypeFlags::empty(),
        }
    }

    /// Number of array dimensions at this node.
    pub(crate) fn compute_ndim(&self) -> u32 {
        use TypeKind::*;

        match self {
            FixedDim { elem, .. }
            | VarDim { elem, .. }
            | SymbolicDim { elem, .. }
            | EllipsisDim { elem, .. } => elem.ndim() + 1,
            _ => 0,
        }
    }

    /// Abstract/concrete classification, with datasize and alignment for
    /// concrete nodes. Derived from the children and the layout attached by
    /// the builder, so the duality invariant holds by construction.
    pub(crate) fn compute_access(&self) -> Access {
        use TypeKind::*;

        match *self {
            // Unconditionally abstract.
            Module { .. } | Function { .. } | SymbolicDim { .. } | EllipsisDim { .. }
            | Typevar(_) | Void | AnyKind | ScalarKind | SignedKind | UnsignedKind
            | FloatKind | ComplexKind | FixedStringKind | FixedBytesKind => Access::Abstract,

            // Fixed-width scalars.
            Bool | Int8 | Uint8 => Access::concrete(1, 1),
            Int16 | Uint16 | Float16 => Access::concrete(2, 2),
            Int32 | Uint32 | Float32 => Access::concrete(4, 4),
            Int64 | Uint64 | Float64 => Access::concrete(8, 8),
            Complex32 => Access::concrete(4, 2),
            Complex64 => Access::concrete(8, 4),
            Complex128 => Access::concrete(16, 8),

            // Pointer-sized string view, (ptr, size) bytes view.
            String => Access::concrete(8, 8),
            Bytes { .. } => Access::concrete(16, 8),
            Char(enc) => Access::concrete(enc.size() as i64, enc.align()),
            FixedString { size, encoding } => {
                Access::concrete((size * encoding.size()) as i64, encoding.align())
            }
            FixedBytes { size, align } => Access::concrete(size as i64, align),

            // Stored as an index into the value table.
            Categorical(_) => Access::concrete(8, 8),
            Nominal {
                datasize, align, ..
            } => Access::concrete(datasize, align),

            Ref(ty) => match ty.access() {
                Access::Concrete { .. } => Access::concrete(8, 8),
                Access::Abstract => Access::Abstract,
            },
            Constr { ty, .. } => ty.access(),

            FixedDim {
                shape,
                layout: Some(l),
                elem,
            } => match elem.access() {
                Access::Concrete { align, .. } => Access::concrete(shape * l.itemsize, align),
                Access::Abstract => Access::Abstract,
            },
            FixedDim { .. } => Access::Abstract,

            VarDim {
                layout: Some(l),
                elem,
            } => match elem.access() {
                Access::Concrete { align, .. } => {
                    let nitems = l.offsets.last().copied().unwrap_or(0) as i64;
                    Access::concrete(nitems * l.itemsize, align)
                }
                Access::Abstract => Access::Abstract,
            },
            VarDim { .. } => Access::Abstract,

            Tuple {
                variadic: false,
                types,
                layout: Some(lay),
            } => fields_access(lay, types.iter().map(|t| t.access())),
            Tuple { .. } => Access::Abstract,

            Record {
                variadic: false,
                fields,
                layout: Some(lay),
            } => fields_access(lay, fields.iter().map(|f| f.ty.access())),
            Record { .. } => Access::Abstract,
        }
    }
}

fn fields_access(
    layout: &[FieldLayout],
    children: impl Iterator<Item = Access>,
) -> Access {
    let mut align: u16 = 1;
    let mut end: i64 = 0;

    for (lay, access) in layout.iter().zip(children) {
        let Access::Concrete { datasize, .. } = access else {
            return Access::Abstract;
        };
        align = align.max(lay.align);
        end = lay.offset as i64 + datasize + lay.pad as i64;
    }

    Access::concrete(end, align)
}
