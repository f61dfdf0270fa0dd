use core::cell::RefCell;

use bumpalo::Bump;
use hashbrown::{DefaultHashBuilder, HashSet};
use smallvec::SmallVec;

use crate::encoding::Encoding;
use crate::flags::{Endian, TypeFlags};
use crate::kind::{Field, TypeKind};
use crate::layout::{DimSlice, FieldLayout, FixedDimLayout, VarDimLayout};
use crate::ty::{Access, AccessError, Type};
use crate::value::Value;

type StringSet<'a> = HashSet<&'a str, DefaultHashBuilder, &'a Bump>;

/// The marker flags that are not derivable from a node's structure.
const MARKERS: TypeFlags = TypeFlags::OPTION
    .union(TypeFlags::LITTLE_ENDIAN)
    .union(TypeFlags::BIG_ENDIAN);

/// Arena-backed builder for datashape type trees.
///
/// Nodes and identifier strings live in a `Bump` arena; identifiers are
/// interned, so repeated names share one allocation. Every constructor
/// computes the cached node properties (flags, ndim, access) and, for
/// concrete composites, the struct-packing layout. Returned references are
/// plain `Copy` handles, so subtrees can be shared freely across parents.
///
/// # Example
///
/// ```
/// use bumpalo::Bump;
/// use ndshape_types::TypeArena;
///
/// let bump = Bump::new();
/// let arena = TypeArena::new(&bump);
///
/// let elem = arena.int32();
/// let ty = arena.fixed_dim(10, elem);
/// assert_eq!(ty.ndim(), 1);
/// assert_eq!(ty.datasize(), Ok(40));
/// ```
pub struct TypeArena<'a> {
    bump: &'a Bump,
    strings: RefCell<StringSet<'a>>,
}

macro_rules! leaf_constructors {
    ($($name:ident => $variant:ident),* $(,)?) => {
        $(
            pub fn $name(&self) -> &'a Type<'a> {
                self.alloc(TypeKind::$variant)
            }
        )*
    };
}

impl<'a> TypeArena<'a> {
    pub fn new(bump: &'a Bump) -> TypeArena<'a> {
        TypeArena {
            bump,
            strings: RefCell::new(StringSet::new_in(bump)),
        }
    }

    /// Interns an identifier, returning the arena-lifetime copy.
    pub fn intern(&self, s: &str) -> &'a str {
        let mut strings = self.strings.borrow_mut();
        if let Some(&found) = strings.get(s) {
            return found;
        }
        let copied: &'a str = self.bump.alloc_str(s);
        strings.insert(copied);
        copied
    }

    /// Allocates a node for `kind` with no option/endian markers.
    pub fn alloc(&self, kind: TypeKind<'a>) -> &'a Type<'a> {
        self.alloc_with(kind, TypeFlags::empty())
    }

    fn alloc_with(&self, kind: TypeKind<'a>, markers: TypeFlags) -> &'a Type<'a> {
        self.bump.alloc(Type::new(kind, markers))
    }

    // --- markers -----------------------------------------------------------

    /// Returns an option-flagged copy of `t`. Nodes are shared and immutable,
    /// so markers are applied by re-allocating rather than mutating.
    pub fn optional(&self, t: &'a Type<'a>) -> &'a Type<'a> {
        self.alloc_with(*t.kind(), (t.flags() & MARKERS) | TypeFlags::OPTION)
    }

    /// Returns a copy of `t` with an explicit byte order.
    pub fn with_endian(&self, t: &'a Type<'a>, endian: Endian) -> &'a Type<'a> {
        let endian = match endian {
            Endian::Little => TypeFlags::LITTLE_ENDIAN,
            Endian::Big => TypeFlags::BIG_ENDIAN,
        };
        let markers = (t.flags() & MARKERS)
            - (TypeFlags::LITTLE_ENDIAN | TypeFlags::BIG_ENDIAN)
            | endian;
        self.alloc_with(*t.kind(), markers)
    }

    // --- dimensions --------------------------------------------------------

    /// Fixed dimension of `shape` elements. Concrete (with stride layout)
    /// iff the element is concrete.
    pub fn fixed_dim(&self, shape: i64, elem: &'a Type<'a>) -> &'a Type<'a> {
        let layout = match elem.access() {
            Access::Concrete { datasize, .. } => Some(FixedDimLayout {
                itemsize: datasize,
                step: elem_step(elem),
            }),
            Access::Abstract => None,
        };
        self.alloc(TypeKind::FixedDim {
            shape,
            layout,
            elem,
        })
    }

    /// Ragged dimension with no addressing metadata (abstract).
    pub fn var_dim(&self, elem: &'a Type<'a>) -> &'a Type<'a> {
        self.alloc(TypeKind::VarDim { layout: None, elem })
    }

    /// Concrete ragged dimension. `offsets` is the cumulative element-offset
    /// table, `slices` the optional sub-list addressing triples. Fails if
    /// the element type is abstract.
    pub fn var_dim_with_offsets(
        &self,
        elem: &'a Type<'a>,
        offsets: &[i32],
        slices: &[DimSlice],
    ) -> Result<&'a Type<'a>, AccessError> {
        let itemsize = elem.datasize()?;
        let layout = VarDimLayout {
            offsets: self.bump.alloc_slice_copy(offsets),
            slices: self.bump.alloc_slice_copy(slices),
            itemsize,
        };
        Ok(self.alloc(TypeKind::VarDim {
            layout: Some(layout),
            elem,
        }))
    }

    pub fn symbolic_dim(&self, name: &str, elem: &'a Type<'a>) -> &'a Type<'a> {
        self.alloc(TypeKind::SymbolicDim {
            name: self.intern(name),
            elem,
        })
    }

    pub fn ellipsis_dim(&self, name: Option<&str>, elem: &'a Type<'a>) -> &'a Type<'a> {
        self.alloc(TypeKind::EllipsisDim {
            name: name.map(|n| self.intern(n)),
            elem,
        })
    }

    // --- composites --------------------------------------------------------

    /// Tuple of unnamed fields. Non-variadic tuples over concrete fields
    /// receive packed per-field layout; variadic tuples stay abstract.
    pub fn tuple(&self, variadic: bool, types: &[&'a Type<'a>]) -> &'a Type<'a> {
        let types = self.bump.alloc_slice_copy(types);
        let layout = if variadic {
            None
        } else {
            self.pack(types.iter().map(|t| t.access()))
        };
        self.alloc(TypeKind::Tuple {
            variadic,
            types,
            layout,
        })
    }

    /// Record of named fields. Duplicate names are accepted as-is.
    pub fn record(&self, variadic: bool, fields: &[(&str, &'a Type<'a>)]) -> &'a Type<'a> {
        let fields = self
            .bump
            .alloc_slice_fill_iter(fields.iter().map(|&(name, ty)| Field {
                name: self.intern(name),
                ty,
            }));
        let layout = if variadic {
            None
        } else {
            self.pack(fields.iter().map(|f| f.ty.access()))
        };
        self.alloc(TypeKind::Record {
            variadic,
            fields,
            layout,
        })
    }

    /// Function signature. `pos` must be a tuple node and `kwds` a record
    /// node; functions are always abstract.
    pub fn function(
        &self,
        pos: &'a Type<'a>,
        kwds: &'a Type<'a>,
        ret: &'a Type<'a>,
    ) -> &'a Type<'a> {
        debug_assert!(matches!(pos.kind(), TypeKind::Tuple { .. }));
        debug_assert!(matches!(kwds.kind(), TypeKind::Record { .. }));
        self.alloc(TypeKind::Function { pos, kwds, ret })
    }

    pub fn module(&self, name: &str, ty: &'a Type<'a>) -> &'a Type<'a> {
        self.alloc(TypeKind::Module {
            name: self.intern(name),
            ty,
        })
    }

    pub fn constr(&self, name: &str, ty: &'a Type<'a>) -> &'a Type<'a> {
        self.alloc(TypeKind::Constr {
            name: self.intern(name),
            ty,
        })
    }

    pub fn ref_of(&self, ty: &'a Type<'a>) -> &'a Type<'a> {
        self.alloc(TypeKind::Ref(ty))
    }

    /// Opaque named type; the layout comes from whoever defined the name.
    pub fn nominal(&self, name: &str, datasize: i64, align: u16) -> &'a Type<'a> {
        self.alloc(TypeKind::Nominal {
            name: self.intern(name),
            datasize,
            align,
        })
    }

    pub fn typevar(&self, name: &str) -> &'a Type<'a> {
        self.alloc(TypeKind::Typevar(self.intern(name)))
    }

    // --- scalars with attributes -------------------------------------------

    pub fn categorical(&self, values: &[Value<'_>]) -> &'a Type<'a> {
        let values = self
            .bump
            .alloc_slice_fill_iter(values.iter().map(|v| match *v {
                Value::String(s) => Value::String(self.intern(s)),
                Value::Bool(b) => Value::Bool(b),
                Value::Int64(i) => Value::Int64(i),
                Value::Float64(f) => Value::Float64(f),
                Value::Na => Value::Na,
            }));
        self.alloc(TypeKind::Categorical(values))
    }

    pub fn fixed_string(&self, size: u64, encoding: Encoding) -> &'a Type<'a> {
        self.alloc(TypeKind::FixedString { size, encoding })
    }

    pub fn fixed_bytes(&self, size: u64, align: u16) -> &'a Type<'a> {
        self.alloc(TypeKind::FixedBytes { size, align })
    }

    pub fn bytes(&self, target_align: u16) -> &'a Type<'a> {
        self.alloc(TypeKind::Bytes { target_align })
    }

    pub fn char(&self, encoding: Encoding) -> &'a Type<'a> {
        self.alloc(TypeKind::Char(encoding))
    }

    leaf_constructors! {
        void => Void,
        any_kind => AnyKind,
        scalar_kind => ScalarKind,
        bool => Bool,
        signed_kind => SignedKind,
        int8 => Int8,
        int16 => Int16,
        int32 => Int32,
        int64 => Int64,
        unsigned_kind => UnsignedKind,
        uint8 => Uint8,
        uint16 => Uint16,
        uint32 => Uint32,
        uint64 => Uint64,
        float_kind => FloatKind,
        float16 => Float16,
        float32 => Float32,
        float64 => Float64,
        complex_kind => ComplexKind,
        complex32 => Complex32,
        complex64 => Complex64,
        complex128 => Complex128,
        fixed_string_kind => FixedStringKind,
        fixed_bytes_kind => FixedBytesKind,
        string => String,
    }

    // --- struct packing ----------------------------------------------------

    /// Computes per-field offset/align/pad for a composite whose fields are
    /// all concrete; returns `None` (abstract) as soon as one is not.
    ///
    /// The result satisfies `offset[i] + size_i + pad[i] == offset[i + 1]`
    /// for adjacent fields, with the last field padding out to the total
    /// size (which is rounded up to the struct alignment).
    fn pack(
        &self,
        children: impl ExactSizeIterator<Item = Access>,
    ) -> Option<&'a [FieldLayout]> {
        let mut sizes: SmallVec<[i64; 8]> = SmallVec::new();
        let mut layout: SmallVec<[FieldLayout; 8]> = SmallVec::new();
        let mut end: i64 = 0;
        let mut struct_align: u16 = 1;

        for access in children {
            let Access::Concrete { datasize, align } = access else {
                return None;
            };
            let offset = round_up(end, align);
            layout.push(FieldLayout {
                offset: offset as u64,
                align,
                pad: 0,
            });
            sizes.push(datasize);
            end = offset + datasize;
            struct_align = struct_align.max(align);
        }

        let datasize = round_up(end, struct_align);
        let n = layout.len();
        for i in 0..n {
            let field_end = layout[i].offset as i64 + sizes[i];
            let next = if i + 1 < n {
                layout[i + 1].offset as i64
            } else {
                datasize
            };
            layout[i].pad = (next - field_end) as u16;
        }

        Some(self.bump.alloc_slice_copy(&layout))
    }
}

/// Stride in elements for a dimension over `elem`.
fn elem_step(elem: &Type<'_>) -> i64 {
    match *elem.kind() {
        TypeKind::FixedDim {
            shape,
            layout: Some(l),
            ..
        } => l.step * shape,
        _ => 1,
    }
}

fn round_up(x: i64, align: u16) -> i64 {
    let align = align.max(1) as i64;
    (x + align - 1) / align * align
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn with_arena(f: impl for<'a> FnOnce(&TypeArena<'a>)) {
        let bump = Bump::new();
        let arena = TypeArena::new(&bump);
        f(&arena);
    }

    #[test]
    fn interning_dedups() {
        with_arena(|a| {
            let x = a.intern("alpha");
            let y = a.intern("alpha");
            assert!(core::ptr::eq(x.as_ptr(), y.as_ptr()));
        });
    }

    #[test]
    fn scalar_sizes() {
        with_arena(|a| {
            assert_eq!(a.bool().datasize(), Ok(1));
            assert_eq!(a.int64().align(), Ok(8));
            assert_eq!(a.complex32().datasize(), Ok(4));
            assert_eq!(a.complex32().align(), Ok(2));
            assert_eq!(a.complex128().datasize(), Ok(16));
        });
    }

    #[test]
    fn kind_wildcards_are_abstract() {
        with_arena(|a| {
            for t in [
                a.void(),
                a.any_kind(),
                a.scalar_kind(),
                a.signed_kind(),
                a.unsigned_kind(),
                a.float_kind(),
                a.complex_kind(),
                a.fixed_string_kind(),
                a.fixed_bytes_kind(),
            ] {
                assert!(t.is_abstract());
                assert_eq!(t.datasize(), Err(AccessError));
            }
        });
    }

    #[test]
    fn fixed_dim_layout_and_ndim() {
        with_arena(|a| {
            let inner = a.fixed_dim(5, a.int8());
            let outer = a.fixed_dim(10, inner);
            assert_eq!(inner.ndim(), 1);
            assert_eq!(outer.ndim(), 2);
            assert_eq!(outer.datasize(), Ok(50));
            let TypeKind::FixedDim {
                layout: Some(l), ..
            } = *outer.kind()
            else {
                panic!("expected concrete fixed dim");
            };
            assert_eq!(l.itemsize, 5);
            assert_eq!(l.step, 5);
        });
    }

    #[test]
    fn dim_over_abstract_elem_is_abstract() {
        with_arena(|a| {
            let t = a.fixed_dim(10, a.any_kind());
            assert!(t.is_abstract());
            assert_eq!(t.ndim(), 1);
            let TypeKind::FixedDim { layout, .. } = t.kind() else {
                panic!("expected fixed dim");
            };
            assert!(layout.is_none());
        });
    }

    #[test]
    fn var_dim_layout() {
        with_arena(|a| {
            let t = a
                .var_dim_with_offsets(a.int64(), &[0, 2, 3], &[])
                .expect("concrete element");
            assert!(t.is_concrete());
            assert_eq!(t.ndim(), 1);
            assert_eq!(t.datasize(), Ok(24));
            assert!(a.var_dim_with_offsets(a.any_kind(), &[0], &[]).is_err());
        });
    }

    #[test]
    fn tuple_packing_law() {
        with_arena(|a| {
            // (int64, int32, int16): offsets 0, 8, 12; datasize 16 (align 8).
            let t = a.tuple(false, &[a.int64(), a.int32(), a.int16()]);
            assert_eq!(t.datasize(), Ok(16));
            assert_eq!(t.align(), Ok(8));
            let TypeKind::Tuple {
                types,
                layout: Some(lay),
                ..
            } = *t.kind()
            else {
                panic!("expected concrete tuple");
            };
            assert_eq!(
                lay,
                &[
                    FieldLayout { offset: 0, align: 8, pad: 0 },
                    FieldLayout { offset: 8, align: 4, pad: 0 },
                    FieldLayout { offset: 12, align: 2, pad: 2 },
                ]
            );
            for i in 0..lay.len() - 1 {
                let size = types[i].datasize().expect("concrete field");
                assert_eq!(
                    lay[i].offset + size as u64 + lay[i].pad as u64,
                    lay[i + 1].offset
                );
            }
        });
    }

    #[test]
    fn alignment_gaps_become_padding() {
        with_arena(|a| {
            // (int8, int64): the gap before the second field pads field 0.
            let t = a.tuple(false, &[a.int8(), a.int64()]);
            assert_eq!(t.datasize(), Ok(16));
            let TypeKind::Tuple {
                layout: Some(lay), ..
            } = *t.kind()
            else {
                panic!("expected concrete tuple");
            };
            assert_eq!(lay[0].pad, 7);
            assert_eq!(lay[1].offset, 8);
        });
    }

    #[test]
    fn empty_composites_are_concrete() {
        with_arena(|a| {
            let t = a.tuple(false, &[]);
            assert_eq!(t.datasize(), Ok(0));
            assert_eq!(t.align(), Ok(1));
            let r = a.record(false, &[]);
            assert_eq!(r.datasize(), Ok(0));
        });
    }

    #[test]
    fn variadic_composites_are_abstract() {
        with_arena(|a| {
            assert!(a.tuple(true, &[]).is_abstract());
            assert!(a.tuple(true, &[a.int64()]).is_abstract());
            assert!(a.record(true, &[("x", a.int64())]).is_abstract());
        });
    }

    #[test]
    fn duplicate_record_names_accepted() {
        with_arena(|a| {
            let t = a.record(false, &[("x", a.int64()), ("x", a.int64())]);
            let TypeKind::Record { fields, .. } = t.kind() else {
                panic!("expected record");
            };
            assert_eq!(fields.len(), 2);
            assert_eq!(fields[0].name, fields[1].name);
            assert_eq!(t.datasize(), Ok(16));
        });
    }

    #[test]
    fn option_and_endian_markers() {
        with_arena(|a| {
            let t = a.optional(a.with_endian(a.int32(), Endian::Little));
            assert!(t.is_optional());
            assert!(t.endian_is_set());
            assert!(t.is_little_endian());
            // Markers do not disturb the layout.
            assert_eq!(t.datasize(), Ok(4));

            let big = a.with_endian(t, Endian::Big);
            assert!(big.is_big_endian());
            assert!(!big.is_little_endian());
            assert!(big.is_optional());
        });
    }

    #[test]
    fn option_propagates_as_subtree_option() {
        with_arena(|a| {
            let t = a.tuple(false, &[a.optional(a.int32())]);
            assert!(!t.is_optional());
            assert!(t.flags().contains(TypeFlags::SUBTREE_OPTION));
        });
    }

    #[test]
    fn ellipsis_flag_propagates() {
        with_arena(|a| {
            let t = a.fixed_dim(10, a.ellipsis_dim(None, a.any_kind()));
            assert!(t.flags().contains(TypeFlags::ELLIPSIS));
            assert_eq!(t.ndim(), 2);
            assert!(t.is_abstract());
        });
    }

    #[test]
    fn functions_are_abstract() {
        with_arena(|a| {
            let pos = a.tuple(false, &[a.int32()]);
            let kwds = a.record(false, &[]);
            let f = a.function(pos, kwds, a.int32());
            assert!(f.is_abstract());
            assert_eq!(f.datasize(), Err(AccessError));
        });
    }

    #[test]
    fn shared_subtrees() {
        with_arena(|a| {
            let elem = a.int64();
            let t = a.tuple(false, &[elem, elem]);
            let TypeKind::Tuple { types, .. } = t.kind() else {
                panic!("expected tuple");
            };
            assert!(core::ptr::eq(types[0], types[1]));
        });
    }
}
