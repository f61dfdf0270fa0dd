//! Golden tests for the metadata-rich debug form.

use bumpalo::Bump;
use expect_test::expect;
use ndshape_fmt::as_string_with_meta;
use ndshape_types::{Encoding, Endian, TypeArena, Value};

macro_rules! arena {
    ($a:ident) => {
        let bump = Bump::new();
        let $a = TypeArena::new(&bump);
    };
}

#[test]
fn scalar() {
    arena!(a);
    expect![[r#"Int32(access=Concrete, ndim=0, datasize=4, align=4, flags=[])"#]]
        .assert_eq(&as_string_with_meta(a.int32()).unwrap());
}

#[test]
fn abstract_leaf() {
    arena!(a);
    expect![[r#"Any(access=Abstract, ndim=0, flags=[])"#]]
        .assert_eq(&as_string_with_meta(a.any_kind()).unwrap());
}

#[test]
fn marker_flags() {
    arena!(a);
    let t = a.optional(a.with_endian(a.int32(), Endian::Little));
    expect![[r#"Int32(access=Concrete, ndim=0, datasize=4, align=4, flags=[OPTION, LITTLE_ENDIAN])"#]]
        .assert_eq(&as_string_with_meta(t).unwrap());
}

#[test]
fn fixed_dim() {
    arena!(a);
    let t = a.fixed_dim(2, a.int32());
    expect![[r#"
FixedDim(
  Int32(access=Concrete, ndim=0, datasize=4, align=4, flags=[]),
  shape=2, itemsize=4, step=1,
  access=Concrete, ndim=1, datasize=8, align=4, flags=[]
)"#]]
    .assert_eq(&as_string_with_meta(t).unwrap());
}

#[test]
fn abstract_fixed_dim_omits_layout() {
    arena!(a);
    let t = a.fixed_dim(2, a.any_kind());
    expect![[r#"
FixedDim(
  Any(access=Abstract, ndim=0, flags=[]),
  shape=2,
  access=Abstract, ndim=1, flags=[]
)"#]]
    .assert_eq(&as_string_with_meta(t).unwrap());
}

#[test]
fn symbolic_dim() {
    arena!(a);
    let t = a.symbolic_dim("N", a.int32());
    expect![[r#"
SymbolicDim(
  Int32(access=Concrete, ndim=0, datasize=4, align=4, flags=[]),
  name='N',
  access=Abstract, ndim=1, flags=[]
)"#]]
    .assert_eq(&as_string_with_meta(t).unwrap());
}

#[test]
fn ellipsis_dim() {
    arena!(a);
    let t = a.ellipsis_dim(None, a.any_kind());
    expect![[r#"
EllipsisDim(
  Any(access=Abstract, ndim=0, flags=[])
  access=Abstract, ndim=1, flags=[ELLIPSIS]
)"#]]
    .assert_eq(&as_string_with_meta(t).unwrap());
}

#[test]
fn var_dim_with_offsets() {
    arena!(a);
    let t = a.var_dim_with_offsets(a.int64(), &[0, 2, 3], &[]).unwrap();
    expect![[r#"
VarDim(
  Int64(access=Concrete, ndim=0, datasize=8, align=8, flags=[]),
  offsets=[0, 2, 3],
  slices=[],
  itemsize=8,
  access=Concrete, ndim=1, datasize=24, align=8, flags=[]
)"#]]
    .assert_eq(&as_string_with_meta(t).unwrap());
}

#[test]
fn concrete_tuple_carries_field_layout() {
    arena!(a);
    let t = a.tuple(false, &[a.int64(), a.int32()]);
    expect![[r#"
Tuple(
  TupleField(
    type=Int64(access=Concrete, ndim=0, datasize=8, align=8, flags=[]),
    offset=0, align=8, pad=0
  ),
  TupleField(
    type=Int32(access=Concrete, ndim=0, datasize=4, align=4, flags=[]),
    offset=8, align=4, pad=4
  ),
  access=Concrete, ndim=0, datasize=16, align=8, flags=[]
)"#]]
    .assert_eq(&as_string_with_meta(t).unwrap());
}

#[test]
fn variadic_tuple() {
    arena!(a);
    let t = a.tuple(true, &[a.any_kind()]);
    expect![[r#"
Tuple(
  TupleField(
    type=Any(access=Abstract, ndim=0, flags=[])
  ),
  variadic=true,
  access=Abstract, ndim=0, flags=[]
)"#]]
    .assert_eq(&as_string_with_meta(t).unwrap());
}

#[test]
fn empty_variadic_tuple() {
    arena!(a);
    let t = a.tuple(true, &[]);
    expect![[r#"
Tuple(
  variadic=true,
  access=Abstract, ndim=0, flags=[]
)"#]]
    .assert_eq(&as_string_with_meta(t).unwrap());
}

#[test]
fn record_field_names() {
    arena!(a);
    let t = a.record(false, &[("x", a.int64())]);
    expect![[r#"
Record(
  RecordField(
    name='x',
    type=Int64(access=Concrete, ndim=0, datasize=8, align=8, flags=[]),
    offset=0, align=8, pad=0
  ),
  access=Concrete, ndim=0, datasize=8, align=8, flags=[]
)"#]]
    .assert_eq(&as_string_with_meta(t).unwrap());
}

#[test]
fn subtree_option_flag() {
    arena!(a);
    let t = a.record(false, &[("x", a.optional(a.int64()))]);
    expect![[r#"
Record(
  RecordField(
    name='x',
    type=Int64(access=Concrete, ndim=0, datasize=8, align=8, flags=[OPTION]),
    offset=0, align=8, pad=0
  ),
  access=Concrete, ndim=0, datasize=8, align=8, flags=[SUBTREE_OPTION]
)"#]]
    .assert_eq(&as_string_with_meta(t).unwrap());
}

#[test]
fn function_signature() {
    arena!(a);
    let f = a.function(
        a.tuple(false, &[a.int32()]),
        a.record(false, &[]),
        a.int32(),
    );
    expect![[r#"
Function(
  pos=Tuple(
        TupleField(
          type=Int32(access=Concrete, ndim=0, datasize=4, align=4, flags=[]),
          offset=0, align=4, pad=0
        ),
        access=Concrete, ndim=0, datasize=4, align=4, flags=[]
      ),
  kwds=Record(
         access=Concrete, ndim=0, datasize=0, align=1, flags=[]
       ),
  ret=Int32(access=Concrete, ndim=0, datasize=4, align=4, flags=[]),
  access=Abstract, ndim=0, flags=[]
)"#]]
    .assert_eq(&as_string_with_meta(f).unwrap());
}

#[test]
fn module_and_constr() {
    arena!(a);
    let t = a.module("M", a.int32());
    expect![[r#"
Module(
  name='M',
  type=Int32(access=Concrete, ndim=0, datasize=4, align=4, flags=[])
  access=Abstract, ndim=0, flags=[]
)"#]]
    .assert_eq(&as_string_with_meta(t).unwrap());

    let t = a.constr("X", a.any_kind());
    expect![[r#"
Constr(
  name='X',
  type=Any(access=Abstract, ndim=0, flags=[])
  access=Abstract, ndim=0, flags=[]
)"#]]
    .assert_eq(&as_string_with_meta(t).unwrap());
}

#[test]
fn nominal() {
    arena!(a);
    let t = a.nominal("defined_t", 8, 8);
    expect![[r#"
Nominal(
  name='defined_t',
  access=Concrete, ndim=0, datasize=8, align=8, flags=[]
)"#]]
    .assert_eq(&as_string_with_meta(t).unwrap());
}

#[test]
fn ref_node() {
    arena!(a);
    let t = a.ref_of(a.int32());
    expect![[r#"
Ref(
  Int32(access=Concrete, ndim=0, datasize=4, align=4, flags=[]),
  access=Concrete, ndim=0, datasize=8, align=8, flags=[]
)"#]]
    .assert_eq(&as_string_with_meta(t).unwrap());
}

#[test]
fn typevar_is_single_line() {
    arena!(a);
    expect![[r#"Typevar(name='T', access=Abstract, ndim=0, flags=[])"#]]
        .assert_eq(&as_string_with_meta(a.typevar("T")).unwrap());
}

#[test]
fn char_and_bytes() {
    arena!(a);
    expect![[r#"
Char('utf32',
  access=Concrete, ndim=0, datasize=4, align=4, flags=[]
)"#]]
    .assert_eq(&as_string_with_meta(a.char(Encoding::Utf32)).unwrap());

    expect![[r#"
Bytes(target_align=2,
  access=Concrete, ndim=0, datasize=16, align=8, flags=[]
)"#]]
    .assert_eq(&as_string_with_meta(a.bytes(2)).unwrap());
}

#[test]
fn categorical_inlines_attributes() {
    arena!(a);
    let t = a.categorical(&[Value::Int64(10), Value::Float64(1.05e10)]);
    expect![[r#"
Categorical(10, 1.05e+10  access=Concrete, ndim=0, datasize=8, align=8, flags=[]
)"#]]
    .assert_eq(&as_string_with_meta(t).unwrap());
}
