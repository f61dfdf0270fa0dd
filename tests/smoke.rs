//! End-to-end check through the facade crate.

use bumpalo::Bump;
use ndshape::{Access, TypeArena, as_string, as_string_with_meta, literal};
use pretty_assertions::assert_eq;

#[test]
fn build_render_inspect() {
    let bump = Bump::new();
    let arena = TypeArena::new(&bump);

    let shape = literal::parse_i64("3", 0, i64::MAX).unwrap();
    let rec = arena.record(false, &[("x", arena.int64()), ("y", arena.float64())]);
    let ty = arena.fixed_dim(shape, rec);

    assert_eq!(ty.access(), Access::Concrete { datasize: 48, align: 8 });
    assert_eq!(
        as_string(ty),
        Ok("3 * {x : int64, y : float64}".to_string())
    );

    let meta = as_string_with_meta(ty).unwrap();
    assert!(meta.starts_with("FixedDim(\n"));
    assert!(meta.contains("offset=8, align=8, pad=0"));
}
