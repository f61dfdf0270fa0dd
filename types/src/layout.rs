//! Memory-layout metadata carried by concrete types only.

use static_assertions::const_assert_eq;

/// Placement of one field inside a concrete tuple or record.
///
/// Adjacent entries obey the packing law
/// `offset[i] + size_i + pad[i] == offset[i + 1]`, and the last entry pads
/// out to the struct's datasize.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FieldLayout {
    pub offset: u64,
    pub align: u16,
    pub pad: u16,
}

/// Stride metadata of a concrete fixed dimension.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FixedDimLayout {
    /// Bytes advanced by one step along this dimension.
    pub itemsize: i64,
    /// The same stride expressed in elements.
    pub step: i64,
}

/// One `start:stop:step` triple of a ragged dimension's slice table.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct DimSlice {
    pub start: i64,
    pub stop: i64,
    pub step: i64,
}

/// Addressing metadata of a concrete ragged (`var`) dimension.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct VarDimLayout<'a> {
    /// Cumulative element offsets; entry `i`/`i + 1` bound sub-list `i`.
    pub offsets: &'a [i32],
    /// Sub-list addressing after slicing, if any.
    pub slices: &'a [DimSlice],
    /// Bytes per element row.
    pub itemsize: i64,
}

const_assert_eq!(core::mem::size_of::<FieldLayout>(), 16);
const_assert_eq!(core::mem::size_of::<DimSlice>(), 24);
