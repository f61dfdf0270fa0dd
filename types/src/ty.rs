use thiserror::Error;

use crate::flags::TypeFlags;
use crate::kind::TypeKind;

/// Returned when memory-layout metadata is requested from an abstract type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Error)]
#[error("abstract type carries no memory layout")]
pub struct AccessError;

/// Abstract/concrete classification of a node.
///
/// Only concrete nodes know their total byte size and required alignment;
/// asking an abstract node fails with [`AccessError`] instead of exposing
/// uninitialized layout.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Access {
    Abstract,
    Concrete { datasize: i64, align: u16 },
}

impl Access {
    pub(crate) fn concrete(datasize: i64, align: u16) -> Access {
        Access::Concrete { datasize, align }
    }
}

/// One immutable datashape type node.
///
/// Nodes are allocated by a [`TypeArena`], never mutated afterwards, and may
/// share child subtrees across parents. The cached `flags`, `ndim` and
/// `access` are computed once at construction from the kind.
///
/// [`TypeArena`]: crate::TypeArena
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Type<'a> {
    kind: TypeKind<'a>,
    flags: TypeFlags,
    ndim: u32,
    access: Access,
}

impl<'a> Type<'a> {
    /// Builds a node, deriving the cached properties from the kind. `extra`
    /// holds the markers that are not structural: `OPTION` and the explicit
    /// endianness flags.
    pub(crate) fn new(kind: TypeKind<'a>, extra: TypeFlags) -> Type<'a> {
        Type {
            flags: kind.compute_flags() | extra,
            ndim: kind.compute_ndim(),
            access: kind.compute_access(),
            kind,
        }
    }

    pub fn kind(&self) -> &TypeKind<'a> {
        &self.kind
    }

    pub fn flags(&self) -> TypeFlags {
        self.flags
    }

    /// Number of array dimensions at this node.
    pub fn ndim(&self) -> u32 {
        self.ndim
    }

    pub fn access(&self) -> Access {
        self.access
    }

    pub fn is_abstract(&self) -> bool {
        matches!(self.access, Access::Abstract)
    }

    pub fn is_concrete(&self) -> bool {
        !self.is_abstract()
    }

    pub fn is_optional(&self) -> bool {
        self.flags.contains(TypeFlags::OPTION)
    }

    /// Whether byte order was given explicitly. Unset is distinct from
    /// native: an unset endianness prints nothing.
    pub fn endian_is_set(&self) -> bool {
        self.flags
            .intersects(TypeFlags::LITTLE_ENDIAN | TypeFlags::BIG_ENDIAN)
    }

    pub fn is_little_endian(&self) -> bool {
        self.flags.contains(TypeFlags::LITTLE_ENDIAN)
    }

    pub fn is_big_endian(&self) -> bool {
        self.flags.contains(TypeFlags::BIG_ENDIAN)
    }

    /// Total byte size. Fails on abstract types.
    pub fn datasize(&self) -> Result<i64, AccessError> {
        match self.access {
            Access::Concrete { datasize, .. } => Ok(datasize),
            Access::Abstract => Err(AccessError),
        }
    }

    /// Required alignment. Fails on abstract types.
    pub fn align(&self) -> Result<u16, AccessError> {
        match self.access {
            Access::Concrete { align, .. } => Ok(align),
            Access::Abstract => Err(AccessError),
        }
    }
}
