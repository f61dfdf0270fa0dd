use bitflags::bitflags;

bitflags! {
    /// Per-node property flags.
    ///
    /// Flags are computed once at construction and cached on the node, so
    /// queries like "does this subtree contain an option type" never
    /// require a traversal.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
    pub struct TypeFlags: u8 {
        /// This node itself is an option type (`?t`).
        const OPTION = 1;
        /// Some strict descendant is an option type.
        const SUBTREE_OPTION = 1 << 1;
        /// Explicit little-endian byte order.
        const LITTLE_ENDIAN = 1 << 2;
        /// Explicit big-endian byte order.
        const BIG_ENDIAN = 1 << 3;
        /// This node is, or contains, an ellipsis dimension.
        const ELLIPSIS = 1 << 4;
    }
}

impl TypeFlags {
    /// The flags a parent inherits from one of its children.
    ///
    /// A child's `OPTION` demotes to `SUBTREE_OPTION` on the parent;
    /// `ELLIPSIS` passes through unchanged. Endianness never propagates.
    pub fn subtree(self) -> TypeFlags {
        let mut out = TypeFlags::empty();
        if self.intersects(TypeFlags::OPTION | TypeFlags::SUBTREE_OPTION) {
            out |= TypeFlags::SUBTREE_OPTION;
        }
        if self.contains(TypeFlags::ELLIPSIS) {
            out |= TypeFlags::ELLIPSIS;
        }
        out
    }
}

/// Explicit byte order for fixed-width scalars.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Endian {
    Little,
    Big,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_demotes_to_subtree_option() {
        let child = TypeFlags::OPTION | TypeFlags::LITTLE_ENDIAN;
        assert_eq!(child.subtree(), TypeFlags::SUBTREE_OPTION);
    }

    #[test]
    fn ellipsis_passes_through() {
        let child = TypeFlags::ELLIPSIS | TypeFlags::SUBTREE_OPTION;
        assert_eq!(
            child.subtree(),
            TypeFlags::SUBTREE_OPTION | TypeFlags::ELLIPSIS
        );
    }
}
