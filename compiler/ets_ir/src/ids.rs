//! Arena handles.
//!
//! - `NodeId(u32)` instead of `Box<Node>`: 4 bytes, O(1) equality, and a
//!   node can be referenced weakly (parent links, provenance) without
//!   keeping anything alive.
//! - `NodeRange` for variable-arity children (args, statements, members).

use std::fmt;

/// Index of a node in its [`Ast`](crate::Ast).
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Sentinel for "no node": unset parents, unfilled children of a
    /// constructed shell.
    pub const INVALID: NodeId = NodeId(u32::MAX);

    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "NodeId({})", self.0)
        } else {
            write!(f, "NodeId::INVALID")
        }
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Range of node ids in the arena's flat child-list storage.
///
/// (start: u32, len: u16). A list is never mutated in place: rewriting a
/// list slot allocates a fresh range and the old one stays dead until
/// teardown.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct NodeRange {
    pub start: u32,
    pub len: u16,
}

impl NodeRange {
    pub const EMPTY: NodeRange = NodeRange { start: 0, len: 0 };

    #[inline]
    pub const fn new(start: u32, len: u16) -> Self {
        NodeRange { start, len }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }
}

impl fmt::Debug for NodeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NodeRange({}..{})",
            self.start,
            self.start + u32::from(self.len)
        )
    }
}

impl Default for NodeRange {
    fn default() -> Self {
        Self::EMPTY
    }
}

macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn new(raw: u32) -> Self {
                $name(raw)
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

define_handle!(
    /// Owned scope record in the arena. Present on scope-bearing nodes only.
    ScopeId
);

define_handle!(
    /// Binder-side variable. The arena never dereferences it.
    VariableId
);

define_handle!(
    /// Type handle in a checker's type universe.
    ///
    /// Opaque to this crate: the TS and ETS checkers each hand out their own
    /// `TypeRef`s and nodes keep one slot per checker.
    TypeRef
);

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{NodeId, NodeRange};
    crate::static_assert_size!(NodeId, 4);
    crate::static_assert_size!(NodeRange, 8);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_sentinel() {
        assert!(!NodeId::INVALID.is_valid());
        assert!(NodeId::new(0).is_valid());
        assert_eq!(NodeId::default(), NodeId::INVALID);
        assert_eq!(format!("{:?}", NodeId::new(7)), "NodeId(7)");
        assert_eq!(format!("{:?}", NodeId::INVALID), "NodeId::INVALID");
    }

    #[test]
    fn node_range_debug() {
        let range = NodeRange::new(4, 3);
        assert_eq!(range.len(), 3);
        assert!(!range.is_empty());
        assert_eq!(format!("{range:?}"), "NodeRange(4..7)");
        assert!(NodeRange::EMPTY.is_empty());
    }

    #[test]
    fn handle_debug() {
        assert_eq!(format!("{:?}", TypeRef::new(3)), "TypeRef(3)");
        assert_eq!(ScopeId::new(2).index(), 2);
    }
}
