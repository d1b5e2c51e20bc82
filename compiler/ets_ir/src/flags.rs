//! Node flag sets.
//!
//! - `ModifierFlags`: source-level modifiers (`export`, `static`, ...)
//! - `AstNodeFlags`: bookkeeping set by the frontend itself
//! - `BoxingUnboxingFlags`: coercions attached by the ETS checker

use bitflags::bitflags;

bitflags! {
    /// Declaration modifiers as written in source.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ModifierFlags: u32 {
        const STATIC = 1 << 0;
        const ASYNC = 1 << 1;
        const PUBLIC = 1 << 2;
        const PROTECTED = 1 << 3;
        const PRIVATE = 1 << 4;
        const DECLARE = 1 << 5;
        const READONLY = 1 << 6;
        const OPTIONAL = 1 << 7;
        const DEFINITE = 1 << 8;
        const ABSTRACT = 1 << 9;
        const CONST = 1 << 10;
        const FINAL = 1 << 11;
        const NATIVE = 1 << 12;
        const OVERRIDE = 1 << 13;
        const CONSTRUCTOR = 1 << 14;
        const GETTER = 1 << 15;
        const SETTER = 1 << 16;
        const INTERNAL = 1 << 17;
        const EXPORT = 1 << 18;
        const DEFAULT_EXPORT = 1 << 19;
        const EXPORT_TYPE = 1 << 20;

        const ACCESS = Self::PUBLIC.bits() | Self::PROTECTED.bits() | Self::PRIVATE.bits();
        const EXPORTED = Self::EXPORT.bits() | Self::DEFAULT_EXPORT.bits() | Self::EXPORT_TYPE.bits();
    }
}

bitflags! {
    /// Frontend bookkeeping on a node.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct AstNodeFlags: u16 {
        /// Exported under a different name (`export { a as b }`).
        const HAS_EXPORT_ALIAS = 1 << 0;
        /// Created by a rewrite, not by the parser.
        const SYNTHETIC = 1 << 1;
        /// Codegen must emit a checked cast.
        const CHECK_CAST = 1 << 2;
        /// Enum access that needs `valueOf()`.
        const GENERATE_VALUE_OF = 1 << 3;
        /// Excluded from optimisation.
        const NO_OPT = 1 << 4;
        /// Parser recovered at this node.
        const RECOVERED = 1 << 5;
    }
}

bitflags! {
    /// Boxing and unboxing coercions attached by the ETS checker.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct BoxingUnboxingFlags: u32 {
        const BOX_TO_BOOLEAN = 1 << 0;
        const BOX_TO_BYTE = 1 << 1;
        const BOX_TO_SHORT = 1 << 2;
        const BOX_TO_CHAR = 1 << 3;
        const BOX_TO_INT = 1 << 4;
        const BOX_TO_LONG = 1 << 5;
        const BOX_TO_FLOAT = 1 << 6;
        const BOX_TO_DOUBLE = 1 << 7;
        const UNBOX_TO_BOOLEAN = 1 << 8;
        const UNBOX_TO_BYTE = 1 << 9;
        const UNBOX_TO_SHORT = 1 << 10;
        const UNBOX_TO_CHAR = 1 << 11;
        const UNBOX_TO_INT = 1 << 12;
        const UNBOX_TO_LONG = 1 << 13;
        const UNBOX_TO_FLOAT = 1 << 14;
        const UNBOX_TO_DOUBLE = 1 << 15;

        const BOXING = 0x00FF;
        const UNBOXING = 0xFF00;
    }
}

impl ModifierFlags {
    /// Any export form.
    #[inline]
    pub fn is_exported(self) -> bool {
        self.intersects(Self::EXPORTED)
    }

    /// Source keyword for the access modifier, if one is set.
    pub fn access_keyword(self) -> Option<&'static str> {
        if self.contains(Self::PRIVATE) {
            Some("private")
        } else if self.contains(Self::PROTECTED) {
            Some("protected")
        } else if self.contains(Self::PUBLIC) {
            Some("public")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_forms() {
        assert!(ModifierFlags::EXPORT.is_exported());
        assert!(ModifierFlags::DEFAULT_EXPORT.is_exported());
        assert!(!(ModifierFlags::STATIC | ModifierFlags::DECLARE).is_exported());
    }

    #[test]
    fn access_keyword_prefers_most_restrictive() {
        let flags = ModifierFlags::PUBLIC | ModifierFlags::PRIVATE;
        assert_eq!(flags.access_keyword(), Some("private"));
        assert_eq!(ModifierFlags::STATIC.access_keyword(), None);
    }

    #[test]
    fn boxing_groups() {
        assert!(BoxingUnboxingFlags::BOXING.contains(BoxingUnboxingFlags::BOX_TO_INT));
        assert!(BoxingUnboxingFlags::UNBOXING.contains(BoxingUnboxingFlags::UNBOX_TO_DOUBLE));
        assert!(!BoxingUnboxingFlags::BOXING.intersects(BoxingUnboxingFlags::UNBOXING));
    }
}
