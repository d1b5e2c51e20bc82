//! Interned identifiers.
//!
//! The interner is owned by the [`Ast`](crate::Ast) it serves, so two
//! compilation units never share name tables or counters.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::AllocError;

/// Interned string identifier, valid for the interner that produced it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Pre-interned empty string.
    pub const EMPTY: Name = Name(0);

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Single-threaded string interner.
pub struct Interner {
    map: FxHashMap<Box<str>, Name>,
    strings: Vec<Box<str>>,
}

impl Interner {
    pub fn new() -> Self {
        let mut interner = Interner {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(64),
        };
        interner.strings.push("".into());
        interner.map.insert("".into(), Name::EMPTY);
        interner
    }

    /// Intern a string, returning the existing name if already present.
    ///
    /// # Errors
    /// Fails once the table holds `u32::MAX` distinct strings.
    pub fn intern(&mut self, s: &str) -> Result<Name, AllocError> {
        if let Some(&name) = self.map.get(s) {
            return Ok(name);
        }
        let name = name_index(self.strings.len()).map(Name)?;
        self.strings.push(s.into());
        self.map.insert(s.into(), name);
        Ok(name)
    }

    /// Look up an existing name without interning.
    pub fn get(&self, s: &str) -> Option<Name> {
        self.map.get(s).copied()
    }

    /// Resolve a name back to its text.
    pub fn lookup(&self, name: Name) -> &str {
        &self.strings[name.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.len() <= 1
    }
}

fn name_index(len: usize) -> Result<u32, AllocError> {
    u32::try_from(len).map_err(|_| AllocError::IndexOverflow {
        what: "name",
        index: len,
    })
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Interner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interner")
            .field("len", &self.strings.len())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn intern_is_idempotent() {
        let mut interner = Interner::new();
        let a = interner.intern("foo").unwrap();
        let b = interner.intern("foo").unwrap();
        let c = interner.intern("bar").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(interner.lookup(a), "foo");
        assert_eq!(interner.get("bar"), Some(c));
        assert_eq!(interner.get("baz"), None);
    }

    #[test]
    fn empty_is_preinterned() {
        let mut interner = Interner::new();
        assert!(interner.is_empty());
        assert_eq!(interner.intern(""), Ok(Name::EMPTY));
        assert_eq!(interner.lookup(Name::EMPTY), "");
    }

    #[test]
    fn full_table_reports_overflow() {
        let past = u32::MAX as usize + 1;
        assert_eq!(
            name_index(past),
            Err(AllocError::IndexOverflow {
                what: "name",
                index: past,
            })
        );
        assert_eq!(name_index(7), Ok(7));
    }
}
