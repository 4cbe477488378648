//! Interned atom-style identifiers.
//!
//! A [`Symbol`] is a small copyable handle into a process-global name table.
//! Two symbols are equal exactly when they were interned from the same text,
//! and [`Symbol::as_str`] renders the text back. Interned names are never
//! freed.

use std::fmt;
use std::hash::BuildHasherDefault;
use std::sync::{Mutex, OnceLock, PoisonError};

use indexmap::IndexSet;
use rustc_hash::FxHasher;

type NameSet = IndexSet<&'static str, BuildHasherDefault<FxHasher>>;

static NAMES: OnceLock<Mutex<NameSet>> = OnceLock::new();

fn names() -> &'static Mutex<NameSet> {
    NAMES.get_or_init(|| Mutex::new(NameSet::default()))
}

/// Interned identifier, rendered as `:name`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol(u32);

impl Symbol {
    /// Return the symbol for `name`, interning it on first use.
    pub fn intern(name: &str) -> Self {
        let mut table = names().lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(index) = table.get_index_of(name) {
            return Symbol(index as u32);
        }
        let leaked: &'static str = Box::leak(name.to_owned().into_boxed_str());
        let (index, _) = table.insert_full(leaked);
        Symbol(index as u32)
    }

    /// Textual rendering of the symbol (without the leading `:`).
    pub fn as_str(self) -> &'static str {
        let table = names().lock().unwrap_or_else(PoisonError::into_inner);
        // Indices are only handed out by `intern`, and the table never shrinks.
        table.get_index(self.0 as usize).copied().unwrap_or_default()
    }
}

/// Shorthand for [`Symbol::intern`].
pub fn sym(name: &str) -> Symbol {
    Symbol::intern(name)
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
