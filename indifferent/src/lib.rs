//! Mapping with indifferent key access.
//!
//! An [`IndifferentMap`] treats an interned [`Symbol`] key and its textual
//! rendering as the same key, so data built from user input, deserialized
//! configuration, or code can be queried with either notation.
//!
//! - **[`symbol`]**: process-global interner for atom-style identifiers.
//! - **[`value`]**: the closed [`Value`] model used for both keys and values.
//! - **[`convert`]**: pure key, value, and whole-mapping normalization.
//! - **[`map`]**: the [`IndifferentMap`] container itself.
//! - **[`access`]**: [`WithIndifferentAccess`], the entry point from plain
//!   mappings.
//!
//! ```
//! use indifferent::{IndifferentMap, Value, sym};
//!
//! let mut options = IndifferentMap::new();
//! options.set(sym("Port"), 3000);
//! assert_eq!(options.get("Port"), Some(&Value::Int(3000)));
//! ```

pub mod access;
pub mod convert;
pub mod error;
pub mod map;
pub mod symbol;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod value;

pub use access::WithIndifferentAccess;
pub use error::IndifferentError;
pub use map::IndifferentMap;
pub use symbol::{Symbol, sym};
pub use value::{Map, Value};
