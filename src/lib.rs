//! # fluentseq
//!
//! A fluent, ordered key-value collection library for Rust providing
//! chainable sequence transformations.
//!
//! ## Overview
//!
//! The central type is [`Collection`], an ordered associative container
//! whose keys are unique and whose insertion order is preserved and
//! observable. Collections are built either from plain values (keys are
//! assigned sequentially from zero) or from explicit key-value pairs.
//!
//! Every transformation method (`map`, `filter`, `group_by`, `chunk`, ...)
//! returns a *new* collection and leaves the receiver untouched, so long
//! fluent chains are always safe. The only destructive operations are
//! [`push`](collection::Collection::push) and
//! [`pop`](collection::Collection::pop).
//!
//! ## Example
//!
//! ```rust
//! use fluentseq::prelude::*;
//!
//! let doubled = Collection::from_values([22, 21, 27]).map(|value| value * 2);
//! assert_eq!(doubled.values().copied().collect::<Vec<_>>(), vec![44, 42, 54]);
//!
//! let scores = Collection::from_pairs([("Budi", 100), ("Eko", 65), ("Joko", 90)]);
//! let passing = scores.filter(|_, score| *score >= 90);
//! assert_eq!(passing.all(), vec![("Budi", 100), ("Joko", 90)]);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` implementations for [`Collection`]

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use fluentseq::prelude::*;
/// ```
pub mod prelude {
    pub use crate::collection::{Collection, FieldAccess};
    pub use crate::error::{EmptyCollectionError, LengthMismatchError};
}

pub mod collection;
pub mod error;

pub use collection::Collection;
