//! # lazy-optional
//!
//! An optional value whose intermediate operations are deferred.
//!
//! ## Overview
//!
//! [`Option::map`] runs its closure the moment it is called. A
//! [`LazyOptional`] instead records each `filter`, `map`, `flat_map`,
//! `throw_if`, `or` and `zip` step as a suspended computation, and only a
//! terminal operation (`get`, `or_else`, `is_present`, `optional`, ...)
//! forces the chain. Nothing is memoized: every terminal call re-runs the
//! whole chain.
//!
//! - **Thunks**: [`Thunk`] is the deferred computation every node wraps
//! - **Chain nodes**: [`LazyOptional`] factories and intermediate operations
//! - **Terminal operations**: force the chain and produce a concrete result
//! - **Errors**: chain steps may raise any error type; it reaches the
//!   terminal caller unchanged inside [`LazyOptionalError::Raised`]
//!
//! ## Feature Flags
//!
//! - `tracing` (default): emit `tracing` events on evaluation and raise
//! - `serde`: `Serialize`/`Deserialize` through `Option<T>`
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use lazy_optional::prelude::*;
//! use std::fmt;
//!
//! #[derive(Debug)]
//! struct Overflow(i32);
//!
//! impl fmt::Display for Overflow {
//!     fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         write!(formatter, "{} overflows", self.0)
//!     }
//! }
//!
//! impl std::error::Error for Overflow {}
//!
//! let chain = LazyOptional::of(1)
//!     .throw_if(|value| value < Some(&1), || Overflow(0))
//!     .map(|value| value + 1)
//!     .throw_if(|value| value >= Some(&2), || Overflow(2));
//!
//! // Building the chain ran nothing; forcing it raises the second check.
//! let error = chain.get().unwrap_err();
//! assert_eq!(error.to_string(), "2 overflows");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use lazy_optional::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::*;
    pub use crate::optional::*;
    pub use crate::terminal::*;
    pub use crate::thunk::*;
}

mod error;
mod optional;
mod terminal;
mod thunk;
mod trace;

pub use error::{InvalidArgumentError, LazyOptionalError, NoValuePresentError, RaisedError};
pub use optional::{LazyOptional, zip};
pub use terminal::Stream;
pub use thunk::{Outcome, Thunk};
