//! The lazy optional chain node.
//!
//! This module provides [`LazyOptional<'a, T>`], an optional value whose
//! intermediate operations (`filter`, `map`, `flat_map`, `throw_if`, `or`,
//! `zip`) are deferred. Each intermediate operation returns a new node that
//! captures its predecessor; nothing runs until a terminal operation such as
//! [`LazyOptional::get`] forces the chain.
//!
//! # Laziness
//!
//! Compare with [`Option`], whose `map` runs its closure immediately:
//!
//! ```rust
//! use lazy_optional::LazyOptional;
//! use std::cell::Cell;
//!
//! let calls = Cell::new(0);
//! let chain = LazyOptional::of(20).map(|value| {
//!     calls.set(calls.get() + 1);
//!     value + 1
//! });
//! assert_eq!(calls.get(), 0);
//!
//! assert_eq!(chain.get().unwrap(), 21);
//! assert_eq!(calls.get(), 1);
//!
//! // No memoization: forcing again re-runs the whole chain.
//! assert_eq!(chain.get().unwrap(), 21);
//! assert_eq!(calls.get(), 2);
//! ```
//!
//! # Absence is a tag, not a value
//!
//! Any type can be wrapped, including ones that have their own "empty"
//! state:
//!
//! ```rust
//! use lazy_optional::LazyOptional;
//!
//! let chain = LazyOptional::of(None::<i32>);
//! assert!(chain.is_present().unwrap());
//! assert_eq!(chain.get().unwrap(), None);
//! ```

use std::error::Error;
use std::fmt;

use crate::error::LazyOptionalError;
use crate::thunk::{Outcome, Thunk};
use crate::trace::trace_raise;

/// An optional value whose intermediate operations are evaluated lazily.
///
/// A `LazyOptional` wraps exactly one [`Thunk`] and never changes it after
/// construction. Intermediate operations take `&self` and share the
/// predecessor's thunk with the new node, so a node can be reused as the
/// root of several chains.
///
/// # Type Parameters
///
/// * `'a` - The lifetime of everything the chain's closures borrow
/// * `T` - The type of the present value
///
/// # Thread Safety
///
/// This type is NOT thread-safe. Thunks are shared through `Rc`.
///
/// # Examples
///
/// ```rust
/// use lazy_optional::LazyOptional;
///
/// let result = LazyOptional::of(1)
///     .map(|value| value + 1)
///     .filter(|value| value % 2 == 0)
///     .flat_map(LazyOptional::of)
///     .or_else_throw();
///
/// assert_eq!(result.unwrap(), 2);
/// ```
pub struct LazyOptional<'a, T> {
    thunk: Thunk<'a, T>,
}

static_assertions::assert_not_impl_any!(LazyOptional<'static, i32>: Send, Sync);

// =============================================================================
// Factories
// =============================================================================

impl<'a, T> LazyOptional<'a, T> {
    /// Creates a `LazyOptional` backed by an existing thunk.
    #[inline]
    pub const fn from_thunk(thunk: Thunk<'a, T>) -> Self {
        Self { thunk }
    }

    /// Returns the thunk backing this node.
    #[inline]
    pub const fn thunk(&self) -> &Thunk<'a, T> {
        &self.thunk
    }

    #[inline]
    pub(crate) fn force(&self) -> Outcome<T> {
        self.thunk.force()
    }
}

impl<'a, T: 'a> LazyOptional<'a, T> {
    /// Creates an absent `LazyOptional`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_optional::LazyOptional;
    ///
    /// assert!(!LazyOptional::<i32>::empty().is_present().unwrap());
    /// ```
    #[inline]
    pub fn empty() -> Self {
        Self::from_thunk(Thunk::absent())
    }

    /// Creates a `LazyOptional` from a deferred computation.
    ///
    /// The computation runs each time a terminal operation forces the chain.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_optional::LazyOptional;
    /// use std::cell::Cell;
    ///
    /// let source = Cell::new(Some(1));
    /// let chain = LazyOptional::defer(|| Ok(source.get()));
    ///
    /// assert_eq!(chain.optional().unwrap(), Some(1));
    /// source.set(None);
    /// assert_eq!(chain.optional().unwrap(), None);
    /// ```
    #[inline]
    pub fn defer<F>(computation: F) -> Self
    where
        F: Fn() -> Outcome<T> + 'a,
    {
        Self::from_thunk(Thunk::new(computation))
    }
}

impl<'a, T: Clone + 'a> LazyOptional<'a, T> {
    /// Creates a present `LazyOptional` holding `value`.
    ///
    /// The value is cloned out on every evaluation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_optional::LazyOptional;
    ///
    /// assert_eq!(LazyOptional::of(1).get().unwrap(), 1);
    /// ```
    #[inline]
    pub fn of(value: T) -> Self {
        Self::from_thunk(Thunk::present(value))
    }

    /// Creates a present `LazyOptional`, rejecting an absent value at once.
    ///
    /// # Errors
    ///
    /// Returns [`LazyOptionalError::InvalidArgument`] when `value` is `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_optional::LazyOptional;
    ///
    /// assert!(LazyOptional::try_of(Some(1)).is_ok());
    /// assert!(LazyOptional::try_of(None::<i32>).unwrap_err().is_invalid_argument());
    /// ```
    pub fn try_of(value: Option<T>) -> Result<Self, LazyOptionalError> {
        value
            .map(Self::of)
            .ok_or_else(|| LazyOptionalError::invalid_argument("value"))
    }

    /// Creates a `LazyOptional` that is absent when `value` is `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_optional::LazyOptional;
    ///
    /// assert!(LazyOptional::of_nullable(Some(1)).is_present().unwrap());
    /// assert!(!LazyOptional::of_nullable(None::<i32>).is_present().unwrap());
    /// ```
    #[inline]
    pub fn of_nullable(value: Option<T>) -> Self {
        value.map_or_else(Self::empty, Self::of)
    }
}

// =============================================================================
// Intermediate Operations
// =============================================================================

impl<'a, T: 'a> LazyOptional<'a, T> {
    /// Keeps the value only if `predicate` holds for it.
    ///
    /// The predicate is called at evaluation time, and only for a present
    /// value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_optional::LazyOptional;
    ///
    /// assert!(LazyOptional::of(2).filter(|value| value % 2 == 0).is_present().unwrap());
    /// assert!(!LazyOptional::of(3).filter(|value| value % 2 == 0).is_present().unwrap());
    /// ```
    pub fn filter<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + 'a,
    {
        let previous = self.thunk.clone();
        Self::defer(move || Ok(previous.force()?.filter(|value| predicate(value))))
    }

    /// Keeps the value only if `predicate` returns `Ok(true)` for it.
    ///
    /// An `Err(error)` from `predicate` is carried to the terminal caller as
    /// [`LazyOptionalError::Raised`]. The predicate is never called for an
    /// absent chain.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_optional::LazyOptional;
    ///
    /// let chain = LazyOptional::of("7").try_filter(|text| text.parse::<i32>().map(|n| n > 5));
    /// assert_eq!(chain.get().unwrap(), "7");
    ///
    /// let chain = LazyOptional::of("x").try_filter(|text| text.parse::<i32>().map(|n| n > 5));
    /// assert!(chain.get().unwrap_err().is_raised());
    /// ```
    pub fn try_filter<E, P>(&self, predicate: P) -> Self
    where
        E: Error + Send + Sync + 'static,
        P: Fn(&T) -> Result<bool, E> + 'a,
    {
        let previous = self.thunk.clone();
        Self::defer(move || match previous.force()? {
            Some(value) => {
                let keep = predicate(&value).map_err(|error| raise("try_filter", error))?;
                Ok(keep.then_some(value))
            }
            None => Ok(None),
        })
    }

    /// Transforms a present value with `function`.
    ///
    /// An absent chain stays absent and `function` is never called. A panic
    /// inside `function` unwinds out of the terminal call that forced it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_optional::LazyOptional;
    ///
    /// assert_eq!(LazyOptional::of(21).map(|value| value * 2).get().unwrap(), 42);
    /// ```
    pub fn map<U, F>(&self, function: F) -> LazyOptional<'a, U>
    where
        U: 'a,
        F: Fn(T) -> U + 'a,
    {
        let previous = self.thunk.clone();
        LazyOptional::defer(move || Ok(previous.force()?.map(&function)))
    }

    /// Transforms a present value with a function that may raise.
    ///
    /// An `Err(error)` from `function` is carried to the terminal caller as
    /// [`LazyOptionalError::Raised`] holding `error` itself.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_optional::LazyOptional;
    ///
    /// let chain = LazyOptional::of("12").try_map(str::parse::<i32>);
    /// assert_eq!(chain.get().unwrap(), 12);
    ///
    /// let chain = LazyOptional::of("twelve").try_map(str::parse::<i32>);
    /// let error = chain.get().unwrap_err();
    /// assert!(error.downcast_ref::<std::num::ParseIntError>().is_some());
    /// ```
    pub fn try_map<U, E, F>(&self, function: F) -> LazyOptional<'a, U>
    where
        U: 'a,
        E: Error + Send + Sync + 'static,
        F: Fn(T) -> Result<U, E> + 'a,
    {
        let previous = self.thunk.clone();
        LazyOptional::defer(move || {
            previous
                .force()?
                .map(|value| function(value).map_err(|error| raise("try_map", error)))
                .transpose()
        })
    }

    /// Chains a computation that produces another `LazyOptional`.
    ///
    /// The inner node is built and forced only when the chain is evaluated,
    /// and its outcome becomes this node's outcome.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_optional::LazyOptional;
    ///
    /// let half = |value: i32| {
    ///     if value % 2 == 0 { LazyOptional::of(value / 2) } else { LazyOptional::empty() }
    /// };
    ///
    /// assert_eq!(LazyOptional::of(8).flat_map(half).get().unwrap(), 4);
    /// assert!(!LazyOptional::of(7).flat_map(half).is_present().unwrap());
    /// ```
    pub fn flat_map<U, F>(&self, function: F) -> LazyOptional<'a, U>
    where
        U: 'a,
        F: Fn(T) -> LazyOptional<'a, U> + 'a,
    {
        let previous = self.thunk.clone();
        LazyOptional::defer(move || match previous.force()? {
            Some(value) => function(value).force(),
            None => Ok(None),
        })
    }

    /// Chains a computation that may raise before producing another
    /// `LazyOptional`.
    pub fn try_flat_map<U, E, F>(&self, function: F) -> LazyOptional<'a, U>
    where
        U: 'a,
        E: Error + Send + Sync + 'static,
        F: Fn(T) -> Result<LazyOptional<'a, U>, E> + 'a,
    {
        let previous = self.thunk.clone();
        LazyOptional::defer(move || match previous.force()? {
            Some(value) => function(value)
                .map_err(|error| raise("try_flat_map", error))?
                .force(),
            None => Ok(None),
        })
    }

    /// Raises `error_supplier()` at evaluation time if `predicate` holds.
    ///
    /// The predicate sees the predecessor's outcome as `Option<&T>`, so it
    /// can fail the chain on a present value matching some condition, or on
    /// a chain that is still absent. When it does not hold the outcome passes
    /// through unchanged.
    ///
    /// Steps run in composition order, so in a chain of several `throw_if`
    /// calls the earliest one whose predicate holds wins.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_optional::{LazyOptional, NoValuePresentError};
    ///
    /// let chain = LazyOptional::<i32>::empty()
    ///     .throw_if(|value| value.is_none(), || NoValuePresentError);
    ///
    /// let error = chain.get().unwrap_err();
    /// assert!(error.is_raised());
    /// ```
    pub fn throw_if<P, E, S>(&self, predicate: P, error_supplier: S) -> Self
    where
        P: Fn(Option<&T>) -> bool + 'a,
        E: Error + Send + Sync + 'static,
        S: Fn() -> E + 'a,
    {
        let previous = self.thunk.clone();
        Self::defer(move || {
            let value = previous.force()?;
            if predicate(value.as_ref()) {
                Err(raise("throw_if", error_supplier()))
            } else {
                Ok(value)
            }
        })
    }

    /// Falls back to the node produced by `supplier` when this chain is absent.
    ///
    /// `supplier` is never called when the chain is present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_optional::LazyOptional;
    ///
    /// assert_eq!(LazyOptional::empty().or(|| LazyOptional::of(1)).get().unwrap(), 1);
    /// assert_eq!(LazyOptional::of(1).or(|| LazyOptional::of(2)).get().unwrap(), 1);
    /// ```
    pub fn or<S>(&self, supplier: S) -> Self
    where
        S: Fn() -> Self + 'a,
    {
        let previous = self.thunk.clone();
        Self::defer(move || match previous.force()? {
            Some(value) => Ok(Some(value)),
            None => supplier().force(),
        })
    }

    /// Combines this chain with `other` using `combiner`.
    ///
    /// See [`zip`] for the evaluation order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_optional::LazyOptional;
    ///
    /// let sum = LazyOptional::of(1).zip(&LazyOptional::of(2), |a, b| a + b);
    /// assert_eq!(sum.get().unwrap(), 3);
    /// ```
    pub fn zip<U, R, F>(&self, other: &LazyOptional<'a, U>, combiner: F) -> LazyOptional<'a, R>
    where
        U: 'a,
        R: 'a,
        F: Fn(T, U) -> R + 'a,
    {
        zip(self, other, combiner)
    }
}

/// Combines two chains into one holding `combiner(first, second)`.
///
/// At evaluation time `first` is forced, then `second`, even when `first`
/// turns out absent. The result is absent if either operand is. An error
/// raised while forcing `first` stops evaluation before `second` is forced.
///
/// # Examples
///
/// ```rust
/// use lazy_optional::{LazyOptional, zip};
///
/// let one = LazyOptional::of(1);
/// let two = LazyOptional::of(2);
/// let empty = LazyOptional::<i32>::empty();
///
/// assert_eq!(zip(&one, &two, |a, b| a + b).get().unwrap(), 3);
/// assert!(!zip(&one, &empty, |a, b| a + b).is_present().unwrap());
/// assert!(!zip(&empty, &empty, |a, b| a + b).is_present().unwrap());
/// ```
pub fn zip<'a, A, B, R, F>(
    first: &LazyOptional<'a, A>,
    second: &LazyOptional<'a, B>,
    combiner: F,
) -> LazyOptional<'a, R>
where
    A: 'a,
    B: 'a,
    R: 'a,
    F: Fn(A, B) -> R + 'a,
{
    let first = first.thunk.clone();
    let second = second.thunk.clone();
    LazyOptional::defer(move || {
        let value_a = first.force()?;
        let value_b = second.force()?;
        Ok(value_a
            .zip(value_b)
            .map(|(value_a, value_b)| combiner(value_a, value_b)))
    })
}

fn raise<E>(step: &'static str, error: E) -> LazyOptionalError
where
    E: Error + Send + Sync + 'static,
{
    trace_raise!(step, error);
    LazyOptionalError::raised(error)
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<T> Clone for LazyOptional<'_, T> {
    fn clone(&self) -> Self {
        Self {
            thunk: self.thunk.clone(),
        }
    }
}

impl<'a, T: 'a> Default for LazyOptional<'a, T> {
    /// Creates an absent `LazyOptional`.
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a, T: Clone + 'a> From<Option<T>> for LazyOptional<'a, T> {
    /// Converts an [`Option`], reading its presence now.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_optional::LazyOptional;
    ///
    /// assert_eq!(LazyOptional::from(Some(1)).optional().unwrap(), Some(1));
    /// assert_eq!(LazyOptional::from(None::<i32>).optional().unwrap(), None);
    /// ```
    fn from(option: Option<T>) -> Self {
        Self::of_nullable(option)
    }
}

impl<T> fmt::Debug for LazyOptional<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_tuple("LazyOptional")
            .field(&"<deferred>")
            .finish()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for LazyOptional<'_, T> {
    /// Forces the chain and serializes the outcome as an `Option<T>`.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::Error as _;
        let value = self.force().map_err(S::Error::custom)?;
        serde::Serialize::serialize(&value, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, 'a, T> serde::Deserialize<'de> for LazyOptional<'a, T>
where
    T: serde::Deserialize<'de> + Clone + 'a,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <Option<T> as serde::Deserialize<'de>>::deserialize(deserializer).map(Self::from)
    }
}
