//! Deferred computations yielding a present or absent value.
//!
//! A [`Thunk`] is the leaf primitive every [`LazyOptional`](crate::LazyOptional)
//! is built on. It wraps a zero-argument closure that, when forced, produces an
//! [`Outcome`]: either a present value, an absent value, or an error raised by
//! the computation.
//!
//! Thunks are not memoized. Forcing a thunk twice runs its closure twice,
//! repeating every side effect and re-raising every error.
//!
//! # Examples
//!
//! ```rust
//! use lazy_optional::Thunk;
//! use std::cell::Cell;
//!
//! let runs = Cell::new(0);
//! let thunk = Thunk::new(|| {
//!     runs.set(runs.get() + 1);
//!     Ok(Some(42))
//! });
//!
//! assert_eq!(runs.get(), 0);
//! assert_eq!(thunk.force().unwrap(), Some(42));
//! assert_eq!(thunk.force().unwrap(), Some(42));
//! assert_eq!(runs.get(), 2);
//! ```

use std::fmt;
use std::rc::Rc;

use crate::error::LazyOptionalError;

/// The result of forcing a [`Thunk`].
///
/// - `Ok(Some(value))`: the value is present
/// - `Ok(None)`: the value is absent
/// - `Err(error)`: a step of the computation raised `error`
pub type Outcome<T> = Result<Option<T>, LazyOptionalError>;

/// A shared, re-runnable deferred computation producing an [`Outcome`].
///
/// Cloning a thunk shares the underlying closure; it does not copy or run it.
///
/// # Type Parameters
///
/// * `'a` - The lifetime of everything the closure borrows
/// * `T` - The type of the present value
pub struct Thunk<'a, T> {
    computation: Rc<dyn Fn() -> Outcome<T> + 'a>,
}

impl<'a, T> Thunk<'a, T> {
    /// Creates a thunk from a closure. The closure is not called.
    #[inline]
    pub fn new<F>(computation: F) -> Self
    where
        F: Fn() -> Outcome<T> + 'a,
    {
        Self {
            computation: Rc::new(computation),
        }
    }

    /// Creates a thunk that always yields an absent value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_optional::Thunk;
    ///
    /// let thunk = Thunk::<i32>::absent();
    /// assert_eq!(thunk.force().unwrap(), None);
    /// ```
    #[inline]
    pub fn absent() -> Self
    where
        T: 'a,
    {
        Self::new(|| Ok(None))
    }

    /// Runs the computation and returns its outcome.
    ///
    /// # Errors
    ///
    /// Returns whatever error the computation raises on this run.
    #[inline]
    pub fn force(&self) -> Outcome<T> {
        (self.computation)()
    }
}

impl<'a, T: Clone + 'a> Thunk<'a, T> {
    /// Creates a thunk that yields a clone of `value` on every run.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_optional::Thunk;
    ///
    /// let thunk = Thunk::present("hello".to_string());
    /// assert_eq!(thunk.force().unwrap().as_deref(), Some("hello"));
    /// ```
    #[inline]
    pub fn present(value: T) -> Self {
        Self::new(move || Ok(Some(value.clone())))
    }
}

impl<T> Clone for Thunk<'_, T> {
    fn clone(&self) -> Self {
        Self {
            computation: Rc::clone(&self.computation),
        }
    }
}

impl<T> fmt::Debug for Thunk<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("Thunk").field(&"<deferred>").finish()
    }
}
