//! Terminal operations.
//!
//! Every operation here forces the chain exactly once per call and never
//! caches the result. Errors raised by chain steps come back unchanged in
//! the `Err` arm.

use std::error::Error;
use std::iter::FusedIterator;

use crate::error::LazyOptionalError;
use crate::optional::LazyOptional;
use crate::trace::{trace_evaluation, trace_raise};

impl<'a, T: 'a> LazyOptional<'a, T> {
    fn evaluate(&self, operation: &'static str) -> Result<Option<T>, LazyOptionalError> {
        let value = self.force()?;
        trace_evaluation!(operation, value.is_some());
        Ok(value)
    }

    /// Forces the chain and returns the outcome as an [`Option`].
    ///
    /// # Errors
    ///
    /// Returns the error raised by any step of the chain.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_optional::LazyOptional;
    ///
    /// assert_eq!(LazyOptional::of(1).optional().unwrap(), Some(1));
    /// assert_eq!(LazyOptional::<i32>::empty().optional().unwrap(), None);
    /// ```
    pub fn optional(&self) -> Result<Option<T>, LazyOptionalError> {
        self.evaluate("optional")
    }

    /// Forces the chain and returns a sequence of zero or one elements.
    ///
    /// # Errors
    ///
    /// Returns the error raised by any step of the chain.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_optional::LazyOptional;
    ///
    /// assert_eq!(LazyOptional::of(1).stream().unwrap().count(), 1);
    /// assert_eq!(LazyOptional::<i32>::empty().stream().unwrap().count(), 0);
    /// ```
    pub fn stream(&self) -> Result<Stream<T>, LazyOptionalError> {
        self.evaluate("stream").map(Stream::new)
    }

    /// Returns the value, or `fallback` when the chain is absent.
    ///
    /// # Errors
    ///
    /// Returns the error raised by any step of the chain.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_optional::LazyOptional;
    ///
    /// assert_eq!(LazyOptional::empty().or_else(7).unwrap(), 7);
    /// ```
    pub fn or_else(&self, fallback: T) -> Result<T, LazyOptionalError> {
        Ok(self.evaluate("or_else")?.unwrap_or(fallback))
    }

    /// Returns the value, or the result of `fallback` when the chain is absent.
    ///
    /// `fallback` is only called for an absent chain.
    ///
    /// # Errors
    ///
    /// Returns the error raised by any step of the chain.
    pub fn or_else_get<F>(&self, fallback: F) -> Result<T, LazyOptionalError>
    where
        F: FnOnce() -> T,
    {
        Ok(self.evaluate("or_else_get")?.unwrap_or_else(fallback))
    }

    /// Returns the value, failing with "no value present" when absent.
    ///
    /// # Errors
    ///
    /// Returns [`LazyOptionalError::NoValuePresent`] for an absent chain, or
    /// the error raised by any step of the chain.
    pub fn or_else_throw(&self) -> Result<T, LazyOptionalError> {
        self.evaluate("or_else_throw")?
            .ok_or_else(LazyOptionalError::no_value_present)
    }

    /// Returns the value, failing with `error_supplier()` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`LazyOptionalError::Raised`] holding the supplied error for an
    /// absent chain, or the error raised by any step of the chain.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_optional::LazyOptional;
    /// use std::fmt;
    ///
    /// #[derive(Debug)]
    /// struct Missing;
    ///
    /// impl fmt::Display for Missing {
    ///     fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
    ///         formatter.write_str("missing")
    ///     }
    /// }
    ///
    /// impl std::error::Error for Missing {}
    ///
    /// let error = LazyOptional::<i32>::empty().or_else_throw_with(|| Missing).unwrap_err();
    /// assert!(error.downcast_ref::<Missing>().is_some());
    /// ```
    pub fn or_else_throw_with<E, S>(&self, error_supplier: S) -> Result<T, LazyOptionalError>
    where
        E: Error + Send + Sync + 'static,
        S: FnOnce() -> E,
    {
        self.evaluate("or_else_throw_with")?.ok_or_else(|| {
            let error = error_supplier();
            trace_raise!("or_else_throw_with", error);
            LazyOptionalError::raised(error)
        })
    }

    /// Returns the value, failing with "no value present" when absent.
    ///
    /// Alias for [`LazyOptional::or_else_throw`].
    ///
    /// # Errors
    ///
    /// Returns [`LazyOptionalError::NoValuePresent`] for an absent chain, or
    /// the error raised by any step of the chain.
    #[inline]
    pub fn get(&self) -> Result<T, LazyOptionalError> {
        self.or_else_throw()
    }

    /// Returns whether the chain evaluates to a present value.
    ///
    /// # Errors
    ///
    /// Returns the error raised by any step of the chain.
    pub fn is_present(&self) -> Result<bool, LazyOptionalError> {
        Ok(self.evaluate("is_present")?.is_some())
    }

    /// Calls `action` with the value if the chain is present.
    ///
    /// # Errors
    ///
    /// Returns the error raised by any step of the chain; `action` is not
    /// called in that case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_optional::LazyOptional;
    ///
    /// let mut seen = Vec::new();
    /// LazyOptional::of(1).if_present(|value| seen.push(value)).unwrap();
    /// LazyOptional::empty().if_present(|value| seen.push(value)).unwrap();
    /// assert_eq!(seen, vec![1]);
    /// ```
    pub fn if_present<F>(&self, action: F) -> Result<(), LazyOptionalError>
    where
        F: FnOnce(T),
    {
        if let Some(value) = self.evaluate("if_present")? {
            action(value);
        }
        Ok(())
    }

    /// Calls exactly one of `action` (with the value) or `empty_action`.
    ///
    /// # Errors
    ///
    /// Returns the error raised by any step of the chain; neither callback
    /// is called in that case.
    pub fn if_present_or_else<F, G>(&self, action: F, empty_action: G) -> Result<(), LazyOptionalError>
    where
        F: FnOnce(T),
        G: FnOnce(),
    {
        match self.evaluate("if_present_or_else")? {
            Some(value) => action(value),
            None => empty_action(),
        }
        Ok(())
    }
}

// =============================================================================
// Stream
// =============================================================================

/// A sequence of at most one element produced by [`LazyOptional::stream`].
///
/// The sequence holds the already evaluated value. Calling `stream()` again
/// re-runs the chain and yields a fresh sequence.
#[derive(Debug, Clone)]
pub struct Stream<T> {
    inner: std::option::IntoIter<T>,
}

impl<T> Stream<T> {
    fn new(value: Option<T>) -> Self {
        Self {
            inner: value.into_iter(),
        }
    }
}

impl<T> Iterator for Stream<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Stream<T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Stream<T> {}

impl<T> FusedIterator for Stream<T> {}
