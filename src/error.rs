//! Error types for lazy optional chains.
//!
//! Construction of a chain never fails, with one exception: the fail-fast
//! factory [`LazyOptional::try_of`](crate::LazyOptional::try_of) rejects an
//! absent value immediately. Everything else surfaces only when a terminal
//! operation forces the chain:
//!
//! - [`NoValuePresentError`]: the default failure of `get()` and
//!   `or_else_throw()` on an absent chain.
//! - [`RaisedError`]: any error produced by a chain step (`try_filter`,
//!   `try_map`, `try_flat_map`, `throw_if`) or by an `or_else_throw_with`
//!   supplier. The
//!   payload is carried as-is and can be downcast back to its concrete type.
//!
//! # Examples
//!
//! ```rust
//! use lazy_optional::{LazyOptional, LazyOptionalError};
//!
//! #[derive(Debug, PartialEq)]
//! struct TooSmall(i32);
//!
//! impl std::fmt::Display for TooSmall {
//!     fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         write!(formatter, "{} is too small", self.0)
//!     }
//! }
//!
//! impl std::error::Error for TooSmall {}
//!
//! let chain = LazyOptional::of(1).throw_if(|value| value < Some(&10), || TooSmall(1));
//! let error = chain.get().unwrap_err();
//!
//! assert_eq!(error.downcast_ref::<TooSmall>(), Some(&TooSmall(1)));
//! assert_eq!(error.to_string(), "1 is too small");
//! ```

use std::error::Error;
use std::fmt;

/// Raised by a terminal operation that needs a value when the chain is absent.
///
/// # Examples
///
/// ```rust
/// use lazy_optional::NoValuePresentError;
///
/// assert_eq!(NoValuePresentError.to_string(), "No value present");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoValuePresentError;

impl fmt::Display for NoValuePresentError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("No value present")
    }
}

impl Error for NoValuePresentError {}

/// Raised at construction time when a factory that requires a value is
/// handed an absent one.
///
/// # Examples
///
/// ```rust
/// use lazy_optional::InvalidArgumentError;
///
/// let error = InvalidArgumentError { parameter: "value" };
/// assert_eq!(
///     error.to_string(),
///     "invalid argument: 'value' must not be absent"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidArgumentError {
    /// The name of the rejected parameter.
    pub parameter: &'static str,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "invalid argument: '{}' must not be absent",
            self.parameter
        )
    }
}

impl Error for InvalidArgumentError {}

/// An arbitrary error raised from inside a chain step.
///
/// The chain does not know the concrete type of the error at construction
/// time, so it is carried behind a trait object. It is never rewrapped:
/// [`RaisedError::downcast`] hands back the exact value the step produced.
///
/// `Display` and `source()` both forward to the payload, so the payload does
/// not appear a second time in a reported error chain.
///
/// Raised errors must be `Send + Sync + 'static`, even though chains
/// themselves are not `Send`. This keeps [`LazyOptionalError`] `Send + Sync`
/// so it can leave the thread that evaluated the chain and convert into
/// `Box<dyn Error + Send + Sync>`. An error holding an `Rc` or other
/// thread-local data cannot be raised as is; convert it into an owned
/// error first.
pub struct RaisedError {
    inner: Box<dyn Error + Send + Sync + 'static>,
}

static_assertions::assert_impl_all!(LazyOptionalError: Send, Sync);

impl RaisedError {
    /// Wraps a concrete error.
    pub fn new<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            inner: Box::new(error),
        }
    }

    /// Returns `true` if the raised payload is of type `E`.
    pub fn is<E>(&self) -> bool
    where
        E: Error + 'static,
    {
        self.inner.is::<E>()
    }

    /// Returns a reference to the payload if it is of type `E`.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: Error + 'static,
    {
        self.inner.downcast_ref::<E>()
    }

    /// Recovers the payload as `E`, or gives `self` back unchanged.
    ///
    /// # Errors
    ///
    /// Returns `Err(self)` when the payload is not an `E`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_optional::{NoValuePresentError, RaisedError};
    ///
    /// let raised = RaisedError::new(NoValuePresentError);
    /// assert_eq!(raised.downcast::<NoValuePresentError>().ok(), Some(NoValuePresentError));
    /// ```
    pub fn downcast<E>(self) -> Result<E, Self>
    where
        E: Error + 'static,
    {
        match self.inner.downcast::<E>() {
            Ok(error) => Ok(*error),
            Err(inner) => Err(Self { inner }),
        }
    }

    /// Returns the boxed payload.
    pub fn into_inner(self) -> Box<dyn Error + Send + Sync + 'static> {
        self.inner
    }
}

impl fmt::Debug for RaisedError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, formatter)
    }
}

impl fmt::Display for RaisedError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, formatter)
    }
}

impl Error for RaisedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.inner.source()
    }
}

/// Every failure a lazy optional chain can report.
///
/// # Examples
///
/// ```rust
/// use lazy_optional::{LazyOptional, LazyOptionalError};
///
/// let error = LazyOptional::<i32>::empty().get().unwrap_err();
/// assert!(error.is_no_value_present());
///
/// let error = LazyOptional::try_of(None::<i32>).unwrap_err();
/// assert!(error.is_invalid_argument());
/// ```
#[derive(Debug)]
pub enum LazyOptionalError {
    /// A terminal operation required a value but the chain was absent.
    NoValuePresent(NoValuePresentError),
    /// A factory was handed an absent value where one is required.
    InvalidArgument(InvalidArgumentError),
    /// A chain step or error supplier raised its own error.
    Raised(RaisedError),
}

impl LazyOptionalError {
    /// Builds the default "no value present" error.
    pub const fn no_value_present() -> Self {
        Self::NoValuePresent(NoValuePresentError)
    }

    /// Builds an invalid-argument error for `parameter`.
    pub const fn invalid_argument(parameter: &'static str) -> Self {
        Self::InvalidArgument(InvalidArgumentError { parameter })
    }

    /// Wraps a user error raised from a chain step.
    pub fn raised<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::Raised(RaisedError::new(error))
    }

    /// Returns `true` for [`LazyOptionalError::NoValuePresent`].
    pub const fn is_no_value_present(&self) -> bool {
        matches!(self, Self::NoValuePresent(_))
    }

    /// Returns `true` for [`LazyOptionalError::InvalidArgument`].
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Returns `true` for [`LazyOptionalError::Raised`].
    pub const fn is_raised(&self) -> bool {
        matches!(self, Self::Raised(_))
    }

    /// Returns a reference to a raised payload of type `E`.
    ///
    /// Always `None` for the built-in variants.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: Error + 'static,
    {
        match self {
            Self::Raised(raised) => raised.downcast_ref::<E>(),
            Self::NoValuePresent(_) | Self::InvalidArgument(_) => None,
        }
    }

    /// Recovers a raised payload of type `E`.
    ///
    /// # Errors
    ///
    /// Returns `Err(self)` for the built-in variants or when the payload is
    /// not an `E`.
    pub fn downcast<E>(self) -> Result<E, Self>
    where
        E: Error + 'static,
    {
        match self {
            Self::Raised(raised) => raised.downcast::<E>().map_err(Self::Raised),
            other => Err(other),
        }
    }
}

impl fmt::Display for LazyOptionalError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoValuePresent(error) => write!(formatter, "{error}"),
            Self::InvalidArgument(error) => write!(formatter, "{error}"),
            Self::Raised(error) => write!(formatter, "{error}"),
        }
    }
}

impl Error for LazyOptionalError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NoValuePresent(_) | Self::InvalidArgument(_) => None,
            Self::Raised(raised) => raised.source(),
        }
    }
}

impl From<NoValuePresentError> for LazyOptionalError {
    fn from(error: NoValuePresentError) -> Self {
        Self::NoValuePresent(error)
    }
}

impl From<InvalidArgumentError> for LazyOptionalError {
    fn from(error: InvalidArgumentError) -> Self {
        Self::InvalidArgument(error)
    }
}

impl From<RaisedError> for LazyOptionalError {
    fn from(error: RaisedError) -> Self {
        Self::Raised(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Boom(&'static str);

    impl fmt::Display for Boom {
        fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "boom: {}", self.0)
        }
    }

    impl Error for Boom {}

    #[rstest]
    fn test_no_value_present_display() {
        assert_eq!(
            format!("{}", LazyOptionalError::no_value_present()),
            "No value present"
        );
    }

    #[rstest]
    fn test_invalid_argument_display() {
        assert_eq!(
            format!("{}", LazyOptionalError::invalid_argument("value")),
            "invalid argument: 'value' must not be absent"
        );
    }

    #[rstest]
    fn test_raised_display_is_verbatim() {
        let error = LazyOptionalError::raised(Boom("left"));
        assert_eq!(format!("{error}"), "boom: left");
    }

    #[rstest]
    fn test_raised_downcast_returns_same_payload() {
        let error = LazyOptionalError::raised(Boom("payload"));
        assert_eq!(error.downcast::<Boom>().ok(), Some(Boom("payload")));
    }

    #[rstest]
    fn test_raised_downcast_to_wrong_type_gives_error_back() {
        let error = LazyOptionalError::raised(Boom("payload"));
        let error = error.downcast::<NoValuePresentError>().unwrap_err();
        assert!(error.is_raised());
        assert_eq!(error.downcast_ref::<Boom>(), Some(&Boom("payload")));
    }

    #[rstest]
    fn test_builtin_variants_do_not_downcast() {
        let error = LazyOptionalError::no_value_present();
        assert!(error.downcast_ref::<NoValuePresentError>().is_none());
        assert!(error.downcast::<NoValuePresentError>().is_err());
    }

    #[derive(Debug)]
    struct Wrapped(Boom);

    impl fmt::Display for Wrapped {
        fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("wrapped")
        }
    }

    impl Error for Wrapped {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    fn error_chain(error: &dyn Error) -> Vec<String> {
        let mut messages = vec![error.to_string()];
        let mut current = error.source();
        while let Some(source) = current {
            messages.push(source.to_string());
            current = source.source();
        }
        messages
    }

    #[rstest]
    fn test_source_skips_payload_already_displayed() {
        let error = LazyOptionalError::raised(Boom("inner"));
        assert!(error.source().is_none());
        assert_eq!(error_chain(&error), vec!["boom: inner"]);
        assert!(LazyOptionalError::no_value_present().source().is_none());
    }

    #[rstest]
    fn test_source_follows_payload_source() {
        let error = LazyOptionalError::raised(Wrapped(Boom("cause")));
        assert_eq!(error_chain(&error), vec!["wrapped", "boom: cause"]);
    }

    #[rstest]
    fn test_error_converts_into_send_sync_box() {
        let boxed: Box<dyn Error + Send + Sync> =
            Box::new(LazyOptionalError::raised(Boom("boxed")));
        assert_eq!(boxed.to_string(), "boom: boxed");
    }

    #[rstest]
    fn test_raised_is() {
        let raised = RaisedError::new(Boom("x"));
        assert!(raised.is::<Boom>());
        assert!(!raised.is::<NoValuePresentError>());
    }
}
