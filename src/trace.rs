//! Internal logging hooks.
//!
//! With the `tracing` feature the macros forward to the `tracing` crate;
//! without it they only borrow their arguments.

/// Emits a `trace` level event when a terminal operation forces a chain.
#[cfg(feature = "tracing")]
macro_rules! trace_evaluation {
    ($operation:expr, $present:expr) => {
        ::tracing::trace!(
            operation = $operation,
            present = $present,
            "lazy optional evaluated"
        )
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_evaluation {
    ($operation:expr, $present:expr) => {
        let _ = (&$operation, &$present);
    };
}

/// Emits a `debug` level event when a chain step raises an error.
#[cfg(feature = "tracing")]
macro_rules! trace_raise {
    ($step:expr, $error:expr) => {
        ::tracing::debug!(step = $step, error = %$error, "lazy optional step raised")
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_raise {
    ($step:expr, $error:expr) => {
        let _ = (&$step, &$error);
    };
}

pub(crate) use trace_evaluation;
pub(crate) use trace_raise;
