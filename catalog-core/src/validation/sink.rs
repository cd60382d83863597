//! Diagnostic hook invoked for every error a validator appends
use super::field::FieldError;

/// Receives each [`FieldError`] as it is appended to a result
///
/// A sink only observes, it has no way to change what validation returns.
/// Closures taking a `&FieldError` are sinks too, which is handy in tests.
pub trait ErrorSink {
    /// Observe one appended error
    fn record(&self, err: &FieldError);
}

impl<F> ErrorSink for F
where
    F: Fn(&FieldError) + Send + Sync,
{
    fn record(&self, err: &FieldError) {
        self(err)
    }
}

/// Emits a `tracing` debug event per error
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn record(&self, err: &FieldError) {
        tracing::debug!(field = %err.field, error_type = %err.type_, "validation failed: {}", err.detail);
    }
}

/// Drops everything
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl ErrorSink for NoopSink {
    fn record(&self, _: &FieldError) {}
}
