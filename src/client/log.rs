/// Receives a trace line before every write and after every decoded read.
pub trait Logger: Send {
    fn log(&self, message: &str);
}

/// Forwards trace lines to `tracing` at debug level under the `atphone` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, message: &str) {
        tracing::debug!(target: "atphone", "{message}");
    }
}

/// Discards every trace line.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _message: &str) {}
}

impl<F> Logger for F
where
    F: Fn(&str) + Send,
{
    fn log(&self, message: &str) {
        self(message)
    }
}
