use strum_macros::Display;

use crate::error::Error;

/// Controller operations that can swallow a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum FormOperation {
    LoadUsers,
    Submit,
    Search,
    Delete,
}

/// Hook called whenever the controller absorbs a transport, status or decode
/// failure instead of returning it.
pub trait FormObserver: Send + Sync {
    fn on_failure(&self, operation: FormOperation, error: &Error);

    fn on_users_loaded(&self, _count: usize) {}
}

/// Default observer: structured log lines through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl FormObserver for TracingObserver {
    fn on_failure(&self, operation: FormOperation, error: &Error) {
        tracing::error!(operation = %operation, error = %error, "User form operation failed");
    }

    fn on_users_loaded(&self, count: usize) {
        tracing::info!(operation = %FormOperation::LoadUsers, count, "User list loaded");
    }
}
