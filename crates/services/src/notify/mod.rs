mod engine;
mod factory;
mod mentions;
mod store;

use std::future::Future;

pub use engine::{NotificationEngine, SweepReport};
pub use factory::{NotificationDraft, NotificationFactory};
pub use mentions::parse_mentions;
pub use store::{DueTask, NotifyStore};

use crate::dao::base::DaoResult;

/// Call-site wrapper for fan-outs that must not fail the primary
/// mutation: a comment or task write commits regardless of whether its
/// notifications could be written. Failures are logged and dropped.
pub async fn best_effort<T>(
    context: &'static str,
    op: impl Future<Output = DaoResult<T>>,
) -> Option<T> {
    match op.await {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::warn!(%error, context, "notification fan-out failed");
            None
        }
    }
}
