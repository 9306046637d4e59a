/*!
 * Settle-all fan-out of independent units of work.
 */

use futures::stream::{self, StreamExt};
use std::future::Future;

/// Run `task` for every item with at most `limit` in flight
///
/// Every task runs to completion regardless of how the others end, and the
/// results come back in the order of `items`.
pub async fn settle_all<T, R, F, Fut>(items: Vec<T>, limit: usize, task: F) -> Vec<R>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = R>,
{
    let mut results = stream::iter(items.into_iter().enumerate())
        .map(|(index, item)| {
            let pending = task(item);
            async move { (index, pending.await) }
        })
        .buffer_unordered(limit.max(1))
        .collect::<Vec<_>>()
        .await;

    // Restore input order
    results.sort_by_key(|(index, _)| *index);
    results.into_iter().map(|(_, result)| result).collect()
}
