//! Conditional sequential loop.

use std::future::Future;

/// Run `op` repeatedly while `predicate` returns `true`.
///
/// The predicate is checked before every iteration, and only after the
/// previous iteration has settled, so iterations never overlap. The first
/// failing iteration ends the loop with its error.
///
/// State shared between the predicate and the operation has to sit behind
/// interior mutability (`Cell`, an atomic, a lock), since both closures are
/// held at once.
pub async fn whilst<P, F, Fut, E>(mut predicate: P, mut op: F) -> Result<(), E>
where
    P: FnMut() -> bool,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), E>>,
{
    let mut iterations: u64 = 0;
    while predicate() {
        op().await?;
        iterations += 1;
    }
    tracing::trace!(iterations, "whilst finished");
    Ok(())
}
