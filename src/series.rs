//! Ordered, one-at-a-time iteration with an async operation per element.
//!
//! Every combinator here awaits element `i` to completion before it builds the
//! future for element `i + 1`, and stops at the first failure. The operation's
//! error type is opaque and comes back to the caller unchanged.

use std::future::Future;

use futures::stream::{self, Stream};

/// Map each element through `op`, in order, collecting the results.
///
/// On success the output has the same length and order as the input. On the
/// first failure the partial results are dropped and that error is returned;
/// later elements are never passed to `op`.
pub async fn map_series<I, F, Fut, T, E>(items: I, mut op: F) -> Result<Vec<T>, E>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let items = items.into_iter();
    let mut results = Vec::with_capacity(items.size_hint().0);

    for (index, item) in items.enumerate() {
        tracing::trace!(index, "map_series step");
        results.push(op(item).await?);
    }

    Ok(results)
}

/// Run `op` on each element, in order, for its side effects only.
///
/// An empty input succeeds without calling `op`.
pub async fn each_series<I, F, Fut, E>(items: I, mut op: F) -> Result<(), E>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = Result<(), E>>,
{
    for (index, item) in items.into_iter().enumerate() {
        tracing::trace!(index, "each_series step");
        op(item).await?;
    }
    Ok(())
}

/// Run `op(value, key)` over a key/value collection, in iteration order.
///
/// Order is whatever the collection yields: insertion order for a
/// `Vec<(K, V)>`, key order for a `BTreeMap`. A `HashMap` is accepted but its
/// order is unspecified.
pub async fn for_each_of_series<M, K, V, F, Fut, E>(mapping: M, mut op: F) -> Result<(), E>
where
    M: IntoIterator<Item = (K, V)>,
    F: FnMut(V, K) -> Fut,
    Fut: Future<Output = Result<(), E>>,
{
    for (key, value) in mapping {
        op(value, key).await?;
    }
    Ok(())
}

/// Keep the elements for which the async predicate resolves `true`.
///
/// Predicates run one at a time in input order; the kept elements retain that
/// order. A failing predicate aborts the whole call with its error.
pub async fn filter_series<I, F, Fut, E>(items: I, mut predicate: F) -> Result<Vec<I::Item>, E>
where
    I: IntoIterator,
    F: FnMut(&I::Item) -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    let mut kept = Vec::new();
    for item in items {
        if predicate(&item).await? {
            kept.push(item);
        }
    }
    Ok(kept)
}

/// Lazy form of [`map_series`].
///
/// The operation for the next element is started only when the consumer polls
/// for it. The stream yields every success in order, then either ends or
/// yields the first error and ends.
pub fn series_stream<I, F, Fut, T, E>(items: I, op: F) -> impl Stream<Item = Result<T, E>>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    // None once an error has been yielded
    let state = Some((items.into_iter(), op));

    stream::unfold(state, |state| async move {
        let Some((mut items, mut op)) = state else {
            return None;
        };
        let Some(item) = items.next() else {
            return None;
        };
        match op(item).await {
            Ok(value) => Some((Ok(value), Some((items, op)))),
            Err(e) => Some((Err(e), None)),
        }
    })
}
