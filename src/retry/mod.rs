//! Retry combinators.
//!
//! - [`RetryPolicy`] / [`retry`]: a fixed budget of extra attempts with a
//!   constant wait between them; surfaces the last failure once exhausted.
//! - [`RetryForever`] / [`retry_forever`]: no budget; completes only on success.
//!
//! Attempt counters live inside a single call and are never shared between
//! calls, even when the same policy value is reused concurrently.

mod bounded;
mod forever;

pub use bounded::{Retried, RetryError, RetryPolicy, retry};
pub use forever::{RetryForever, retry_forever};
