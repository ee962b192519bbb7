//! Seqflow - sequential async control-flow combinators
//!
//! Seqflow runs async operations strictly one after another: ordered series
//! over a collection, bounded retry with a constant interval, retry-until-success
//! polling, and a predicate-driven loop. No step ever starts before the previous
//! one has settled.

pub mod delay;
pub mod error;
pub mod retry;
pub mod series;
pub mod whilst;

pub use delay::{delay, delay_ms, interval_from_millis};
pub use error::{Result, SeqflowError};
pub use retry::{Retried, RetryError, RetryForever, RetryPolicy, retry, retry_forever};
pub use series::{each_series, filter_series, for_each_of_series, map_series, series_stream};
pub use whilst::whilst;
