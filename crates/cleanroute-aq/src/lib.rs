//! PM2.5 data provider clients for the route exposure engine.
//!
//! Two providers are implemented: OpenAQ (spatial station query with
//! distance weighting) and AQICN (single-point geo feed, token-gated).
//! [`FallbackChain`] tries them in a fixed priority order and yields the
//! first available reading. Every provider failure degrades to "no
//! reading"; nothing in this crate surfaces an error to the scoring
//! pipeline.

pub mod aqicn;
pub mod chain;
pub mod openaq;

pub use aqicn::{AqicnClient, AqicnConfig};
pub use chain::FallbackChain;
pub use openaq::{OpenAqClient, OpenAqConfig};

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
