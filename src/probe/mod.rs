//! Probe source: one round-trip-time sample per call, via the OS ping tool.

mod ping;

pub use ping::PingProbe;

use thiserror::Error;

/// Probe error types. Timeouts and unparseable replies are not errors;
/// they come back as `Ok(None)` from [`ProbeSource::probe`].
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("ping could not be invoked: {0}")]
    Unavailable(#[from] std::io::Error),
}

/// A source of round-trip-time samples for one host address.
///
/// `Ok(Some(ms))` is a reply, `Ok(None)` is a timeout or a reply the
/// parser could not trust, `Err` means the ping facility itself cannot be
/// invoked (binary missing, permission denied).
#[allow(async_fn_in_trait)]
pub trait ProbeSource {
    async fn probe(&self, address: &str) -> Result<Option<f64>, ProbeError>;
}
