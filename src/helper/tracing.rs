use std::future::Future;

#[cfg(feature = "tracing")]
use tracing::{Instrument, Level};

/// Attach a per-port span to a launch task when the `tracing` feature is on
pub trait MaybeInstrument: Future + Sized {
    #[cfg(feature = "tracing")]
    fn maybe_instrument(self, name: &'static str, port: u16) -> impl Future<Output = Self::Output> {
        let span = tracing::span!(Level::DEBUG, "launch_task", name = name, port = port);
        self.instrument(span)
    }

    #[cfg(not(feature = "tracing"))]
    fn maybe_instrument(self, _name: &'static str, _port: u16) -> Self {
        self
    }
}

impl<F: Future> MaybeInstrument for F {}
