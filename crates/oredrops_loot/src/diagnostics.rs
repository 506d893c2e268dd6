//! Diagnostics sink over `tracing`.
//!
//! `debug` output is gated by a [`DebugFlag`] the host owns and may flip
//! at any time; the other levels always pass through. Gated messages are
//! emitted at INFO with a `[DEBUG]` prefix, so turning the flag on is
//! enough to see them under the usual `info` filter.

use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared on/off switch for debug diagnostics.
#[derive(Clone, Debug, Default)]
pub struct DebugFlag(Arc<AtomicBool>);

impl DebugFlag {
    /// A new flag, initially `enabled`.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self(Arc::new(AtomicBool::new(enabled)))
    }

    /// Current value.
    #[inline]
    #[must_use]
    pub fn get(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Sets the flag; every clone observes it.
    #[inline]
    pub fn set(&self, enabled: bool) {
        self.0.store(enabled, Ordering::Relaxed);
    }
}

/// Levelled message sink.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    debug: DebugFlag,
}

impl Diagnostics {
    /// Sink gated by `debug`.
    #[must_use]
    pub fn new(debug: DebugFlag) -> Self {
        Self { debug }
    }

    /// The gate for [`debug`](Self::debug) messages.
    #[must_use]
    pub fn flag(&self) -> &DebugFlag {
        &self.debug
    }

    /// Whether debug messages are emitted.
    #[inline]
    #[must_use]
    pub fn debug_enabled(&self) -> bool {
        self.debug.get()
    }

    /// Emits only while the debug flag is set.
    pub fn debug(&self, message: impl Display) {
        if self.debug.get() {
            tracing::info!(target: "oredrops", "[DEBUG] {message}");
        }
    }

    /// Informational message.
    pub fn info(&self, message: impl Display) {
        tracing::info!(target: "oredrops", "{message}");
    }

    /// Recoverable problem.
    pub fn warn(&self, message: impl Display) {
        tracing::warn!(target: "oredrops", "{message}");
    }

    /// Serious problem; the operation that hit it did not complete.
    pub fn severe(&self, message: impl Display) {
        tracing::error!(target: "oredrops", "{message}");
    }
}
