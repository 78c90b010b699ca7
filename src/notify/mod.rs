//! User-notification side channel
//!
//! The volume policy gate surfaces its caution and abort messages through
//! an injected notifier capability instead of a display surface, keeping
//! the runner testable.

use std::fmt;

use tracing::warn;

use crate::REQUEST_COUNT_HARD_CAP;

/// A user-facing notice raised by the volume policy gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Request volume is within the caution band; the run continues.
    HighVolumeCaution { request_count: u32 },
    /// Request volume exceeds the hard cap; the run is aborted before any
    /// request is issued.
    VolumeCapExceeded { request_count: u32 },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::HighVolumeCaution { request_count } => write!(
                f,
                "Running {} requests per test case is a lot. Be courteous and \
                 do not overload resources you do not own. The run will continue.",
                request_count
            ),
            Notice::VolumeCapExceeded { request_count } => write!(
                f,
                "Running {} requests per test case exceeds the cap of {}. The cap \
                 prevents overuse of resources you do not own; lifting it requires \
                 changing the source and targeting only your own resources. The run \
                 is aborted.",
                request_count, REQUEST_COUNT_HARD_CAP
            ),
        }
    }
}

/// Capability the runner raises notices through.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);
}

/// Shipped [`Notifier`] forwarding notices to the tracing subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: &Notice) {
        warn!("{}", notice);
    }
}
