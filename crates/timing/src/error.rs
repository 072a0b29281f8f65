//! Error types for the timing system.

use thiserror::Error;

use crate::event::TimingEvent;

/// Errors from handing an event to the collector.
///
/// Both variants return the rejected event so the caller may retry or
/// inspect what was not logged.
#[derive(Debug, Error)]
pub enum EmitError {
    /// The bounded event queue is at capacity.
    #[error("timing event queue is full")]
    QueueFull(TimingEvent),

    /// The collector's receive loop has exited.
    #[error("timing collector has shut down")]
    Closed(TimingEvent),
}

impl EmitError {
    /// Recover the event that could not be emitted.
    pub fn into_event(self) -> TimingEvent {
        match self {
            Self::QueueFull(event) | Self::Closed(event) => event,
        }
    }
}

/// Error from requesting collector shutdown.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TerminateError {
    /// The receive loop had already exited when termination was requested.
    #[error("collector receive loop has already exited")]
    AlreadyStopped,
}

/// Error from installing the process-wide collector handle.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InstallError {
    /// A global handle was installed earlier in the process lifetime.
    #[error("a global collector handle is already installed")]
    AlreadyInstalled,
}
