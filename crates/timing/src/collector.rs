//! The timing collector: a single receive loop fed by many producers.
//!
//! Any number of concurrent probes hand [`TimingEvent`]s to a
//! [`CollectorHandle`]; one [`Collector`] task drains them and writes a
//! formatted line per event to its sink. Shutdown is requested through a
//! separate [`ShutdownHandle`] whose `terminate` consumes it, so a second
//! termination is unrepresentable rather than a hang.
//!
//! # Example
//!
//! ```no_run
//! use timing::{Collector, TimingEvent, CallSite};
//! use std::time::Duration;
//!
//! # async fn demo() {
//! let (collector, handle, shutdown) = Collector::new();
//! let loop_task = collector.spawn();
//!
//! let site = CallSite::new("src/main.rs", 10, "myapp::work");
//! handle.emit(TimingEvent::new(site, Duration::from_millis(12))).unwrap();
//!
//! shutdown.terminate().unwrap();
//! let logged = loop_task.await.unwrap();
//! assert_eq!(logged, 1);
//! # }
//! ```

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::error::{EmitError, TerminateError};
use crate::event::TimingEvent;
use crate::sink::{LogSink, TracingSink};

/// Configuration for a collector instance.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Capacity of the bounded event queue.
    ///
    /// Events emitted before the receive loop starts, or while it is busy,
    /// are buffered up to this limit; beyond it `emit` reports
    /// [`EmitError::QueueFull`] instead of blocking.
    pub queue_capacity: usize,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 256,
        }
    }
}

impl CollectorConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the event queue capacity.
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }
}

/// Sending half of the event channel, handed to probes.
///
/// Cheap to clone; every clone feeds the same receive loop.
#[derive(Debug, Clone)]
pub struct CollectorHandle {
    tx: mpsc::Sender<TimingEvent>,
}

impl CollectorHandle {
    /// Hand an event to the collector without blocking.
    ///
    /// Fails with [`EmitError::QueueFull`] when the bounded queue is at
    /// capacity and [`EmitError::Closed`] once the receive loop has exited;
    /// both carry the event back to the caller.
    pub fn emit(&self, event: TimingEvent) -> Result<(), EmitError> {
        self.tx.try_send(event).map_err(|err| match err {
            TrySendError::Full(event) => EmitError::QueueFull(event),
            TrySendError::Closed(event) => EmitError::Closed(event),
        })
    }

    /// Hand an event to the collector, waiting for queue capacity.
    ///
    /// The backpressure-aware variant of [`emit`](Self::emit); fails only
    /// when the receive loop has exited.
    pub async fn send(&self, event: TimingEvent) -> Result<(), EmitError> {
        self.tx
            .send(event)
            .await
            .map_err(|mpsc::error::SendError(event)| EmitError::Closed(event))
    }

    /// Whether the receive loop has exited.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Owner of the one-shot termination signal.
///
/// `terminate` consumes the handle, so shutdown can be requested at most
/// once per collector lifetime.
#[derive(Debug)]
pub struct ShutdownHandle {
    tx: oneshot::Sender<()>,
}

impl ShutdownHandle {
    /// Ask the receive loop to drain buffered events and exit.
    ///
    /// Returns [`TerminateError::AlreadyStopped`] if the loop has already
    /// exited (for example because every [`CollectorHandle`] was dropped).
    pub fn terminate(self) -> Result<(), TerminateError> {
        self.tx.send(()).map_err(|()| TerminateError::AlreadyStopped)
    }
}

/// The receive side of the timing pipeline.
///
/// Holds the receiving halves of the event and shutdown channels plus the
/// log sink. [`run`](Self::run) consumes the collector, so the loop can be
/// started exactly once and never restarted.
pub struct Collector {
    events: mpsc::Receiver<TimingEvent>,
    shutdown: oneshot::Receiver<()>,
    sink: Box<dyn LogSink>,
}

impl Collector {
    /// Create a collector with default configuration and the tracing sink.
    ///
    /// Allocates the event and shutdown channels; no other side effects.
    /// Each call produces an independent instance.
    pub fn new() -> (Self, CollectorHandle, ShutdownHandle) {
        Self::with_config(CollectorConfig::default())
    }

    /// Create a collector with explicit configuration and the tracing sink.
    pub fn with_config(config: CollectorConfig) -> (Self, CollectorHandle, ShutdownHandle) {
        Self::with_sink(config, TracingSink)
    }

    /// Create a collector writing to a custom sink.
    pub fn with_sink(
        config: CollectorConfig,
        sink: impl LogSink + 'static,
    ) -> (Self, CollectorHandle, ShutdownHandle) {
        let (event_tx, event_rx) = mpsc::channel(config.queue_capacity.max(1));
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let collector = Self {
            events: event_rx,
            shutdown: shutdown_rx,
            sink: Box::new(sink),
        };
        let handle = CollectorHandle { tx: event_tx };
        let shutdown = ShutdownHandle { tx: shutdown_tx };
        (collector, handle, shutdown)
    }

    /// Run the receive loop until terminated.
    ///
    /// Waits on the event and shutdown channels simultaneously: each event
    /// becomes one log line on the sink; a termination signal (or a dropped
    /// [`ShutdownHandle`]) stops the loop after draining events already in
    /// the queue, so nothing accepted into the channel is silently lost.
    /// The loop also exits once every [`CollectorHandle`] has been dropped.
    ///
    /// Returns the number of events logged.
    pub async fn run(mut self) -> u64 {
        let mut logged = 0u64;
        loop {
            tokio::select! {
                maybe_event = self.events.recv() => match maybe_event {
                    Some(event) => {
                        self.log(&event);
                        logged += 1;
                    }
                    // Every producer handle is gone.
                    None => break,
                },
                _ = &mut self.shutdown => {
                    while let Ok(event) = self.events.try_recv() {
                        self.log(&event);
                        logged += 1;
                    }
                    break;
                }
            }
        }
        logged
    }

    /// Start the receive loop on its own task.
    pub fn spawn(self) -> JoinHandle<u64> {
        tokio::spawn(self.run())
    }

    fn log(&self, event: &TimingEvent) {
        self.sink.write(format_args!("TIMING {event}"));
    }
}
