//! Timing Collection
//!
//! This crate provides the collection side of lightweight, opt-in
//! function-level latency instrumentation:
//!
//! - An immutable [`TimingEvent`] recording one measured call's identity
//!   and duration
//! - A [`Collector`] whose receive loop serializes concurrent reports from
//!   arbitrarily many tasks into one ordered log stream
//! - A graceful shutdown protocol in which termination is a consuming,
//!   at-most-once operation
//! - A minimal [`LogSink`] capability so output is not tied to any one
//!   logging framework (the default forwards to `tracing`)
//!
//! Producers never block: the event queue is bounded and `emit` reports
//! queue-full and collector-closed conditions as explicit errors carrying
//! the rejected event. On shutdown the loop drains everything already
//! accepted into the queue, so no event is silently dropped.
//!
//! The probing side (call-site capture and RAII scope timers) lives in the
//! companion `probe` crate.
//!
//! # Example
//!
//! ```no_run
//! use timing::{CallSite, Collector, TimingEvent};
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
//! loop_task.await.unwrap();
//! # }
//! ```

mod collector;
mod error;
mod event;
mod format;
mod global;
mod sink;

pub use collector::{Collector, CollectorConfig, CollectorHandle, ShutdownHandle};
pub use error::{EmitError, InstallError, TerminateError};
pub use event::{CallSite, TimingEvent};
pub use format::format_duration;
pub use global::{global, install};
pub use sink::{LogSink, MemorySink, TracingSink};
