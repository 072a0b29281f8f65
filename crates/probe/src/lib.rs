//! Function Probes
//!
//! This crate provides the probing side of function-level latency
//! instrumentation:
//!
//! - Call-site capture ([`callsite`], [`function_name!`]) using
//!   `#[track_caller]` in place of runtime stack introspection
//! - [`ScopeTimer`], an RAII probe that emits exactly one timing event on
//!   every exit path of the instrumented region
//! - The [`time_scope!`] macro pairing both
//!
//! Probes feed an explicitly passed [`timing::CollectorHandle`]; programs
//! that installed a process-wide handle check for its presence and skip
//! instrumentation when it is absent:
//!
//! ```no_run
//! use probe::time_scope;
//!
//! fn instrumented_work() {
//!     if let Some(handle) = timing::global() {
//!         time_scope!(&handle);
//!     }
//!     // ... work ...
//! }
//! ```
//!
//! Note the guard above binds the timer for the `if let` body only; when
//! the whole function should be timed, pass the handle in and use
//! [`time_scope!`] at the top of the function instead.

pub mod callsite;
mod timer;

pub use timer::ScopeTimer;
