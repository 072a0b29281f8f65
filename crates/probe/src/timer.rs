//! RAII scope timers.

use std::time::{Duration, Instant};

use timing::{CallSite, CollectorHandle, EmitError, TimingEvent};

use crate::callsite;

/// A probe that measures one instrumented region from `begin` to drop.
///
/// Dropping the timer completes the probe: it computes the elapsed
/// duration and hands exactly one [`TimingEvent`] to the collector. Drop
/// runs on every exit path of the instrumented region, so early returns
/// and unwinds are still recorded.
///
/// # Example
///
/// ```no_run
/// use probe::time_scope;
/// use timing::CollectorHandle;
///
/// fn process(handle: &CollectorHandle) {
///     time_scope!(handle);
///     // ... work ...
/// } // one timing event emitted here
/// ```
#[derive(Debug)]
pub struct ScopeTimer {
    handle: CollectorHandle,
    call_site: CallSite,
    start: Instant,
    completed: bool,
}

impl ScopeTimer {
    /// Begin timing at the caller's file and line.
    ///
    /// The function name is left as the `"none"` placeholder; use
    /// [`begin_named`](Self::begin_named) or [`time_scope!`] to capture it.
    ///
    /// [`time_scope!`]: crate::time_scope
    #[track_caller]
    pub fn begin(handle: &CollectorHandle) -> Self {
        Self::from_call_site(handle, callsite::capture_unnamed())
    }

    /// Begin timing at the caller's file and line with an explicit
    /// function name.
    #[track_caller]
    pub fn begin_named(handle: &CollectorHandle, function: &'static str) -> Self {
        Self::from_call_site(handle, callsite::capture(function))
    }

    /// Begin timing against a pre-built call site.
    ///
    /// This is the degraded path for environments where capture is
    /// unavailable: pass [`CallSite::unknown`] and the event is still
    /// emitted with placeholder identity.
    pub fn from_call_site(handle: &CollectorHandle, call_site: CallSite) -> Self {
        Self {
            handle: handle.clone(),
            call_site,
            start: Instant::now(),
            completed: false,
        }
    }

    /// Elapsed time since the probe began.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// The captured call-site identity.
    pub fn call_site(&self) -> CallSite {
        self.call_site
    }

    /// Complete the probe now and surface any emit failure.
    ///
    /// Consumes the timer; the destructor will not emit a second event.
    pub fn stop(mut self) -> Result<(), EmitError> {
        self.complete()
    }

    fn complete(&mut self) -> Result<(), EmitError> {
        if self.completed {
            return Ok(());
        }
        self.completed = true;
        let event = TimingEvent::new(self.call_site, self.start.elapsed());
        self.handle.emit(event)
    }
}

impl Drop for ScopeTimer {
    fn drop(&mut self) {
        if let Err(err) = self.complete() {
            // Nowhere to propagate from a destructor; the event is lost.
            tracing::warn!(target: "timing", %err, call_site = %self.call_site, "timing event dropped");
        }
    }
}

/// Instrument the enclosing scope.
///
/// Expands to a [`ScopeTimer`] bound for the rest of the scope, with the
/// enclosing function's name captured via [`function_name!`]. The timing
/// event is emitted when the scope exits.
///
/// ```no_run
/// use probe::time_scope;
///
/// fn handle_request(handle: &timing::CollectorHandle) {
///     time_scope!(handle);
///     // ... work ...
/// }
/// ```
///
/// [`function_name!`]: crate::function_name
#[macro_export]
macro_rules! time_scope {
    ($handle:expr) => {
        let _timer = $crate::ScopeTimer::begin_named($handle, $crate::function_name!());
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use timing::{Collector, CollectorConfig, MemorySink};

    fn collector_with_sink() -> (Collector, CollectorHandle, timing::ShutdownHandle, MemorySink) {
        let sink = MemorySink::new();
        let (collector, handle, shutdown) =
            Collector::with_sink(CollectorConfig::default(), sink.clone());
        (collector, handle, shutdown, sink)
    }

    #[tokio::test]
    async fn test_drop_emits_exactly_one_event() {
        let (collector, handle, shutdown, sink) = collector_with_sink();

        {
            let timer = ScopeTimer::begin(&handle);
            sleep(Duration::from_millis(5));
            assert!(timer.elapsed() >= Duration::from_millis(5));
        }

        shutdown.terminate().unwrap();
        let logged = collector.run().await;
        assert_eq!(logged, 1);
        assert_eq!(sink.len(), 1);
    }

    #[tokio::test]
    async fn test_stop_defuses_destructor() {
        let (collector, handle, shutdown, sink) = collector_with_sink();

        let timer = ScopeTimer::begin(&handle);
        timer.stop().unwrap();

        shutdown.terminate().unwrap();
        collector.run().await;
        assert_eq!(sink.len(), 1);
    }

    #[tokio::test]
    async fn test_early_return_still_records() {
        fn guarded(handle: &CollectorHandle, bail: bool) -> u32 {
            let _timer = ScopeTimer::begin(handle);
            if bail {
                return 0;
            }
            1
        }

        let (collector, handle, shutdown, sink) = collector_with_sink();
        guarded(&handle, true);
        guarded(&handle, false);

        shutdown.terminate().unwrap();
        collector.run().await;
        assert_eq!(sink.len(), 2);
    }

    #[tokio::test]
    async fn test_begin_named_call_site() {
        let (collector, handle, shutdown, sink) = collector_with_sink();

        let timer = ScopeTimer::begin_named(&handle, "probe::tests::worker");
        let site = timer.call_site();
        assert!(site.file.ends_with("timer.rs"));
        assert_eq!(site.function, "probe::tests::worker");
        drop(timer);

        shutdown.terminate().unwrap();
        collector.run().await;
        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("probe::tests::worker"), "got {}", lines[0]);
    }

    #[tokio::test]
    async fn test_degraded_call_site_still_logged() {
        let (collector, handle, shutdown, sink) = collector_with_sink();

        drop(ScopeTimer::from_call_site(&handle, CallSite::unknown()));

        shutdown.terminate().unwrap();
        collector.run().await;
        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with(":0 none"), "got {}", lines[0]);
    }

    #[tokio::test]
    async fn test_stop_after_collector_gone_reports_closed() {
        let (collector, handle, _shutdown, _sink) = collector_with_sink();

        let timer = ScopeTimer::begin(&handle);
        drop(collector);

        let err = timer.stop().unwrap_err();
        assert!(matches!(err, EmitError::Closed(_)));
    }

    #[tokio::test]
    async fn test_time_scope_macro_captures_function_name() {
        fn busy_function(handle: &CollectorHandle) {
            time_scope!(handle);
        }

        let (collector, handle, shutdown, sink) = collector_with_sink();
        busy_function(&handle);

        shutdown.terminate().unwrap();
        collector.run().await;
        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("busy_function"), "got {}", lines[0]);
    }
}
