//! Timing event types.

use std::fmt;
use std::time::Duration;

use crate::format::format_duration;

/// Identity of an instrumented call site.
///
/// Captured once when a probe begins and carried unchanged through the
/// event channel. A call site where capture was unavailable degrades to
/// [`CallSite::unknown`] rather than being dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    /// Source file of the instrumentation call, as reported by the compiler.
    pub file: &'static str,
    /// Line of the instrumentation call.
    pub line: u32,
    /// Fully qualified name of the instrumented function, or `"none"`.
    pub function: &'static str,
}

impl CallSite {
    /// Create a call site from explicit components.
    pub const fn new(file: &'static str, line: u32, function: &'static str) -> Self {
        Self {
            file,
            line,
            function,
        }
    }

    /// The degraded call site used when capture is unavailable.
    pub const fn unknown() -> Self {
        Self {
            file: "",
            line: 0,
            function: "none",
        }
    }

    /// Whether this call site carries real location data.
    pub fn is_known(&self) -> bool {
        !self.file.is_empty() || self.line != 0
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {}", self.file, self.line, self.function)
    }
}

/// One observation of a single instrumented function invocation.
///
/// Constructed by the probe at completion time and moved into the
/// collector's event channel; the collector owns it from then on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingEvent {
    call_site: CallSite,
    duration: Duration,
}

impl TimingEvent {
    /// Create an event for the given call site and elapsed duration.
    pub const fn new(call_site: CallSite, duration: Duration) -> Self {
        Self {
            call_site,
            duration,
        }
    }

    /// The call site this event was measured at.
    pub fn call_site(&self) -> CallSite {
        self.call_site
    }

    /// Wall-clock time between probe begin and completion.
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for TimingEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            format_duration(self.duration),
            self.call_site
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_display() {
        let site = CallSite::new("src/lib.rs", 42, "mycrate::work");
        let event = TimingEvent::new(site, Duration::from_millis(3_723_004));
        assert_eq!(event.to_string(), "01:02:03.004 src/lib.rs:42 mycrate::work");
    }

    #[test]
    fn test_unknown_call_site() {
        let site = CallSite::unknown();
        assert!(!site.is_known());
        assert_eq!(site.file, "");
        assert_eq!(site.line, 0);
        assert_eq!(site.function, "none");

        let event = TimingEvent::new(site, Duration::ZERO);
        assert_eq!(event.to_string(), "00:00:00.000 :0 none");
    }

    #[test]
    fn test_known_call_site() {
        assert!(CallSite::new("a.rs", 1, "f").is_known());
        assert!(CallSite::new("a.rs", 0, "none").is_known());
    }

    #[test]
    fn test_event_accessors() {
        let site = CallSite::new("main.rs", 7, "main");
        let event = TimingEvent::new(site, Duration::from_secs(2));
        assert_eq!(event.call_site(), site);
        assert_eq!(event.duration(), Duration::from_secs(2));
    }
}
