//! Call-site capture.
//!
//! File and line come from the compiler via `#[track_caller]`; the
//! function name cannot be introspected at runtime, so it is captured
//! lexically with [`function_name!`]. Sites that skip the macro degrade to
//! the `"none"` placeholder instead of failing.

use timing::CallSite;

/// Capture the immediate caller's file and line with an explicit
/// function name.
#[track_caller]
pub fn capture(function: &'static str) -> CallSite {
    let location = std::panic::Location::caller();
    CallSite::new(location.file(), location.line(), function)
}

/// Capture the immediate caller's file and line without a function name.
#[track_caller]
pub fn capture_unnamed() -> CallSite {
    capture(CallSite::unknown().function)
}

/// The fully qualified name of the enclosing function, as a
/// `&'static str`.
///
/// Uses the nested-function `type_name` trick; `::{{closure}}` segments
/// from async fns and closures are stripped so the name reads like a
/// plain path.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        let name = name.strip_suffix("::f").unwrap_or(name);
        name.strip_suffix("::{{closure}}").unwrap_or(name)
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_reports_this_file() {
        let site = capture("probe::tests::fake");
        assert!(site.is_known());
        assert!(site.file.ends_with("callsite.rs"), "got {}", site.file);
        assert!(site.line > 0);
        assert_eq!(site.function, "probe::tests::fake");
    }

    #[test]
    fn test_capture_unnamed_uses_placeholder() {
        let site = capture_unnamed();
        assert!(site.is_known());
        assert_eq!(site.function, "none");
    }

    #[test]
    fn test_function_name_is_qualified() {
        let name = function_name!();
        assert!(
            name.ends_with("tests::test_function_name_is_qualified"),
            "got {name}"
        );
    }

    #[tokio::test]
    async fn test_function_name_in_async_fn() {
        let name = function_name!();
        assert!(
            name.ends_with("tests::test_function_name_in_async_fn"),
            "got {name}"
        );
    }
}
