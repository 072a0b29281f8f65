//! Optional process-wide collector handle.
//!
//! The primary interface is an explicitly passed [`CollectorHandle`];
//! tests and libraries should prefer it. Programs that want the original
//! "one collector per process" shape can install a handle once and let
//! call sites look it up. An absent handle is the disabled state, not an
//! error: call sites check for `Some` and skip instrumentation otherwise.

use std::sync::OnceLock;

use crate::collector::CollectorHandle;
use crate::error::InstallError;

static GLOBAL: OnceLock<CollectorHandle> = OnceLock::new();

/// Install the process-wide collector handle.
///
/// Succeeds at most once per process; later calls fail with
/// [`InstallError::AlreadyInstalled`] and leave the first handle in place.
pub fn install(handle: CollectorHandle) -> Result<(), InstallError> {
    GLOBAL
        .set(handle)
        .map_err(|_| InstallError::AlreadyInstalled)
}

/// The installed handle, if any.
///
/// `None` means instrumentation is disabled process-wide.
pub fn global() -> Option<CollectorHandle> {
    GLOBAL.get().cloned()
}
