//! Optional process-wide [`Prefs`] slot.
//!
//! Prefer passing a [`Prefs`] (or an `Arc` of one) to the code that needs
//! it. This slot exists for applications that want a single instance
//! reachable from anywhere; using it before [`init`] is an error rather
//! than a silent default.

use std::sync::OnceLock;

use tracing::debug;

use crate::error::{PrefsError, PrefsResult};
use crate::prefs::Prefs;

static GLOBAL: OnceLock<Prefs> = OnceLock::new();

/// Install `prefs` as the process-wide instance. Only the first call wins.
pub fn init(prefs: Prefs) -> PrefsResult<&'static Prefs> {
    let name = prefs.name().to_string();
    GLOBAL
        .set(prefs)
        .map_err(|_| PrefsError::AlreadyInitialized)?;
    debug!(name = %name, "global preferences installed");
    get()
}

/// The process-wide instance.
pub fn get() -> PrefsResult<&'static Prefs> {
    GLOBAL.get().ok_or(PrefsError::NotInitialized)
}

/// Returns `true` once [`init`] has succeeded.
pub fn is_initialized() -> bool {
    GLOBAL.get().is_some()
}
