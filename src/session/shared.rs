use std::sync::{Mutex, MutexGuard};

use tracing::info;

use crate::config::config_model::AccessibilityIdentifierConfig;
use crate::error::{IdentifierError, Result};
use crate::session::identifier_session::IdentifierSession;

static SHARED: Mutex<Option<IdentifierSession>> = Mutex::new(None);

fn lock() -> Result<MutexGuard<'static, Option<IdentifierSession>>> {
    SHARED.lock().map_err(|_| IdentifierError::LockPoisoned)
}

/// Install (or replace) the process-wide session used by production code.
pub fn install_shared(config: AccessibilityIdentifierConfig) -> Result<()> {
    let mut guard = lock()?;
    *guard = Some(IdentifierSession::new(config));
    info!("installed shared accessibility identifier session");
    Ok(())
}

/// Remove the process-wide session. Returns the previous one, if any.
pub fn uninstall_shared() -> Result<Option<IdentifierSession>> {
    Ok(lock()?.take())
}

pub fn is_shared_installed() -> bool {
    lock().map(|g| g.is_some()).unwrap_or(false)
}

/// Run `f` against the shared session.
///
/// Fails with [`IdentifierError::MissingConfiguration`] when nothing was
/// installed; callers must install a configuration before asking for ids.
///
/// The session lock is held while `f` runs and is not re-entrant: calling
/// `with_shared`, `install_shared`, `uninstall_shared` or
/// `is_shared_installed` from inside `f` deadlocks. Use the
/// `&mut IdentifierSession` handed to `f` instead.
pub fn with_shared<R>(f: impl FnOnce(&mut IdentifierSession) -> R) -> Result<R> {
    let mut guard = lock()?;
    let session = guard.as_mut().ok_or(IdentifierError::MissingConfiguration)?;
    Ok(f(session))
}
