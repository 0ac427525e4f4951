//! Process-wide glossary registration.
//!
//! Callers normally hold an explicit `Arc<Glossary>` handle; this module
//! is the one sanctioned piece of shared state for hosts that serve many
//! independent calls (a tool dispatcher, a request handler) and want a
//! single glossary built once. Registration is explicit and resettable —
//! there is no lazily-constructed implicit default — so tests can isolate
//! themselves with [`reset`].
//!
//! Replacing the registered glossary is an atomic `Arc` swap: readers that
//! already hold a handle keep scanning the old store; new callers see the
//! new one.

use crate::glossary::Glossary;
use parking_lot::RwLock;
use std::sync::Arc;

static SHARED: RwLock<Option<Arc<Glossary>>> = RwLock::new(None);

/// Register a glossary as the process-wide shared instance.
pub fn install(glossary: Arc<Glossary>) {
    *SHARED.write() = Some(glossary);
}

/// The currently registered glossary, if any.
pub fn shared() -> Option<Arc<Glossary>> {
    SHARED.read().clone()
}

/// Clear the registration. Intended for test isolation.
pub fn reset() {
    *SHARED.write() = None;
}
