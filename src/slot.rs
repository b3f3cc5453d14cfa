//! Releasable holders for cached discovery results.

use parking_lot::RwLock;
use std::sync::Arc;

/// Holder for one discovered provider list.
///
/// The payload can be released independently of the owning entry, turning the
/// next lookup for that scope into a miss that rediscovers into a fresh slot.
/// This is the explicit stand-in for the source runtime's memory-pressure
/// reclamation: there is no collector here to shed payloads automatically, so
/// shedding is a call the owner makes.
pub(crate) struct ResultSlot<P> {
    payload: RwLock<Option<Arc<[P]>>>,
}

impl<P> ResultSlot<P> {
    pub(crate) fn new(providers: Arc<[P]>) -> Self {
        Self {
            payload: RwLock::new(Some(providers)),
        }
    }

    /// The cached list, or `None` once released.
    pub(crate) fn get(&self) -> Option<Arc<[P]>> {
        self.payload.read().clone()
    }

    /// Drop the payload. The slot stays in place and reads as a miss.
    pub(crate) fn release(&self) {
        *self.payload.write() = None;
    }
}
